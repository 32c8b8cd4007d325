//! External tools: the runner plus the SASS and JS capabilities it drives.

pub mod minify;
pub mod runner;
pub mod sass;

pub use minify::{BuiltinMinifier, CommandMinifier, JsMinifier};
pub use runner::{
    Invocation, LibraryCall, ScopedWorkingDir, SystemRunner, ToolCommand, ToolFailure, ToolRunner,
};
pub use sass::{GrassCompiler, OutputStyle, SassCompiler, SasscCompiler};
