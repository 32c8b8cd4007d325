//! Build orchestration for groundwork
//!
//! Turns a resolved component selection into the four Foundation artifacts:
//! expanded and compressed CSS, raw and minified JS.
//!
//! # Overview
//!
//! Each asset kind has its own orchestrator:
//! - **Sass**: synthesize an import-only source, compile it expanded, then
//!   compile the result again compressed
//! - **Js**: concatenate the selected scripts, then minify the result
//!
//! [`BuildPipeline`] runs both in order and reports each outcome.
//!
//! # Example
//!
//! ```ignore
//! use groundwork::build::{BuildContext, BuildPipeline};
//! use groundwork::config::load_config;
//! use groundwork::output::ConsoleSink;
//!
//! let config = load_config(None)?;
//! let context = BuildContext::new(config, project_root);
//! let report = BuildPipeline::new(&context).run(&ConsoleSink::new());
//! assert!(report.is_success());
//! ```

pub mod context;
pub mod error;
pub mod js;
pub mod pipeline;
pub mod result;
pub mod sass;

pub use context::*;
pub use error::*;
pub use js::*;
pub use pipeline::*;
pub use result::*;
pub use sass::*;

use std::fs;

use crate::registry::Component;
use crate::tool::SystemRunner;

static SYSTEM_RUNNER: SystemRunner = SystemRunner;

/// Create the parent directories of both artifacts.
///
/// Directories that already exist are left alone.
pub fn ensure_output_dirs(outputs: &BuildOutputs) -> Result<(), BuildError> {
    for path in outputs.paths() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
    }
    Ok(())
}

fn component_names(components: &[&Component]) -> String {
    components.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
}
