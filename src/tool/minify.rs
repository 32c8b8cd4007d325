//! JavaScript minification capabilities.

use std::fs;
use std::path::{Path, PathBuf};

use super::runner::{Invocation, ToolCommand};

/// A JS minifier reading one file and writing another.
pub trait JsMinifier {
    /// Short name used in progress output.
    fn name(&self) -> &str;

    /// Build the invocation that minifies `input` into `output`.
    fn minify<'a>(&'a self, input: &'a Path, output: &'a Path) -> Invocation<'a>;
}

/// In-process minifier backed by the `minify-js` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinMinifier;

impl BuiltinMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl JsMinifier for BuiltinMinifier {
    fn name(&self) -> &str {
        "minify-js"
    }

    fn minify<'a>(&'a self, input: &'a Path, output: &'a Path) -> Invocation<'a> {
        Invocation::Library {
            operation: format!("minify-js {} {}", input.display(), output.display()),
            call: Box::new(move || {
                let source = fs::read(input)
                    .map_err(|e| format!("cannot read {}: {}", input.display(), e))?;
                let session = minify_js::Session::new();
                let mut minified = Vec::new();
                minify_js::minify(
                    &session,
                    minify_js::TopLevelMode::Global,
                    &source,
                    &mut minified,
                )
                .map_err(|e| format!("{:?}", e))?;
                fs::write(output, minified)
                    .map_err(|e| format!("cannot write {}: {}", output.display(), e))?;
                Ok(String::new())
            }),
        }
    }
}

/// External minifier: `<command...> <input> -o <output>`.
#[derive(Debug, Clone)]
pub struct CommandMinifier {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandMinifier {
    /// Build from a command vector; `None` when it is empty.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self { program: PathBuf::from(program), args: args.to_vec() })
    }

    pub fn command(&self, input: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.program)
            .args(self.args.iter().cloned())
            .arg(input.display().to_string())
            .arg("-o")
            .arg(output.display().to_string())
    }
}

impl JsMinifier for CommandMinifier {
    fn name(&self) -> &str {
        self.program.file_name().and_then(|n| n.to_str()).unwrap_or("minifier")
    }

    fn minify<'a>(&'a self, input: &'a Path, output: &'a Path) -> Invocation<'a> {
        Invocation::Command(self.command(input, output))
    }
}
