//! SASS compilation capabilities.
//!
//! Two implementations share one interface: `grass` compiles in-process,
//! `sassc` is spawned as a subprocess. Both read an input file and write an
//! output file; the caller hands the resulting [`Invocation`] to a runner.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::runner::{Invocation, ToolCommand};

/// Compiled CSS formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Human-readable
    #[default]
    Expanded,
    /// Whitespace and comments stripped
    Compressed,
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::Expanded => write!(f, "expanded"),
            OutputStyle::Compressed => write!(f, "compressed"),
        }
    }
}

impl From<OutputStyle> for grass::OutputStyle {
    fn from(style: OutputStyle) -> Self {
        match style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        }
    }
}

/// A SASS compiler.
pub trait SassCompiler {
    /// Short name used in progress output.
    fn name(&self) -> &str;

    /// Build the invocation that compiles `input` into `output`.
    fn compile<'a>(
        &'a self,
        input: &'a Path,
        output: &'a Path,
        include_paths: &'a [PathBuf],
        style: OutputStyle,
    ) -> Invocation<'a>;
}

/// In-process compiler backed by the `grass` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrassCompiler;

impl GrassCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl SassCompiler for GrassCompiler {
    fn name(&self) -> &str {
        "grass"
    }

    fn compile<'a>(
        &'a self,
        input: &'a Path,
        output: &'a Path,
        include_paths: &'a [PathBuf],
        style: OutputStyle,
    ) -> Invocation<'a> {
        let operation =
            format!("grass --style {} {} {}", style, input.display(), output.display());

        Invocation::Library {
            operation,
            call: Box::new(move || {
                let options =
                    grass::Options::default().load_paths(include_paths).style(style.into());
                let css = grass::from_path(input, &options).map_err(|e| e.to_string())?;
                fs::write(output, css)
                    .map_err(|e| format!("cannot write {}: {}", output.display(), e))?;
                Ok(String::new())
            }),
        }
    }
}

/// Subprocess compiler: `sassc --style <style> --load-path <p>... <in> <out>`.
#[derive(Debug, Clone)]
pub struct SasscCompiler {
    executable: PathBuf,
}

impl SasscCompiler {
    /// Use the `sassc` binary at `executable`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into() }
    }

    /// The command line for one compilation.
    pub fn command(
        &self,
        input: &Path,
        output: &Path,
        include_paths: &[PathBuf],
        style: OutputStyle,
    ) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.executable).arg("--style").arg(style.to_string());
        for path in include_paths {
            cmd = cmd.arg("--load-path").arg(path.display().to_string());
        }
        cmd.arg(input.display().to_string()).arg(output.display().to_string())
    }
}

impl SassCompiler for SasscCompiler {
    fn name(&self) -> &str {
        "sassc"
    }

    fn compile<'a>(
        &'a self,
        input: &'a Path,
        output: &'a Path,
        include_paths: &'a [PathBuf],
        style: OutputStyle,
    ) -> Invocation<'a> {
        Invocation::Command(self.command(input, output, include_paths, style))
    }
}
