//! Errors raised by the build orchestrators.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::output::OutputSink;
use crate::resolve::ConfigurationError;
use crate::tool::ToolFailure;

/// A build invocation failed.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The component selection could not be resolved
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// An external tool or library call failed
    #[error(transparent)]
    Tool(#[from] ToolFailure),
    /// Reading a source or writing an artifact failed
    #[error("{}: {source}", .path.display())]
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// The configured compiler or minifier cannot be constructed
    #[error("no {capability} available: {reason}")]
    MissingCapability {
        /// `"sass compiler"` or `"js minifier"`
        capability: &'static str,
        reason: String,
    },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Write a diagnostic for this error to `sink`.
    ///
    /// Tool output has already been streamed to the sink by the runner, so a
    /// tool failure only adds the command that failed.
    pub fn report(&self, sink: &dyn OutputSink) {
        match self {
            BuildError::Tool(failure) => {
                sink.line(&format!("Failed on: {}", failure.command));
                if let Some(code) = failure.exit_code {
                    sink.line(&format!("Exit code: {}", code));
                }
            }
            other => sink.line(&format!("error: {}", other)),
        }
    }
}
