//! Line-oriented output sinks.
//!
//! Every build step, tool invocation and watch event reports through an
//! [`OutputSink`]. Supports console output (with optional colors), an
//! in-memory capture, and a sink that discards everything.
//!
//! # Example
//!
//! ```ignore
//! use groundwork::output::{ConsoleSink, OutputSink, field};
//!
//! let sink = ConsoleSink::new();
//! field(&sink, "Output", "static/groundwork/css/foundation.css");
//! sink.line("Done");
//! ```

use std::io::Write;
use std::sync::Mutex;

/// Receiver of line-oriented progress and tool output.
pub trait OutputSink: Send + Sync {
    /// Report one line (without trailing newline).
    fn line(&self, line: &str);
}

/// Width of the label column written by [`field`].
const LABEL_WIDTH: usize = 12;

/// Write an aligned `Label:  value` line.
pub fn field(sink: &dyn OutputSink, label: &str, value: impl std::fmt::Display) {
    let label = format!("{}:", label);
    sink.line(&format!("{:<width$}{}", label, value, width = LABEL_WIDTH));
}

/// A sink that discards all lines.
#[derive(Debug, Default)]
pub struct NullSink;

impl NullSink {
    /// Create a new null sink.
    pub fn new() -> Self {
        Self
    }
}

impl OutputSink for NullSink {
    fn line(&self, _line: &str) {}
}

/// A sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    /// Whether any captured line starts with `prefix`.
    pub fn has_line_starting_with(&self, prefix: &str) -> bool {
        self.lines().iter().any(|l| l.starts_with(prefix))
    }
}

impl OutputSink for MemorySink {
    fn line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

/// Console sink with optional colors.
pub struct ConsoleSink {
    /// Whether to use colors
    use_colors: bool,
    /// Output writer (for testing)
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink").field("use_colors", &self.use_colors).finish()
    }
}

impl ConsoleSink {
    /// Create a console sink writing to stdout.
    pub fn new() -> Self {
        Self { use_colors: true, output: Mutex::new(Box::new(std::io::stdout())) }
    }

    /// Create a console sink that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false, // Disable colors for custom output
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Set whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Color a line by its leading keyword.
    fn colorize(&self, line: &str) -> String {
        if !self.use_colors {
            return line.to_string();
        }
        let code = if line.starts_with("Failed") || line.contains("error:") {
            "\x1b[31m"
        } else if line.starts_with("Done") {
            "\x1b[32m"
        } else if line.starts_with('[') {
            "\x1b[36m"
        } else {
            return line.to_string();
        };
        format!("{}{}\x1b[0m", code, line)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for ConsoleSink {
    fn line(&self, line: &str) {
        let line = self.colorize(line);
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
            let _ = output.flush();
        }
    }
}
