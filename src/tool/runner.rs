//! External tool execution.
//!
//! A [`ToolRunner`] executes an [`Invocation`], either a subprocess or an
//! in-process library call, in a given working directory. Output is pushed
//! to the sink line by line as it arrives and also returned in full.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use thiserror::Error;

use crate::output::OutputSink;

/// An external tool failed.
///
/// Carries the exact command line (or library operation) so the failure can
/// be reproduced by hand, plus everything the tool printed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed on: {command}{}", exit_code_suffix(.exit_code))]
pub struct ToolFailure {
    /// Process exit code; `None` for library calls, spawn failures and signals
    pub exit_code: Option<i32>,
    /// The command line or operation that was attempted
    pub command: String,
    /// Combined stdout/stderr, or the compile error message
    pub output: String,
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {})", code),
        None => String::new(),
    }
}

/// A subprocess command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl ToolCommand {
    /// Start a command for `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: vec![] }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display when it contains whitespace.
fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

/// An in-process call; returns informational output or an error message.
pub type LibraryCall<'a> = Box<dyn FnOnce() -> Result<String, String> + 'a>;

/// Something a [`ToolRunner`] can execute.
pub enum Invocation<'a> {
    /// Spawn a subprocess
    Command(ToolCommand),
    /// Call into a library
    Library {
        /// Human-readable description of the operation
        operation: String,
        /// The call itself
        call: LibraryCall<'a>,
    },
}

impl Invocation<'_> {
    /// The command line or operation, as reported on failure.
    pub fn describe(&self) -> String {
        match self {
            Invocation::Command(cmd) => cmd.to_string(),
            Invocation::Library { operation, .. } => operation.clone(),
        }
    }
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invocation::Command(cmd) => f.debug_tuple("Command").field(cmd).finish(),
            Invocation::Library { operation, .. } => {
                f.debug_struct("Library").field("operation", operation).finish()
            }
        }
    }
}

/// Executes invocations.
pub trait ToolRunner {
    /// Run `invocation` in `working_dir`, streaming output to `sink`.
    ///
    /// Returns the full captured output on success.
    fn run(
        &self,
        invocation: Invocation<'_>,
        working_dir: &Path,
        sink: &dyn OutputSink,
    ) -> Result<String, ToolFailure>;
}

/// Runs invocations on the local system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn run_command(
        &self,
        cmd: &ToolCommand,
        working_dir: &Path,
        sink: &dyn OutputSink,
    ) -> Result<String, ToolFailure> {
        let failure =
            |exit_code, output| ToolFailure { exit_code, command: cmd.to_string(), output };

        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failure(None, e.to_string()))?;

        // Both pipes feed one channel so lines reach the sink as they arrive
        let (tx, rx) = mpsc::channel();
        let readers: Vec<_> = [
            child.stdout.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
            child.stderr.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
        ]
        .into_iter()
        .flatten()
        .map(|pipe| {
            let tx = tx.clone();
            thread::spawn(move || forward_lines(pipe, tx))
        })
        .collect();
        drop(tx);

        let mut output = String::new();
        for line in rx {
            sink.line(line.trim_end_matches(['\n', '\r']));
            output.push_str(&line);
        }
        for reader in readers {
            let _ = reader.join();
        }

        let status = child.wait().map_err(|e| failure(None, e.to_string()))?;
        if status.success() {
            Ok(output)
        } else {
            Err(failure(status.code(), output))
        }
    }

    fn run_library(
        &self,
        operation: String,
        call: LibraryCall<'_>,
        working_dir: &Path,
        sink: &dyn OutputSink,
    ) -> Result<String, ToolFailure> {
        let result = {
            let _cwd = ScopedWorkingDir::enter(working_dir).map_err(|e| ToolFailure {
                exit_code: None,
                command: operation.clone(),
                output: format!("cannot enter {}: {}", working_dir.display(), e),
            })?;
            call()
        };

        let text = match &result {
            Ok(text) | Err(text) => text,
        };
        for line in text.lines() {
            sink.line(line);
        }

        result.map_err(|output| ToolFailure { exit_code: None, command: operation, output })
    }
}

impl ToolRunner for SystemRunner {
    fn run(
        &self,
        invocation: Invocation<'_>,
        working_dir: &Path,
        sink: &dyn OutputSink,
    ) -> Result<String, ToolFailure> {
        match invocation {
            Invocation::Command(cmd) => self.run_command(&cmd, working_dir, sink),
            Invocation::Library { operation, call } => {
                self.run_library(operation, call, working_dir, sink)
            }
        }
    }
}

/// Read a pipe to the end, sending each line (newline included).
///
/// A read error ends the stream with one line naming it.
fn forward_lines(pipe: Box<dyn Read + Send>, tx: mpsc::Sender<String>) {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Err(e) => {
                let _ = tx.send(format!("groundwork: output truncated: {}\n", e));
                break;
            }
            Ok(_) => {
                if tx.send(String::from_utf8_lossy(&buf).into_owned()).is_err() {
                    break;
                }
            }
        }
    }
}

/// Serializes process working-directory changes.
static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Process working directory switched for the guard's lifetime.
///
/// Library calls cannot be given a working directory, so this swaps the
/// process-wide one and restores it on drop, including during unwinding.
/// Holding the lock keeps two switch windows from overlapping.
pub struct ScopedWorkingDir {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedWorkingDir {
    /// Switch to `dir` until the guard is dropped.
    pub fn enter(dir: &Path) -> io::Result<Self> {
        let lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        Ok(Self { previous, _lock: lock })
    }
}

impl Drop for ScopedWorkingDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}
