//! Groundwork - command-line tool for building Foundation CSS and JS bundles

use std::process::ExitCode;

use groundwork::cli;

fn main() -> ExitCode {
    cli::run()
}
