//! Build command implementations (sass, js, build, watch)

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::build::{AssetKind, BuildContext, BuildPipeline, BuildReport};
use crate::output::OutputSink;
use crate::watch::Watch;

fn exit_code(success: bool) -> ExitCode {
    ExitCode::from(if success { EXIT_SUCCESS } else { EXIT_ERROR })
}

/// Run the sass command
pub fn run_sass(context: &BuildContext, sink: &dyn OutputSink) -> ExitCode {
    exit_code(BuildPipeline::new(context).build_kind(AssetKind::Sass, sink).is_ok())
}

/// Run the js command
pub fn run_js(context: &BuildContext, sink: &dyn OutputSink) -> ExitCode {
    exit_code(BuildPipeline::new(context).build_kind(AssetKind::Js, sink).is_ok())
}

/// Write one summary line per asset kind.
fn print_summary(report: &BuildReport, sink: &dyn OutputSink) {
    for kind in AssetKind::ALL {
        let status = match report.get(kind) {
            Ok(_) => "ok",
            Err(_) => "failed",
        };
        sink.line(&format!("{} {}", kind.tag(), status));
    }
}

/// Run the build command
pub fn run_build(context: &BuildContext, sink: &dyn OutputSink) -> ExitCode {
    let report = BuildPipeline::new(context).run(sink);
    print_summary(&report, sink);
    exit_code(report.is_success())
}

/// Run the watch command
///
/// Builds both kinds once, then watches until Ctrl+C. Failures of the
/// initial build are reported and do not prevent watching.
pub fn run_watch(context: &BuildContext, sink: &dyn OutputSink) -> ExitCode {
    let report = BuildPipeline::new(context).run(sink);
    print_summary(&report, sink);

    let mut watch = match Watch::for_context(context) {
        Ok(watch) => watch,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let interrupter = watch.interrupter();
    if let Err(e) = ctrlc::set_handler(move || interrupter.interrupt()) {
        eprintln!("Error: cannot install Ctrl+C handler: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    sink.line("Press Ctrl+C to stop");
    match watch.run(sink) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Watch error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
