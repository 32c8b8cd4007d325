//! Combined build: SASS then JS.
//!
//! Each kind is constructed and run independently, so a broken SASS setup
//! still lets the scripts build and both outcomes are reported.

use super::context::BuildContext;
use super::error::BuildError;
use super::js::JsBuild;
use super::result::{AssetKind, BuildOutputs, BuildReport};
use super::sass::SassBuild;
use super::SYSTEM_RUNNER;
use crate::output::OutputSink;
use crate::tool::ToolRunner;

/// Runs both orchestrators over one context.
pub struct BuildPipeline<'a> {
    context: &'a BuildContext,
    runner: &'a dyn ToolRunner,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context, runner: &SYSTEM_RUNNER }
    }

    pub fn with_runner(mut self, runner: &'a dyn ToolRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Build one kind, reporting any failure to `sink`.
    pub fn build_kind(
        &self,
        kind: AssetKind,
        sink: &dyn OutputSink,
    ) -> Result<BuildOutputs, BuildError> {
        sink.line(kind.tag());
        let result = match kind {
            AssetKind::Sass => SassBuild::from_context(self.context)
                .and_then(|build| build.with_runner(self.runner).run(sink)),
            AssetKind::Js => JsBuild::from_context(self.context)
                .and_then(|build| build.with_runner(self.runner).run(sink)),
        };
        if let Err(err) = &result {
            err.report(sink);
        }
        result
    }

    /// Build SASS then JS; neither outcome suppresses the other.
    pub fn run(&self, sink: &dyn OutputSink) -> BuildReport {
        let sass = self.build_kind(AssetKind::Sass, sink);
        let js = self.build_kind(AssetKind::Js, sink);
        BuildReport { sass, js }
    }
}
