//! JS build orchestrator.

use std::fs;

use super::context::BuildContext;
use super::error::BuildError;
use super::result::{AssetKind, BuildOutputs};
use super::{component_names, ensure_output_dirs, SYSTEM_RUNNER};
use crate::assets::js_files;
use crate::config::{MinifierConfig, BUILTIN_MINIFIER};
use crate::output::{field, OutputSink};
use crate::tool::{BuiltinMinifier, CommandMinifier, JsMinifier, ToolRunner};

/// Construct the minifier selected in `[js]`.
pub fn configured_minifier(
    context: &BuildContext,
) -> Result<Box<dyn JsMinifier + 'static>, BuildError> {
    match &context.config().js.minifier {
        MinifierConfig::Named(name) if name == BUILTIN_MINIFIER => {
            Ok(Box::new(BuiltinMinifier::new()))
        }
        MinifierConfig::Named(name) => Err(BuildError::MissingCapability {
            capability: "js minifier",
            reason: format!("unknown minifier '{}'", name),
        }),
        MinifierConfig::Command(command) => CommandMinifier::from_command(command)
            .map(|m| Box::new(m) as Box<dyn JsMinifier>)
            .ok_or_else(|| BuildError::MissingCapability {
                capability: "js minifier",
                reason: "js.minifier command is empty".to_string(),
            }),
    }
}

/// Concatenates the selected scripts and minifies the result.
pub struct JsBuild<'a> {
    context: &'a BuildContext,
    minifier: Box<dyn JsMinifier + 'a>,
    runner: &'a dyn ToolRunner,
}

impl<'a> JsBuild<'a> {
    /// Build with the configured minifier and the system runner.
    pub fn from_context(context: &'a BuildContext) -> Result<Self, BuildError> {
        Ok(Self { context, minifier: configured_minifier(context)?, runner: &SYSTEM_RUNNER })
    }

    pub fn with_minifier(mut self, minifier: Box<dyn JsMinifier + 'a>) -> Self {
        self.minifier = minifier;
        self
    }

    pub fn with_runner(mut self, runner: &'a dyn ToolRunner) -> Self {
        self.runner = runner;
        self
    }

    pub fn context(&self) -> &BuildContext {
        self.context
    }

    /// Run the build, reporting progress to `sink`.
    ///
    /// The raw artifact is the byte-for-byte concatenation of every selected
    /// script in registry order. A missing script aborts before anything is
    /// written.
    pub fn run(&self, sink: &dyn OutputSink) -> Result<BuildOutputs, BuildError> {
        let ctx = self.context;
        let components = ctx.resolve_components()?;
        let roots = ctx.asset_roots();
        let files = js_files(&components, &roots);
        let outputs = ctx.outputs(AssetKind::Js);

        field(sink, "From", roots.foundation_js.display());
        field(sink, "Components", component_names(&components));
        if ctx.is_verbose() {
            field(sink, "Minifier", self.minifier.name());
            for file in &files {
                field(sink, "Script", file.display());
            }
        }

        ensure_output_dirs(&outputs)?;

        let mut blob = Vec::new();
        for file in &files {
            let bytes = fs::read(file).map_err(|e| BuildError::io(file, e))?;
            blob.extend_from_slice(&bytes);
        }
        fs::write(&outputs.output, &blob).map_err(|e| BuildError::io(&outputs.output, e))?;

        self.runner.run(
            self.minifier.minify(&outputs.output, &outputs.min_output),
            ctx.project_root(),
            sink,
        )?;

        field(sink, "Output", outputs.output.display());
        field(sink, "Min Output", outputs.min_output.display());
        sink.line("Done");
        Ok(outputs)
    }
}
