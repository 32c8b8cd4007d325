//! SASS build orchestrator.

use std::fs;
use std::path::PathBuf;

use super::context::BuildContext;
use super::error::BuildError;
use super::result::{AssetKind, BuildOutputs};
use super::{component_names, ensure_output_dirs, SYSTEM_RUNNER};
use crate::assets::{import_source, sass_import_list};
use crate::config::SassCompilerKind;
use crate::output::{field, OutputSink};
use crate::tool::{GrassCompiler, OutputStyle, SassCompiler, SasscCompiler, ToolRunner};

/// Name of the synthesized import-only source.
const SOURCE_FILE_NAME: &str = "groundwork.scss";

/// Construct the compiler selected in `[sass]`.
pub fn configured_compiler(
    context: &BuildContext,
) -> Result<Box<dyn SassCompiler + 'static>, BuildError> {
    let sass = &context.config().sass;
    match sass.compiler {
        SassCompilerKind::Grass => Ok(Box::new(GrassCompiler::new())),
        SassCompilerKind::Sassc => {
            let executable = &sass.sassc_executable;
            if executable.as_os_str().is_empty() {
                return Err(BuildError::MissingCapability {
                    capability: "sass compiler",
                    reason: "sass.sassc_executable is not set".to_string(),
                });
            }
            // Bare names are looked up on PATH
            let executable = if executable.components().count() > 1 {
                context.resolve_path(executable)
            } else {
                executable.clone()
            };
            Ok(Box::new(SasscCompiler::new(executable)))
        }
    }
}

/// Compiles the selected components into expanded and compressed CSS.
pub struct SassBuild<'a> {
    context: &'a BuildContext,
    compiler: Box<dyn SassCompiler + 'a>,
    runner: &'a dyn ToolRunner,
}

impl<'a> SassBuild<'a> {
    /// Build with the configured compiler and the system runner.
    pub fn from_context(context: &'a BuildContext) -> Result<Self, BuildError> {
        Ok(Self { context, compiler: configured_compiler(context)?, runner: &SYSTEM_RUNNER })
    }

    pub fn with_compiler(mut self, compiler: Box<dyn SassCompiler + 'a>) -> Self {
        self.compiler = compiler;
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
    /// Components are resolved before any tool runs. A failure in the
    /// expanded stage skips the compressed stage.
    pub fn run(&self, sink: &dyn OutputSink) -> Result<BuildOutputs, BuildError> {
        let ctx = self.context;
        let components = ctx.resolve_components()?;
        let sass = &ctx.config().sass;
        let imports = sass_import_list(&sass.settings, &components, &sass.app);
        let outputs = ctx.outputs(AssetKind::Sass);
        let include_paths = ctx.sass_include_paths();

        field(sink, "From", ctx.foundation_sass_root().display());
        field(sink, "Settings", &sass.settings);
        field(sink, "App", &sass.app);
        field(sink, "Components", component_names(&components));
        if ctx.is_verbose() {
            field(sink, "Compiler", self.compiler.name());
            for path in &include_paths {
                field(sink, "Include", path.display());
            }
        }

        ensure_output_dirs(&outputs)?;

        // Compilers search the importing file's directory first, so the
        // source gets a directory of its own
        let scratch = tempfile::Builder::new()
            .prefix("groundwork-")
            .tempdir()
            .map_err(|e| BuildError::io(std::env::temp_dir(), e))?;
        let source_path: PathBuf = scratch.path().join(SOURCE_FILE_NAME);
        fs::write(&source_path, import_source(&imports))
            .map_err(|e| BuildError::io(&source_path, e))?;

        let root = ctx.project_root();
        let expanded = self.compiler.compile(
            &source_path,
            &outputs.output,
            &include_paths,
            OutputStyle::Expanded,
        );
        self.runner.run(expanded, root, sink)?;
        self.runner.run(
            self.compiler.compile(
                &outputs.output,
                &outputs.min_output,
                &include_paths,
                OutputStyle::Compressed,
            ),
            root,
            sink,
        )?;

        field(sink, "Output", outputs.output.display());
        field(sink, "Min Output", outputs.min_output.display());
        sink.line("Done");
        Ok(outputs)
    }
}
