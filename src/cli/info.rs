//! Info command implementation

use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::assets::{sass_import_list, AssetList};
use crate::build::{
    configured_compiler, configured_minifier, AssetKind, BuildContext, BuildOutputs,
};
use crate::output::{field, OutputSink};
use crate::resolve::ConfigurationError;

/// Everything a build would use, without running any tool.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub project_root: PathBuf,
    pub components: Vec<String>,
    pub foundation_js_path: PathBuf,
    pub foundation_sass_path: PathBuf,
    pub vendor_js_path: PathBuf,
    pub sass_settings: String,
    pub sass_app: String,
    pub sass_compiler: Option<String>,
    pub js_minifier: Option<String>,
    pub include_paths: Vec<PathBuf>,
    /// Settings, component partials, app
    pub sass_imports: Vec<String>,
    pub js_files: Vec<PathBuf>,
    pub sass_outputs: BuildOutputs,
    pub js_outputs: BuildOutputs,
}

impl InfoReport {
    /// Collect the report for `context`.
    ///
    /// A compiler or minifier that cannot be constructed is reported as
    /// `None` rather than failing the report.
    pub fn collect(context: &BuildContext) -> Result<Self, ConfigurationError> {
        let components = context.resolve_components()?;
        let config = context.config();
        let roots = context.asset_roots();
        let assets = AssetList::from_components(&components, &roots);

        Ok(Self {
            project_root: context.project_root().to_path_buf(),
            components: components.iter().map(|c| c.name().to_string()).collect(),
            foundation_js_path: roots.foundation_js.clone(),
            foundation_sass_path: context.foundation_sass_root(),
            vendor_js_path: roots.vendor_js.clone(),
            sass_settings: config.sass.settings.clone(),
            sass_app: config.sass.app.clone(),
            sass_compiler: configured_compiler(context).ok().map(|c| c.name().to_string()),
            js_minifier: configured_minifier(context).ok().map(|m| m.name().to_string()),
            include_paths: context.sass_include_paths(),
            sass_imports: sass_import_list(&config.sass.settings, &components, &config.sass.app),
            js_files: assets.js_files,
            sass_outputs: context.outputs(AssetKind::Sass),
            js_outputs: context.outputs(AssetKind::Js),
        })
    }

    /// Write the report as aligned text lines.
    pub fn write_to(&self, sink: &dyn OutputSink) {
        let unavailable = || "unavailable".to_string();

        field(sink, "Project", self.project_root.display());
        field(sink, "Components", self.components.join(", "));
        field(sink, "Settings", &self.sass_settings);
        field(sink, "App", &self.sass_app);
        field(sink, "SASS From", self.foundation_sass_path.display());
        field(sink, "JS From", self.foundation_js_path.display());
        field(sink, "Vendor", self.vendor_js_path.display());
        field(sink, "Compiler", self.sass_compiler.clone().unwrap_or_else(unavailable));
        field(sink, "Minifier", self.js_minifier.clone().unwrap_or_else(unavailable));

        sink.line("Include paths:");
        for path in &self.include_paths {
            sink.line(&format!("  {}", path.display()));
        }
        sink.line("SASS imports:");
        for import in &self.sass_imports {
            sink.line(&format!("  {}", import));
        }
        sink.line("JS files:");
        for file in &self.js_files {
            sink.line(&format!("  {}", file.display()));
        }

        field(sink, "CSS", self.sass_outputs.output.display());
        field(sink, "CSS Min", self.sass_outputs.min_output.display());
        field(sink, "JS", self.js_outputs.output.display());
        field(sink, "JS Min", self.js_outputs.min_output.display());
    }
}

/// Run the info command
pub fn run_info(context: &BuildContext, sink: &dyn OutputSink, json: bool) -> ExitCode {
    let report = match InfoReport::collect(context) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        report.write_to(sink);
    }

    ExitCode::from(EXIT_SUCCESS)
}
