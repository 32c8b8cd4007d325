//! Build result types.
//!
//! Contains types for representing the outcome of build operations.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::error::BuildError;

/// The two asset kinds a project builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Stylesheets compiled from SASS
    Sass,
    /// Concatenated scripts
    Js,
}

impl AssetKind {
    /// Both kinds, in build order.
    pub const ALL: [AssetKind; 2] = [AssetKind::Sass, AssetKind::Js];

    /// Bracketed tag used to prefix progress lines.
    pub fn tag(self) -> &'static str {
        match self {
            AssetKind::Sass => "[sass]",
            AssetKind::Js => "[js]",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Sass => write!(f, "sass"),
            AssetKind::Js => write!(f, "js"),
        }
    }
}

/// The two artifacts of one asset kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutputs {
    /// Expanded CSS or raw concatenated JS
    pub output: PathBuf,
    /// Compressed CSS or minified JS
    pub min_output: PathBuf,
}

impl BuildOutputs {
    pub fn new(output: PathBuf, min_output: PathBuf) -> Self {
        Self { output, min_output }
    }

    pub fn paths(&self) -> [&Path; 2] {
        [&self.output, &self.min_output]
    }
}

/// Outcome of a combined build. Each kind is fallible on its own.
#[derive(Debug)]
pub struct BuildReport {
    pub sass: Result<BuildOutputs, BuildError>,
    pub js: Result<BuildOutputs, BuildError>,
}

impl BuildReport {
    /// Check if both kinds built.
    pub fn is_success(&self) -> bool {
        self.sass.is_ok() && self.js.is_ok()
    }

    /// Outcome for one kind.
    pub fn get(&self, kind: AssetKind) -> &Result<BuildOutputs, BuildError> {
        match kind {
            AssetKind::Sass => &self.sass,
            AssetKind::Js => &self.js,
        }
    }

    /// Kinds that failed, in build order.
    pub fn failed_kinds(&self) -> Vec<AssetKind> {
        AssetKind::ALL.into_iter().filter(|kind| self.get(*kind).is_err()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolFailure;

    fn outputs(name: &str) -> BuildOutputs {
        BuildOutputs::new(
            PathBuf::from(format!("static/{}", name)),
            PathBuf::from(format!("static/{}.min", name)),
        )
    }

    #[test]
    fn test_asset_kind_display() {
        assert_eq!(AssetKind::Sass.to_string(), "sass");
        assert_eq!(AssetKind::Js.tag(), "[js]");
    }

    #[test]
    fn test_outputs_paths() {
        let out = outputs("app.css");
        assert_eq!(out.paths(), [Path::new("static/app.css"), Path::new("static/app.css.min")]);
    }

    #[test]
    fn test_report_failed_kinds() {
        let report = BuildReport {
            sass: Err(BuildError::Tool(ToolFailure {
                exit_code: Some(1),
                command: "sassc".to_string(),
                output: "boom".to_string(),
            })),
            js: Ok(outputs("app.js")),
        };
        assert!(!report.is_success());
        assert_eq!(report.failed_kinds(), vec![AssetKind::Sass]);
    }
}
