//! Configuration schema types for `groundwork.toml`
//!
//! Defines the structure and validation rules for a groundwork project.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::registry::ALL;

/// Which components a build should include.
///
/// A string is either `"all"` or a shortcut-group name; an array names
/// components explicitly. Output order always follows the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentSelection {
    /// `"all"` or a shortcut-group name
    Group(String),
    /// Explicit component names (order is not significant)
    List(Vec<String>),
}

impl Default for ComponentSelection {
    fn default() -> Self {
        Self::Group(ALL.to_string())
    }
}

impl std::fmt::Display for ComponentSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentSelection::Group(name) => write!(f, "{}", name),
            ComponentSelection::List(names) => write!(f, "[{}]", names.join(", ")),
        }
    }
}

/// SASS compiler implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SassCompilerKind {
    /// In-process compiler
    #[default]
    Grass,
    /// External `sassc` executable
    Sassc,
}

/// JS minifier selection: `"builtin"` or a command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinifierConfig {
    /// Named minifier, only `"builtin"` is recognized
    Named(String),
    /// External command; input path and `-o <output>` are appended
    Command(Vec<String>),
}

impl Default for MinifierConfig {
    fn default() -> Self {
        Self::Named(BUILTIN_MINIFIER.to_string())
    }
}

/// Name of the in-process minifier.
pub const BUILTIN_MINIFIER: &str = "builtin";

/// `[sass]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SassConfig {
    /// Application entry-point partial, imported last
    #[serde(default = "default_sass_app")]
    pub app: String,
    /// Settings partial, imported first
    #[serde(default = "default_sass_settings")]
    pub settings: String,
    /// Search paths for `@import`
    #[serde(default = "default_include_paths")]
    pub include_paths: Vec<PathBuf>,
    /// Project-specific search paths, searched after `include_paths`
    #[serde(default)]
    pub extra_include_paths: Vec<PathBuf>,
    /// Compiler implementation
    #[serde(default)]
    pub compiler: SassCompilerKind,
    /// Executable used when `compiler = "sassc"`
    #[serde(default = "default_sassc_executable")]
    pub sassc_executable: PathBuf,
    /// Expanded CSS output, relative to `output_root`
    #[serde(default = "default_sass_output")]
    pub output: PathBuf,
    /// Compressed CSS output, relative to `output_root`
    #[serde(default = "default_sass_min_output")]
    pub min_output: PathBuf,
}

impl Default for SassConfig {
    fn default() -> Self {
        Self {
            app: default_sass_app(),
            settings: default_sass_settings(),
            include_paths: default_include_paths(),
            extra_include_paths: vec![],
            compiler: SassCompilerKind::default(),
            sassc_executable: default_sassc_executable(),
            output: default_sass_output(),
            min_output: default_sass_min_output(),
        }
    }
}

fn default_sass_app() -> String {
    "default_app".to_string()
}

fn default_sass_settings() -> String {
    "default_settings".to_string()
}

fn default_include_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("scss"), PathBuf::from("libs/foundation-icon-fonts")]
}

fn default_sassc_executable() -> PathBuf {
    PathBuf::from("sassc")
}

fn default_sass_output() -> PathBuf {
    PathBuf::from("groundwork/css/foundation.css")
}

fn default_sass_min_output() -> PathBuf {
    PathBuf::from("groundwork/css/foundation.min.css")
}

/// `[js]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsConfig {
    /// Concatenated script output, relative to `output_root`
    #[serde(default = "default_js_output")]
    pub output: PathBuf,
    /// Minified script output, relative to `output_root`
    #[serde(default = "default_js_min_output")]
    pub min_output: PathBuf,
    /// Minifier selection
    #[serde(default)]
    pub minifier: MinifierConfig,
}

impl Default for JsConfig {
    fn default() -> Self {
        Self {
            output: default_js_output(),
            min_output: default_js_min_output(),
            minifier: MinifierConfig::default(),
        }
    }
}

fn default_js_output() -> PathBuf {
    PathBuf::from("groundwork/js/foundation.js")
}

fn default_js_min_output() -> PathBuf {
    PathBuf::from("groundwork/js/foundation.min.js")
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// File-name patterns that trigger a SASS rebuild
    #[serde(default = "default_sass_patterns")]
    pub sass_patterns: Vec<String>,
    /// File-name patterns that trigger a JS rebuild
    #[serde(default = "default_js_patterns")]
    pub js_patterns: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { sass_patterns: default_sass_patterns(), js_patterns: default_js_patterns() }
    }
}

fn default_sass_patterns() -> Vec<String> {
    vec!["*.scss".to_string(), "*.sass".to_string()]
}

fn default_js_patterns() -> Vec<String> {
    vec!["*.js".to_string()]
}

/// Complete `groundwork.toml` configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundworkConfig {
    /// Components to build
    #[serde(default)]
    pub components: ComponentSelection,
    /// Foundation script directory
    #[serde(default = "default_foundation_js_path")]
    pub foundation_js_path: PathBuf,
    /// Foundation SCSS directory, always searched last
    #[serde(default = "default_foundation_sass_path")]
    pub foundation_sass_path: PathBuf,
    /// Vendor script directory
    #[serde(default = "default_vendor_js_path")]
    pub vendor_js_path: PathBuf,
    /// Root that the four artifact paths are relative to
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// SASS build settings
    #[serde(default)]
    pub sass: SassConfig,
    /// JS build settings
    #[serde(default)]
    pub js: JsConfig,
    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Default for GroundworkConfig {
    fn default() -> Self {
        Self {
            components: ComponentSelection::default(),
            foundation_js_path: default_foundation_js_path(),
            foundation_sass_path: default_foundation_sass_path(),
            vendor_js_path: default_vendor_js_path(),
            output_root: default_output_root(),
            sass: SassConfig::default(),
            js: JsConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

fn default_foundation_js_path() -> PathBuf {
    PathBuf::from("libs/foundation/js/foundation")
}

fn default_foundation_sass_path() -> PathBuf {
    PathBuf::from("libs/foundation/scss")
}

fn default_vendor_js_path() -> PathBuf {
    PathBuf::from("libs/foundation/js/vendor")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("static")
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "sass.app")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "groundwork.toml: '{}' {}", self.field, self.message)
    }
}

impl GroundworkConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: &str| {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        if let ComponentSelection::Group(name) = &self.components {
            if name.is_empty() {
                push("components", "must name a group or list components");
            }
        }

        if self.sass.app.is_empty() {
            push("sass.app", "must be a non-empty string");
        }
        if self.sass.settings.is_empty() {
            push("sass.settings", "must be a non-empty string");
        }
        if self.sass.compiler == SassCompilerKind::Sassc
            && self.sass.sassc_executable.as_os_str().is_empty()
        {
            push("sass.sassc_executable", "is required when compiler = \"sassc\"");
        }

        for (field, path) in [
            ("sass.output", &self.sass.output),
            ("sass.min_output", &self.sass.min_output),
            ("js.output", &self.js.output),
            ("js.min_output", &self.js.min_output),
        ] {
            if path.as_os_str().is_empty() {
                push(field, "must be a non-empty path");
            }
        }

        match &self.js.minifier {
            MinifierConfig::Named(name) if name != BUILTIN_MINIFIER => {
                push("js.minifier", "must be \"builtin\" or a command array");
            }
            MinifierConfig::Command(cmd) if cmd.is_empty() => {
                push("js.minifier", "command must not be empty");
            }
            _ => {}
        }

        for (field, patterns) in [
            ("watch.sass_patterns", &self.watch.sass_patterns),
            ("watch.js_patterns", &self.watch.js_patterns),
        ] {
            if patterns.is_empty() {
                push(field, "must contain at least one glob pattern");
            }
            for pattern in patterns {
                if glob::Pattern::new(pattern).is_err() {
                    push(field, &format!("contains an invalid glob pattern '{}'", pattern));
                }
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
