//! Configuration loading and discovery for `groundwork.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{ComponentSelection, GroundworkConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "groundwork.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse groundwork.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the component selection
    pub components: Option<ComponentSelection>,
    /// Override the artifact output root
    pub output_root: Option<PathBuf>,
}

/// Find groundwork.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a groundwork.toml file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find groundwork.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a groundwork.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// // Load from discovered config
/// let config = load_config(None)?;
///
/// // Load from specific path
/// let config = load_config(Some(Path::new("site/groundwork.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<GroundworkConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<GroundworkConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GroundworkConfig = toml::from_str(&contents)?;
    check(&config)?;
    Ok(config)
}

fn check(config: &GroundworkConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Configuration used when no groundwork.toml is found.
pub fn default_config() -> GroundworkConfig {
    GroundworkConfig::default()
}

/// Merge CLI overrides into a configuration and re-validate it.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(
    config: &mut GroundworkConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref components) = overrides.components {
        config.components = components.clone();
    }

    if let Some(ref output_root) = overrides.output_root {
        config.output_root = output_root.clone();
    }

    check(config)
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the groundwork.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"components = \"all\"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"components = \"all\"");

        let subdir = temp.path().join("scss").join("partials");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
components = "foundation_only"
output_root = "public"

[sass]
app = "site"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.components, ComponentSelection::Group("foundation_only".to_string()));
        assert_eq!(config.output_root, PathBuf::from("public"));
        assert_eq!(config.sass.app, "site");
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("nonexistent.toml");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[sass]\napp = \"\"\nsettings = \"\"\n");

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides_components() {
        let mut config = default_config();
        let overrides = CliOverrides {
            components: Some(ComponentSelection::List(vec!["grid".to_string()])),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides).expect("overrides should validate");
        assert_eq!(config.components, ComponentSelection::List(vec!["grid".to_string()]));
    }

    #[test]
    fn test_merge_cli_overrides_output_root() {
        let mut config = default_config();
        let overrides =
            CliOverrides { output_root: Some(PathBuf::from("dist")), ..Default::default() };

        merge_cli_overrides(&mut config, &overrides).expect("overrides should validate");
        assert_eq!(config.output_root, PathBuf::from("dist"));
    }

    #[test]
    fn test_merge_cli_overrides_empty_group_rejected() {
        let mut config = default_config();
        let overrides = CliOverrides {
            components: Some(ComponentSelection::Group(String::new())),
            ..Default::default()
        };

        let result = merge_cli_overrides(&mut config, &overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_resolve_path_absolute() {
        let root = Path::new("/project");
        let absolute = Path::new("/other/path");
        assert_eq!(resolve_path(root, absolute), PathBuf::from("/other/path"));
    }

    #[test]
    fn test_resolve_path_relative() {
        let root = Path::new("/project");
        let relative = Path::new("libs/foundation/scss");
        assert_eq!(resolve_path(root, relative), PathBuf::from("/project/libs/foundation/scss"));
    }

    #[test]
    fn test_project_root() {
        let config_path = Path::new("/project/groundwork.toml");
        assert_eq!(project_root(config_path), Some(Path::new("/project")));
    }
}
