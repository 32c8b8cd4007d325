//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod info;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::build::BuildContext;
use crate::config::loader::{find_config, load_config, merge_cli_overrides, project_root};
use crate::config::{CliOverrides, ComponentSelection};
use crate::output::ConsoleSink;
use crate::registry::{ComponentRegistry, ALL};

pub use info::InfoReport;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Groundwork - build Zurb Foundation CSS and JS bundles
#[derive(Parser)]
#[command(name = "groundwork")]
#[command(about = "Groundwork - compile selected Foundation components into CSS and JS bundles")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Path to groundwork.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Components to build: "all", a group name, or a comma-separated list
    #[arg(long, global = true)]
    pub components: Option<String>,

    /// Directory the artifact paths are relative to
    #[arg(long, global = true)]
    pub output_root: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show compiler, include paths and script list
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile SASS into expanded and compressed CSS
    Sass,
    /// Concatenate and minify the component scripts
    Js,
    /// Build SASS then JS, reporting both outcomes
    Build,
    /// Build both kinds, then rebuild on source changes until Ctrl+C
    Watch,
    /// Show active settings, resolved components and asset lists
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Interpret a `--components` value.
///
/// A comma-separated value is a component list. A single value is a group
/// when the registry knows a group by that name, otherwise a one-element list.
pub fn parse_selection(value: &str, registry: &ComponentRegistry) -> ComponentSelection {
    let value = value.trim();
    if value.contains(',') {
        let names = value.split(',').map(str::trim).filter(|s| !s.is_empty());
        return ComponentSelection::List(names.map(String::from).collect());
    }
    if value == ALL || registry.group(value).is_some() {
        ComponentSelection::Group(value.to_string())
    } else {
        ComponentSelection::List(vec![value.to_string()])
    }
}

/// Load configuration, apply overrides and build the context.
fn load_context(args: &GlobalArgs) -> Result<BuildContext, ExitCode> {
    let cwd = std::env::current_dir().unwrap_or_default();

    let config_path = match &args.config {
        Some(path) if !path.is_file() => {
            eprintln!("Error: config file not found: {}", path.display());
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
        Some(path) => Some(path.clone()),
        None => find_config(),
    };
    if args.verbose {
        match &config_path {
            Some(path) => println!("Using config: {}", path.display()),
            None => println!("No groundwork.toml found, using defaults"),
        }
    }

    let mut config = load_config(config_path.as_deref()).map_err(|e| {
        eprintln!("Error loading config: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;

    let root = config_path
        .as_deref()
        .and_then(project_root)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.clone());
    let root = root.canonicalize().unwrap_or(root);

    let registry = ComponentRegistry::foundation();
    let overrides = CliOverrides {
        components: args.components.as_deref().map(|v| parse_selection(v, &registry)),
        output_root: args.output_root.as_ref().map(|p| crate::config::resolve_path(&cwd, p)),
    };
    merge_cli_overrides(&mut config, &overrides).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;

    Ok(BuildContext::new(config, root).with_registry(registry).with_verbose(args.verbose))
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let context = match load_context(&cli.global) {
        Ok(context) => context,
        Err(code) => return code,
    };
    let sink = ConsoleSink::new().with_colors(!cli.global.no_color);

    match cli.command {
        Commands::Sass => build::run_sass(&context, &sink),
        Commands::Js => build::run_js(&context, &sink),
        Commands::Build => build::run_build(&context, &sink),
        Commands::Watch => build::run_watch(&context, &sink),
        Commands::Info { json } => info::run_info(&context, &sink, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NO_JS;

    #[test]
    fn test_parse_selection_group() {
        let registry = ComponentRegistry::foundation();
        assert_eq!(parse_selection("all", &registry), ComponentSelection::Group(ALL.into()));
        assert_eq!(parse_selection(NO_JS, &registry), ComponentSelection::Group(NO_JS.into()));
    }

    #[test]
    fn test_parse_selection_list() {
        let registry = ComponentRegistry::foundation();
        assert_eq!(
            parse_selection("tabs, grid,", &registry),
            ComponentSelection::List(vec!["tabs".into(), "grid".into()])
        );
        assert_eq!(
            parse_selection("reveal", &registry),
            ComponentSelection::List(vec!["reveal".into()])
        );
    }

    #[test]
    fn test_cli_parses_global_flags_after_command() {
        let cli = Cli::try_parse_from([
            "groundwork",
            "build",
            "--components",
            "grid,buttons",
            "--no-color",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Build));
        assert_eq!(cli.global.components.as_deref(), Some("grid,buttons"));
        assert!(cli.global.no_color);
    }

    #[test]
    fn test_cli_info_json() {
        let cli = Cli::try_parse_from(["groundwork", "info", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Info { json: true }));
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["groundwork", "deploy"]).is_err());
    }

    #[test]
    fn test_missing_config_is_invalid_args() {
        let args = GlobalArgs {
            config: Some(PathBuf::from("/nonexistent/groundwork.toml")),
            ..Default::default()
        };
        assert!(load_context(&args).is_err());
    }

    #[test]
    fn test_load_context_from_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("groundwork.toml");
        std::fs::write(&config_path, "components = \"no_js\"\n").unwrap();
        let args = GlobalArgs {
            config: Some(config_path),
            components: Some("grid,tabs".to_string()),
            ..Default::default()
        };

        let context = load_context(&args).ok().unwrap();
        assert_eq!(context.project_root(), temp.path().canonicalize().unwrap());
        assert_eq!(
            context.config().components,
            ComponentSelection::List(vec!["grid".into(), "tabs".into()])
        );
    }
}
