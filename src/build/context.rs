//! Build context containing configuration and state for a build.

use std::path::{Path, PathBuf};

use super::result::{AssetKind, BuildOutputs};
use crate::config::GroundworkConfig;
use crate::registry::{AssetRoots, Component, ComponentRegistry};
use crate::resolve::{resolve_components, ConfigurationError};

/// Build context containing configuration and paths for a build operation.
///
/// The context provides access to all information needed to execute a build,
/// including the configuration, project root, and the component registry.
/// It is read-only: every build resolves components and paths afresh from it.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: GroundworkConfig,
    /// Project root directory (where groundwork.toml is located)
    project_root: PathBuf,
    /// Components available for selection
    registry: ComponentRegistry,
    /// Whether to run in verbose mode
    verbose: bool,
}

impl BuildContext {
    /// Create a context over the Foundation registry.
    ///
    /// # Arguments
    /// - `config` - The loaded configuration
    /// - `project_root` - The project root directory
    pub fn new(config: GroundworkConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, registry: ComponentRegistry::foundation(), verbose: false }
    }

    /// Replace the component registry.
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &GroundworkConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Whether verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Resolve a path relative to the project root.
    ///
    /// If the path is absolute, returns it unchanged.
    /// If relative, joins it with the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        crate::config::resolve_path(&self.project_root, path)
    }

    /// Resolve the configured selection against the registry.
    pub fn resolve_components(&self) -> Result<Vec<&Component>, ConfigurationError> {
        resolve_components(&self.registry, &self.config.components)
    }

    /// Script roots for vendor and framework components.
    pub fn asset_roots(&self) -> AssetRoots {
        AssetRoots::new(
            self.resolve_path(&self.config.foundation_js_path),
            self.resolve_path(&self.config.vendor_js_path),
        )
    }

    pub fn foundation_sass_root(&self) -> PathBuf {
        self.resolve_path(&self.config.foundation_sass_path)
    }

    /// SASS search list: include paths, extra include paths, then the
    /// framework SASS root.
    pub fn sass_include_paths(&self) -> Vec<PathBuf> {
        let sass = &self.config.sass;
        sass.include_paths
            .iter()
            .chain(&sass.extra_include_paths)
            .map(|p| self.resolve_path(p))
            .chain(std::iter::once(self.foundation_sass_root()))
            .collect()
    }

    /// Directories whose changes trigger a rebuild of `kind`.
    pub fn source_roots(&self, kind: AssetKind) -> Vec<PathBuf> {
        match kind {
            AssetKind::Sass => self.sass_include_paths(),
            AssetKind::Js => {
                let roots = self.asset_roots();
                vec![roots.foundation_js, roots.vendor_js]
            }
        }
    }

    /// File-name patterns that select relevant changes for `kind`.
    pub fn watch_patterns(&self, kind: AssetKind) -> &[String] {
        match kind {
            AssetKind::Sass => &self.config.watch.sass_patterns,
            AssetKind::Js => &self.config.watch.js_patterns,
        }
    }

    /// Get the artifact root (resolved to absolute path).
    pub fn output_root(&self) -> PathBuf {
        self.resolve_path(&self.config.output_root)
    }

    /// The two artifact paths of `kind`, resolved against the output root.
    pub fn outputs(&self, kind: AssetKind) -> BuildOutputs {
        let (output, min_output) = match kind {
            AssetKind::Sass => (&self.config.sass.output, &self.config.sass.min_output),
            AssetKind::Js => (&self.config.js.output, &self.config.js.min_output),
        };
        let root = self.output_root();
        BuildOutputs::new(
            crate::config::resolve_path(&root, output),
            crate::config::resolve_path(&root, min_output),
        )
    }
}
