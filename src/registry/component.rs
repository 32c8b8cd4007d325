//! Component definitions and per-flavor path resolution.

use serde::Serialize;
use std::path::PathBuf;

/// Namespace every framework SASS partial lives under.
pub const SASS_NAMESPACE: &str = "foundation/components";

/// Install roots that JS module names are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoots {
    /// Directory holding `foundation.js` and `foundation.<name>.js`
    pub foundation_js: PathBuf,
    /// Directory holding third-party vendor scripts
    pub vendor_js: PathBuf,
}

impl AssetRoots {
    /// Create roots from the framework and vendor script directories.
    pub fn new(foundation_js: impl Into<PathBuf>, vendor_js: impl Into<PathBuf>) -> Self {
        Self { foundation_js: foundation_js.into(), vendor_js: vendor_js.into() }
    }
}

/// Path-resolution strategy, fixed when a component is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Third-party library: `<vendor>/<name>.js`, SASS names passed through
    Vendor,
    /// Framework core: `<foundation>/<name>.js`, namespaced SASS
    Core,
    /// Framework widget: `<foundation>/foundation.<name>.js`, namespaced SASS
    Framework,
}

impl Flavor {
    /// Resolve one logical JS module name to a file path.
    pub fn js_path(self, roots: &AssetRoots, name: &str) -> PathBuf {
        match self {
            Flavor::Vendor => roots.vendor_js.join(format!("{}.js", name)),
            Flavor::Core => roots.foundation_js.join(format!("{}.js", name)),
            Flavor::Framework => roots.foundation_js.join(format!("foundation.{}.js", name)),
        }
    }

    /// Resolve one SASS partial name to an `@import` identifier.
    pub fn sass_import(self, name: &str) -> String {
        match self {
            Flavor::Vendor => name.to_string(),
            Flavor::Core | Flavor::Framework => format!("{}/{}", SASS_NAMESPACE, name),
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flavor::Vendor => write!(f, "vendor"),
            Flavor::Core => write!(f, "core"),
            Flavor::Framework => write!(f, "framework"),
        }
    }
}

/// A named pairing of JS modules and SASS partials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    name: String,
    js: Vec<String>,
    sass: Vec<String>,
    default: bool,
    flavor: Flavor,
}

impl Component {
    fn new(name: impl Into<String>, flavor: Flavor) -> Self {
        Self { name: name.into(), js: vec![], sass: vec![], default: true, flavor }
    }

    /// A third-party library component.
    pub fn vendor(name: impl Into<String>) -> Self {
        Self::new(name, Flavor::Vendor)
    }

    /// The framework core component.
    pub fn core(name: impl Into<String>) -> Self {
        Self::new(name, Flavor::Core)
    }

    /// A framework widget component.
    pub fn framework(name: impl Into<String>) -> Self {
        Self::new(name, Flavor::Framework)
    }

    /// Set the ordered JS module names.
    pub fn with_js<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.js = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ordered SASS partial names.
    pub fn with_sass<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sass = names.into_iter().map(Into::into).collect();
        self
    }

    /// Exclude this component from the `all` group.
    pub fn optional(mut self) -> Self {
        self.default = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn js(&self) -> &[String] {
        &self.js
    }

    pub fn sass(&self) -> &[String] {
        &self.sass
    }

    /// Whether the component is part of the `all` group.
    pub fn is_default(&self) -> bool {
        self.default
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Whether the component ships any script.
    pub fn has_js(&self) -> bool {
        !self.js.is_empty()
    }

    /// JS file paths in declaration order.
    pub fn js_files(&self, roots: &AssetRoots) -> Vec<PathBuf> {
        self.js.iter().map(|name| self.flavor.js_path(roots, name)).collect()
    }

    /// SASS import identifiers in declaration order.
    pub fn sass_imports(&self) -> Vec<String> {
        self.sass.iter().map(|name| self.flavor.sass_import(name)).collect()
    }
}
