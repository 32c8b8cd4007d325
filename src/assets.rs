//! Asset list projection.
//!
//! Flattens resolved components into the ordered SASS import identifiers and
//! JS file paths a build consumes. Pure functions of their inputs: nothing is
//! cached between calls, so each build sees the current registry and paths.

use serde::Serialize;
use std::path::PathBuf;

use crate::registry::{AssetRoots, Component};

/// Ordered SASS imports and JS files for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetList {
    /// `@import` identifiers, component by component
    pub sass_imports: Vec<String>,
    /// Script paths, component by component
    pub js_files: Vec<PathBuf>,
}

impl AssetList {
    /// Project components (already in registry order) into both lists.
    pub fn from_components(components: &[&Component], roots: &AssetRoots) -> Self {
        Self { sass_imports: sass_imports(components), js_files: js_files(components, roots) }
    }
}

/// Concatenate each component's SASS imports in order.
///
/// Duplicates are kept: two components may legitimately import the same
/// partial.
pub fn sass_imports(components: &[&Component]) -> Vec<String> {
    components.iter().flat_map(|c| c.sass_imports()).collect()
}

/// Concatenate each component's JS files in order.
pub fn js_files(components: &[&Component], roots: &AssetRoots) -> Vec<PathBuf> {
    components.iter().flat_map(|c| c.js_files(roots)).collect()
}

/// Full SASS import list: settings first, component partials, app last.
pub fn sass_import_list(settings: &str, components: &[&Component], app: &str) -> Vec<String> {
    let mut imports = Vec::with_capacity(components.len() + 2);
    imports.push(settings.to_string());
    imports.extend(sass_imports(components));
    imports.push(app.to_string());
    imports
}

/// Render an import-only SASS source, one `@import` per identifier.
pub fn import_source(imports: &[String]) -> String {
    imports.iter().map(|name| format!("@import \"{}\";\n", name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentRegistry;

    fn roots() -> AssetRoots {
        AssetRoots::new("fw", "vendor")
    }

    #[test]
    fn test_flatten_in_component_order() {
        let grid = Component::framework("grid").with_sass(["grid"]);
        let buttons = Component::framework("buttons").with_sass(["buttons", "button-groups"]);
        let imports = sass_imports(&[&grid, &buttons]);
        assert_eq!(
            imports,
            vec![
                "foundation/components/grid",
                "foundation/components/buttons",
                "foundation/components/button-groups",
            ]
        );
    }

    #[test]
    fn test_duplicates_not_removed() {
        let a = Component::vendor("a").with_sass(["shared"]);
        let b = Component::vendor("b").with_sass(["shared"]);
        assert_eq!(sass_imports(&[&a, &b]), vec!["shared", "shared"]);
    }

    #[test]
    fn test_js_files_skip_sass_only() {
        let jquery = Component::vendor("jquery").with_js(["jquery"]);
        let grid = Component::framework("grid").with_sass(["grid"]);
        let tabs = Component::framework("tabs").with_js(["tab"]).with_sass(["tabs"]);
        assert_eq!(
            js_files(&[&jquery, &grid, &tabs], &roots()),
            vec![PathBuf::from("vendor/jquery.js"), PathBuf::from("fw/foundation.tab.js")]
        );
    }

    #[test]
    fn test_import_list_wraps_settings_and_app() {
        let registry = ComponentRegistry::new(
            vec![
                Component::vendor("grid").with_sass(["grid"]),
                Component::vendor("buttons").with_sass(["buttons"]),
            ],
            &[],
        )
        .unwrap();
        let components: Vec<&Component> = registry.iter().collect();
        assert_eq!(
            sass_import_list("settings", &components, "app"),
            vec!["settings", "grid", "buttons", "app"]
        );
    }

    #[test]
    fn test_import_source() {
        let imports = vec!["settings".to_string(), "foundation/components/grid".to_string()];
        let source = import_source(&imports);
        assert_eq!(source, "@import \"settings\";\n@import \"foundation/components/grid\";\n");
    }

    #[test]
    fn test_projection_is_repeatable() {
        let registry = ComponentRegistry::foundation();
        let components: Vec<&Component> = registry.iter().collect();
        let first = AssetList::from_components(&components, &roots());
        let second = AssetList::from_components(&components, &roots());
        assert_eq!(first, second);
        assert!(!first.sass_imports.is_empty());
        assert!(!first.js_files.is_empty());
    }
}
