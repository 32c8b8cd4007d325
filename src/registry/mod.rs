//! Component registry and shortcut groups.
//!
//! This module provides:
//! - `Component`, a named pairing of JS modules and SASS partials
//! - `Flavor`, the per-component path-resolution strategy
//! - `ComponentRegistry`, the ordered, immutable set of known components
//! - `ShortcutGroup`, named subsets derived once from the registry
//!
//! Registration order is emission order. Scripts and stylesheets are
//! concatenated in the order components were registered, so the registry
//! is the single source of truth for load order.

mod component;
mod foundation;

pub use component::{AssetRoots, Component, Flavor, SASS_NAMESPACE};
pub use foundation::VENDOR_LIBRARIES;

use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Every default component.
pub const ALL: &str = "all";
/// Every default component except the vendor libraries.
pub const FOUNDATION_ONLY: &str = "foundation_only";
/// Every default component without scripts.
pub const NO_JS: &str = "no_js";

/// Error building a registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two components share a name
    #[error("component '{0}' is registered more than once")]
    Duplicate(String),
}

/// A named, precomputed subset of registry components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutGroup {
    name: String,
    members: Vec<String>,
}

impl ShortcutGroup {
    fn derive(name: &str, defaults: &[&Component], keep: impl Fn(&Component) -> bool) -> Self {
        let members =
            defaults.iter().filter(|c| keep(c)).map(|c| c.name().to_string()).collect();
        Self { name: name.to_string(), members }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member names in registration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether the group includes `component`.
    pub fn contains(&self, component: &str) -> bool {
        self.members.iter().any(|m| m == component)
    }
}

/// Ordered, immutable set of components.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    components: Vec<Component>,
    index: HashMap<String, usize>,
    groups: Vec<ShortcutGroup>,
}

impl ComponentRegistry {
    /// Build a registry from components in registration order.
    ///
    /// `vendor_libraries` names the components left out of the
    /// `foundation_only` group.
    pub fn new(
        components: Vec<Component>,
        vendor_libraries: &[&str],
    ) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for component in &components {
            if !seen.insert(component.name()) {
                return Err(RegistryError::Duplicate(component.name().to_string()));
            }
        }
        Ok(Self::build(components, vendor_libraries))
    }

    /// The Foundation 5 component set.
    pub fn foundation() -> Self {
        Self::build(foundation::components(), VENDOR_LIBRARIES)
    }

    fn build(components: Vec<Component>, vendor_libraries: &[&str]) -> Self {
        let index =
            components.iter().enumerate().map(|(i, c)| (c.name().to_string(), i)).collect();

        let defaults: Vec<&Component> = components.iter().filter(|c| c.is_default()).collect();
        let groups = vec![
            ShortcutGroup::derive(ALL, &defaults, |_| true),
            ShortcutGroup::derive(FOUNDATION_ONLY, &defaults, |c| {
                !vendor_libraries.iter().any(|v| *v == c.name())
            }),
            ShortcutGroup::derive(NO_JS, &defaults, |c| !c.has_js()),
        ];

        Self { components, index, groups }
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.index.get(name).map(|&i| &self.components[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registration position of a component.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Component names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.components.iter().map(Component::name).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Look up a shortcut group by name.
    pub fn group(&self, name: &str) -> Option<&ShortcutGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// All shortcut groups.
    pub fn groups(&self) -> &[ShortcutGroup] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_registry() -> ComponentRegistry {
        ComponentRegistry::new(
            vec![
                Component::vendor("jquery").with_js(["jquery"]),
                Component::framework("grid").with_sass(["grid"]),
                Component::framework("tabs").with_js(["tab"]).with_sass(["tabs"]),
                Component::vendor("icons").with_sass(["icons"]).optional(),
            ],
            &["jquery"],
        )
        .unwrap()
    }

    #[test]
    fn test_registration_order_preserved() {
        let registry = small_registry();
        assert_eq!(registry.names(), vec!["jquery", "grid", "tabs", "icons"]);
        assert_eq!(registry.position("tabs"), Some(2));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = ComponentRegistry::new(
            vec![
                Component::framework("grid").with_sass(["grid"]),
                Component::framework("grid").with_sass(["grid"]),
            ],
            &[],
        );
        assert_eq!(result.unwrap_err(), RegistryError::Duplicate("grid".to_string()));
    }

    #[test]
    fn test_group_all_uses_default_flag() {
        let registry = small_registry();
        let all = registry.group(ALL).unwrap();
        assert_eq!(all.members(), &["jquery", "grid", "tabs"]);
        assert!(!all.contains("icons"));
    }

    #[test]
    fn test_group_foundation_only_excludes_vendor() {
        let registry = small_registry();
        let group = registry.group(FOUNDATION_ONLY).unwrap();
        assert_eq!(group.members(), &["grid", "tabs"]);
    }

    #[test]
    fn test_group_no_js() {
        let registry = small_registry();
        assert_eq!(registry.group(NO_JS).unwrap().members(), &["grid"]);
    }

    #[test]
    fn test_unknown_group() {
        assert!(small_registry().group("everything").is_none());
    }

    #[test]
    fn test_foundation_names_unique() {
        let registry = ComponentRegistry::foundation();
        let names: HashSet<_> = registry.names().into_iter().collect();
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn test_foundation_group_nesting() {
        let registry = ComponentRegistry::foundation();
        let all = registry.group(ALL).unwrap();
        let foundation_only = registry.group(FOUNDATION_ONLY).unwrap();
        let no_js = registry.group(NO_JS).unwrap();

        for name in foundation_only.members() {
            assert!(all.contains(name), "{} missing from all", name);
        }
        for name in no_js.members() {
            assert!(foundation_only.contains(name), "{} missing from foundation_only", name);
        }
    }

    #[test]
    fn test_foundation_load_order() {
        let registry = ComponentRegistry::foundation();
        let pos = |n: &str| registry.position(n).unwrap();

        assert!(pos("jquery") < pos("core"));
        assert!(pos("modernizr") < pos("core"));
        assert!(pos("core") < pos("grid"));
        assert!(pos("grid") < pos("block-grid"));
        assert!(pos("buttons") < pos("dropdown"));
        assert_eq!(registry.iter().filter(|c| c.flavor() == Flavor::Core).count(), 1);
    }
}
