//! Configuration resolution.
//!
//! Turns a [`ComponentSelection`] into the concrete components to build.
//! The result is always in registry order, whatever order the caller listed
//! names in, because stylesheet and script load order depend on it.

use std::collections::HashSet;
use thiserror::Error;

use crate::config::ComponentSelection;
use crate::registry::{Component, ComponentRegistry};

/// A selection names something the registry does not know.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Explicit component name not registered
    #[error("unknown component '{0}'")]
    UnknownComponent(String),
    /// Shortcut-group key not recognized
    #[error("unknown component group '{name}' (expected one of: {available})")]
    UnknownGroup {
        /// The requested group
        name: String,
        /// Comma-separated list of valid group names
        available: String,
    },
}

/// Resolve a selection to components in registration order.
///
/// Fails on the first unknown name, in the order the caller gave them.
///
/// # Example
/// ```ignore
/// let registry = ComponentRegistry::foundation();
/// let selection = ComponentSelection::List(vec!["tabs".into(), "grid".into()]);
/// let components = resolve_components(&registry, &selection)?;
/// // grid is registered before tabs
/// assert_eq!(components[0].name(), "grid");
/// ```
pub fn resolve_components<'r>(
    registry: &'r ComponentRegistry,
    selection: &ComponentSelection,
) -> Result<Vec<&'r Component>, ConfigurationError> {
    let wanted: HashSet<&str> = match selection {
        ComponentSelection::Group(name) => {
            let group = registry.group(name).ok_or_else(|| ConfigurationError::UnknownGroup {
                name: name.clone(),
                available: registry
                    .groups()
                    .iter()
                    .map(|g| g.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
            group.members().iter().map(String::as_str).collect()
        }
        ComponentSelection::List(names) => {
            if let Some(unknown) = names.iter().find(|n| !registry.contains(n)) {
                return Err(ConfigurationError::UnknownComponent(unknown.clone()));
            }
            names.iter().map(String::as_str).collect()
        }
    };

    Ok(registry.iter().filter(|c| wanted.contains(c.name())).collect())
}

/// Resolve a selection to component names in registration order.
pub fn resolve_names(
    registry: &ComponentRegistry,
    selection: &ComponentSelection,
) -> Result<Vec<String>, ConfigurationError> {
    Ok(resolve_components(registry, selection)?
        .into_iter()
        .map(|c| c.name().to_string())
        .collect())
}
