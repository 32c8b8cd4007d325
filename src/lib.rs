//! Groundwork - bundle Zurb Foundation components into compiled assets
//!
//! This library provides functionality to:
//! - Select Foundation components by name or shortcut group
//! - Resolve them, in registration order, into SASS imports and JS files
//! - Compile the stylesheets and concatenate and minify the scripts
//! - Rebuild automatically when sources change

pub mod assets;
pub mod build;
pub mod cli;
pub mod config;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod tool;
pub mod watch;
