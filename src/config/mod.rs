//! Option table configuration
//!
//! Option tables come from two layers:
//! 1. Defaults held by the resolver
//! 2. Per-call overrides supplied by the caller
//!
//! Both layers can be read from one TOML file (`autowire.toml`).

mod file;
mod merge;

pub use file::{toml_to_json, AutowireConfig, ConfigError, ConfigSource, DEFAULT_CONFIG_FILE};
pub use merge::{fill_missing, merge_options};
