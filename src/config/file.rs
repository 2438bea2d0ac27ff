//! Option tables loaded from a TOML file with provenance
//!
//! The file carries two optional tables keyed by class-name pattern:
//!
//! ```toml
//! [defaults."App\\*"]
//! logger = "app"
//!
//! [overrides."App\\Http\\Kernel"]
//! debug = true
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use autowire_table::{expect_fragment_map, ConfigurationTypeError};

use crate::resolver::{DEFAULTS_ARGUMENT, OPTIONS_ARGUMENT};

/// Default config file name, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "autowire.toml";

/// The file a configuration was read from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigSource {
    /// File path
    pub path: String,

    /// SHA-256 digest of raw file bytes
    pub digest: String,
}

/// Default and override option tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutowireConfig {
    /// Options every resolver call starts from
    pub defaults: Map<String, Value>,

    /// Options applied over the defaults
    pub overrides: Map<String, Value>,

    /// Where the tables came from (None when no file was read)
    pub source: Option<ConfigSource>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    defaults: Option<toml::Value>,

    #[serde(default)]
    overrides: Option<toml::Value>,
}

impl AutowireConfig {
    /// Load option tables from `path`; a missing file yields empty tables.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using empty tables", path.display());
            return Ok(Self::default());
        }

        let bytes = fs::read(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let mut config = Self::from_toml_str(&contents)?;
        config.source = Some(ConfigSource {
            path: path.to_string_lossy().to_string(),
            digest,
        });

        Ok(config)
    }

    /// Parse option tables from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        let defaults = table(raw.defaults, DEFAULTS_ARGUMENT)?;
        let overrides = table(raw.overrides, OPTIONS_ARGUMENT)?;

        Ok(Self {
            defaults,
            overrides,
            source: None,
        })
    }
}

fn table(value: Option<toml::Value>, position: usize) -> Result<Map<String, Value>, ConfigError> {
    let value = value.map(toml_to_json).unwrap_or(Value::Null);
    Ok(expect_fragment_map(&value, position)?)
}

/// Convert TOML Value to JSON Value
pub fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error(transparent)]
    TypeError(#[from] ConfigurationTypeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_empty() {
        let config = AutowireConfig::load(Path::new("/nonexistent/autowire.toml")).unwrap();
        assert!(config.defaults.is_empty());
        assert!(config.overrides.is_empty());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_load_tables() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[defaults.'App\\*']").unwrap();
        writeln!(temp, "a = \"a1\"").unwrap();
        writeln!(temp, "c = {{ k1 = \"c11\" }}").unwrap();
        writeln!(temp, "[overrides.'App\\Foo']").unwrap();
        writeln!(temp, "b = 2").unwrap();

        let config = AutowireConfig::load(temp.path()).unwrap();

        assert_eq!(config.defaults["App\\*"], json!({"a": "a1", "c": {"k1": "c11"}}));
        assert_eq!(config.overrides["App\\Foo"], json!({"b": 2}));

        let source = config.source.unwrap();
        assert_eq!(source.digest.len(), 64);
    }

    #[test]
    fn test_non_table_override_is_type_error() {
        let err = AutowireConfig::from_toml_str("[overrides]\n'App\\Foo' = \"options\"\n").unwrap_err();
        match err {
            ConfigError::TypeError(e) => {
                assert_eq!(e.position, OPTIONS_ARGUMENT);
                assert_eq!(e.offending_key(), Some("App\\Foo"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_table_default_is_type_error() {
        let err = AutowireConfig::from_toml_str("[defaults]\n'App\\*' = [1, 2]\n").unwrap_err();
        assert!(matches!(err, ConfigError::TypeError(ref e) if e.position == DEFAULTS_ARGUMENT));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = AutowireConfig::from_toml_str("[other]\nx = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_toml_datetime_becomes_string() {
        let value: toml::Value = toml::from_str("at = 1979-05-27T07:32:00Z").unwrap();
        assert_eq!(toml_to_json(value)["at"], "1979-05-27T07:32:00Z");
    }
}
