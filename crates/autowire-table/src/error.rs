//! Type errors for pattern-keyed option tables.

use serde_json::{Map, Value};

/// Type label used for mapping-typed values in diagnostics.
pub const EXPECTED_MAPPING: &str = "array";

/// An argument expected to be a mapping of mappings holds something else.
///
/// `position` is the 1-based position of the argument in the call the
/// caller made, `given` is the whole offending argument as it was seen.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Argument {position} must be of type {expected}[], {} given", describe(.given))]
pub struct ConfigurationTypeError {
    pub position: usize,
    pub expected: &'static str,
    pub given: Value,
}

impl ConfigurationTypeError {
    /// Create a type error for the argument at `position`.
    pub fn new(position: usize, given: Value) -> Self {
        Self {
            position,
            expected: EXPECTED_MAPPING,
            given,
        }
    }

    /// Key of the first element that is not a mapping, if the argument
    /// itself was a mapping.
    pub fn offending_key(&self) -> Option<&str> {
        match &self.given {
            Value::Object(map) => first_offender(map).map(|(key, _)| key.as_str()),
            _ => None,
        }
    }
}

/// Check that `input` is a mapping whose values are all mappings.
///
/// `Null` stands for an absent argument and yields an empty table.
pub fn expect_fragment_map(
    input: &Value,
    position: usize,
) -> Result<Map<String, Value>, ConfigurationTypeError> {
    match input {
        Value::Null => Ok(Map::new()),
        Value::Object(map) if first_offender(map).is_none() => Ok(map.clone()),
        other => Err(ConfigurationTypeError::new(position, other.clone())),
    }
}

fn first_offender(map: &Map<String, Value>) -> Option<(&String, &Value)> {
    map.iter().find(|(_, value)| !value.is_object())
}

fn describe(given: &Value) -> String {
    match given {
        Value::Object(map) => match first_offender(map) {
            Some((key, value)) => {
                format!("array with element {:?} of type {}", key, type_name(value))
            }
            None => EXPECTED_MAPPING.to_string(),
        },
        other => type_name(other).to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => EXPECTED_MAPPING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_mapping_of_mappings() {
        let input = json!({"App\\*": {"a": 1}, "App\\Foo": {}});
        let map = expect_fragment_map(&input, 1).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_null_is_empty() {
        let map = expect_fragment_map(&Value::Null, 3).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_rejects_scalar_element() {
        let input = json!({"A": {"a": 1}, "B": "options", "C": {}});
        let err = expect_fragment_map(&input, 3).unwrap_err();
        assert_eq!(err.position, 3);
        assert_eq!(err.expected, "array");
        assert_eq!(err.given, input);
        assert_eq!(err.offending_key(), Some("B"));
    }

    #[test]
    fn test_rejects_null_element() {
        let input = json!({"A": null});
        let err = expect_fragment_map(&input, 1).unwrap_err();
        assert_eq!(err.offending_key(), Some("A"));
    }

    #[test]
    fn test_rejects_non_mapping_argument() {
        let err = expect_fragment_map(&json!(["A"]), 1).unwrap_err();
        assert_eq!(err.offending_key(), None);
        assert_eq!(err.to_string(), "Argument 1 must be of type array[], list given");
    }

    #[test]
    fn test_message_names_offending_element() {
        let err = expect_fragment_map(&json!({"B": "options"}), 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Argument 3 must be of type array[], array with element \"B\" of type string given"
        );
    }
}
