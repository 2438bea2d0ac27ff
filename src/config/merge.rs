//! Default/override merge of option tables
//!
//! Merge semantics are a first-wins union at the top level of each fragment:
//! - Keys already in the override fragment: kept unchanged
//! - Keys only in the default fragment: added
//! - Nested mappings: never merged, the override's value is kept whole

use autowire_table::Fragment;
use serde_json::{Map, Value};

/// Add every key of `defaults` that `target` does not already have.
pub fn fill_missing(target: &mut Fragment, defaults: &Fragment) {
    for (key, value) in defaults {
        if !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Complete an override table with a default table, pattern by pattern.
///
/// A pattern absent from `overrides` (or mapped to null) takes the default
/// fragment as is. A pattern whose override is not a mapping is left alone
/// so that table validation can report it.
pub fn merge_options(mut overrides: Map<String, Value>, defaults: &Map<String, Value>) -> Map<String, Value> {
    for (pattern, default) in defaults {
        let Value::Object(default) = default else {
            continue;
        };

        let slot = overrides.entry(pattern.clone()).or_insert(Value::Null);
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }

        if let Value::Object(fragment) = slot {
            fill_missing(fragment, default);
        }
    }

    overrides
}
