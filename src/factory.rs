//! Autowired factories
//!
//! The value handed to a reflection-based instantiator: the class to build
//! and the configuration resolved for it.

use autowire_table::{FactoryBuilder, Fragment};
use serde::{Deserialize, Serialize};

/// A class name paired with its resolved constructor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutowiredFactory {
    pub class: String,
    pub config: Fragment,
}

impl AutowiredFactory {
    pub fn new(class: impl Into<String>, config: Fragment) -> Self {
        Self {
            class: class.into(),
            config,
        }
    }
}

/// Builds [`AutowiredFactory`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutowiredFactoryBuilder;

impl FactoryBuilder for AutowiredFactoryBuilder {
    type Factory = AutowiredFactory;

    fn make_factory(&self, class: &str, fragment: Fragment) -> AutowiredFactory {
        AutowiredFactory::new(class, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let config = json!({"a": 1}).as_object().cloned().unwrap();
        let factory = AutowiredFactoryBuilder.make_factory("App\\Foo", config.clone());
        assert_eq!(factory, AutowiredFactory::new("App\\Foo", config));
    }

    #[test]
    fn test_serialization() {
        let factory = AutowiredFactory::new("App\\Foo", Fragment::new());
        let json = serde_json::to_value(&factory).unwrap();
        assert_eq!(json, json!({"class": "App\\Foo", "config": {}}));
    }
}
