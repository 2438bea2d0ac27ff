//! Pattern tables for autowiring configuration.
//!
//! A table maps glob patterns over fully qualified class names to
//! configuration fragments. Entries are kept in specificity order so that
//! folding every matching fragment left to right lets the most specific
//! pattern win.

mod collaborators;
mod error;
mod pattern;
mod table;

pub use collaborators::{
    AnyClass, ClassLoader, ClassNameSource, FactoryBuilder, KnownClasses, SourceProvider,
};
pub use error::{expect_fragment_map, ConfigurationTypeError, EXPECTED_MAPPING};
pub use pattern::{is_integer_key, specificity, PatternEntry};
pub use table::{PatternTable, ResolvedFactoryMap, TABLE_ARGUMENT};

/// Named or positional constructor-argument values for one class.
pub type Fragment = serde_json::Map<String, serde_json::Value>;
