//! Autowire Map - pattern-keyed autowiring configuration
//!
//! This crate resolves, for every class of a namespace, the configuration
//! fragment a reflection-based factory needs to construct it. Options are
//! tables keyed by glob patterns over class names; caller options are
//! completed with a resolver's defaults, then every matching pattern is
//! folded into one fragment per class, most specific last.

pub mod config;
pub mod factory;
pub mod resolver;
pub mod scanner;

pub use autowire_table::{
    AnyClass, ClassLoader, ClassNameSource, ConfigurationTypeError, FactoryBuilder, Fragment,
    KnownClasses, PatternEntry, PatternTable, ResolvedFactoryMap, SourceProvider,
};
pub use config::{AutowireConfig, ConfigError};
pub use factory::{AutowiredFactory, AutowiredFactoryBuilder};
pub use resolver::{ConfigResolver, DEFAULTS_ARGUMENT, OPTIONS_ARGUMENT};
pub use scanner::{NamespaceScanner, ScannerProvider};
