//! Autowiring configuration resolver
//!
//! Holds a default option table and, per call, completes the caller's
//! options with it, scans the namespace, and resolves one fragment per
//! loadable class.

use serde_json::{Map, Value};
use std::path::Path;

use autowire_table::{
    expect_fragment_map, AnyClass, ClassLoader, ConfigurationTypeError, FactoryBuilder,
    PatternTable, ResolvedFactoryMap, SourceProvider,
};

use crate::config::merge_options;
use crate::factory::AutowiredFactoryBuilder;
use crate::scanner::ScannerProvider;

/// Argument position of the default options when constructing a resolver.
pub const DEFAULTS_ARGUMENT: usize = 1;

/// Argument position of the options in `resolve(namespace, directory, options)`.
///
/// Every type error surfaced by `resolve` is attributed here, including
/// those caused by the defaults.
pub const OPTIONS_ARGUMENT: usize = 3;

/// Resolves per-class autowiring configuration for a namespace.
#[derive(Debug, Clone)]
pub struct ConfigResolver<P = ScannerProvider, L = AnyClass, B = AutowiredFactoryBuilder> {
    defaults: Map<String, Value>,
    provider: P,
    loader: L,
    builder: B,
}

impl ConfigResolver {
    /// Create a resolver scanning namespace directories, treating every
    /// scanned class as loadable and producing [`AutowiredFactory`] values.
    ///
    /// [`AutowiredFactory`]: crate::AutowiredFactory
    pub fn new(defaults: &Value) -> Result<Self, ConfigurationTypeError> {
        Self::with_collaborators(
            defaults,
            ScannerProvider::default(),
            AnyClass,
            AutowiredFactoryBuilder,
        )
    }
}

impl<P, L, B> ConfigResolver<P, L, B>
where
    P: SourceProvider,
    L: ClassLoader,
    B: FactoryBuilder,
{
    /// Create a resolver with explicit collaborators.
    ///
    /// The defaults are stored verbatim once every value is known to be a
    /// mapping.
    pub fn with_collaborators(
        defaults: &Value,
        provider: P,
        loader: L,
        builder: B,
    ) -> Result<Self, ConfigurationTypeError> {
        Ok(Self {
            defaults: expect_fragment_map(defaults, DEFAULTS_ARGUMENT)?,
            provider,
            loader,
            builder,
        })
    }

    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    pub fn with_provider<P2: SourceProvider>(self, provider: P2) -> ConfigResolver<P2, L, B> {
        ConfigResolver {
            defaults: self.defaults,
            provider,
            loader: self.loader,
            builder: self.builder,
        }
    }

    pub fn with_loader<L2: ClassLoader>(self, loader: L2) -> ConfigResolver<P, L2, B> {
        ConfigResolver {
            defaults: self.defaults,
            provider: self.provider,
            loader,
            builder: self.builder,
        }
    }

    pub fn with_builder<B2: FactoryBuilder>(self, builder: B2) -> ConfigResolver<P, L, B2> {
        ConfigResolver {
            defaults: self.defaults,
            provider: self.provider,
            loader: self.loader,
            builder,
        }
    }

    /// Complete `overrides` with the defaults, pattern by pattern.
    ///
    /// `Null` stands for no overrides. Values are not checked here.
    pub fn merge(&self, overrides: &Value) -> Result<Map<String, Value>, ConfigurationTypeError> {
        let overrides = match overrides {
            Value::Null => Map::new(),
            Value::Object(map) => map.clone(),
            other => return Err(ConfigurationTypeError::new(OPTIONS_ARGUMENT, other.clone())),
        };

        Ok(merge_options(overrides, &self.defaults))
    }

    /// The pattern table a `resolve` call with these overrides folds with.
    pub fn table(&self, overrides: &Value) -> Result<PatternTable, ConfigurationTypeError> {
        let merged = Value::Object(self.merge(overrides)?);

        PatternTable::new(&merged)
            .map_err(|_| ConfigurationTypeError::new(OPTIONS_ARGUMENT, merged.clone()))
    }

    /// Resolve one factory per loadable class of `namespace` rooted at `directory`.
    pub fn resolve(
        &self,
        namespace: &str,
        directory: impl AsRef<Path>,
        overrides: &Value,
    ) -> Result<ResolvedFactoryMap<B::Factory>, ConfigurationTypeError> {
        let directory = directory.as_ref();
        let source = self.provider.source(namespace, directory);
        let table = self.table(overrides)?;

        tracing::debug!(
            namespace = %namespace,
            directory = %directory.display(),
            patterns = table.len(),
            "Resolving autowiring configuration"
        );

        Ok(table.classes(&source, &self.loader, &self.builder))
    }
}
