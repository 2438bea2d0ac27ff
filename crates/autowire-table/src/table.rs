//! Specificity-ordered pattern tables.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::collaborators::{ClassLoader, ClassNameSource, FactoryBuilder};
use crate::error::{expect_fragment_map, ConfigurationTypeError};
use crate::pattern::{is_integer_key, specificity, PatternEntry};
use crate::Fragment;

/// Argument position of the option table when a table is built directly.
pub const TABLE_ARGUMENT: usize = 1;

/// Class name to factory, one entry per loadable class.
pub type ResolvedFactoryMap<F> = BTreeMap<String, F>;

/// An immutable list of pattern entries sorted by specificity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
}

impl PatternTable {
    /// Build a table from an untyped mapping of pattern to fragment.
    ///
    /// Every value must itself be a mapping. Integer-like keys are dropped.
    pub fn new(options: &Value) -> Result<Self, ConfigurationTypeError> {
        let options = expect_fragment_map(options, TABLE_ARGUMENT)?;

        Ok(Self::from_fragments(options.into_iter().filter_map(
            |(pattern, fragment)| match fragment {
                Value::Object(fragment) => Some((pattern, fragment)),
                _ => None,
            },
        )))
    }

    /// Build a table from already typed entries.
    pub fn from_fragments<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = (String, Fragment)>,
    {
        let mut entries: Vec<PatternEntry> = fragments
            .into_iter()
            .filter(|(pattern, _)| {
                let keep = !is_integer_key(pattern);
                if !keep {
                    tracing::debug!(key = %pattern, "Dropping integer key from option table");
                }
                keep
            })
            .map(|(pattern, fragment)| PatternEntry::new(pattern, fragment))
            .collect();

        // Stable: equally specific patterns keep their input order
        entries.sort_by(|a, b| specificity(a.pattern(), b.pattern()));

        Self { entries }
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching `class`, least specific first.
    pub fn matching<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a PatternEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.matches(class))
    }

    /// Fold every matching fragment into one, later entries replacing
    /// earlier top-level keys wholesale.
    pub fn fold(&self, class: &str) -> Fragment {
        let mut acc = Fragment::new();
        for entry in self.matching(class) {
            entry.overlay(&mut acc);
        }
        acc
    }

    /// Build one factory per loadable class of `source`.
    pub fn classes<S, L, B>(&self, source: &S, loader: &L, builder: &B) -> ResolvedFactoryMap<B::Factory>
    where
        S: ClassNameSource + ?Sized,
        L: ClassLoader + ?Sized,
        B: FactoryBuilder + ?Sized,
    {
        source
            .classes()
            .into_iter()
            .filter(|class| {
                let loadable = loader.is_loadable(class);
                if !loadable {
                    tracing::debug!(class = %class, "Skipping class that is not loadable");
                }
                loadable
            })
            .map(|class| {
                let fragment = self.fold(&class);
                let factory = builder.make_factory(&class, fragment);
                (class, factory)
            })
            .collect()
    }
}
