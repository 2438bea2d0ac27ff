//! Providers and consumers the table works against.
//!
//! Enumerating classes, deciding whether a class can be loaded, and building
//! the final factory all live outside this crate; these traits are the seams.

use std::collections::BTreeSet;
use std::path::Path;

use crate::Fragment;

/// Fully qualified class names known to belong to a namespace.
pub trait ClassNameSource {
    fn classes(&self) -> BTreeSet<String>;
}

impl ClassNameSource for BTreeSet<String> {
    fn classes(&self) -> BTreeSet<String> {
        self.clone()
    }
}

impl ClassNameSource for Vec<String> {
    fn classes(&self) -> BTreeSet<String> {
        self.iter().cloned().collect()
    }
}

impl ClassNameSource for [&str] {
    fn classes(&self) -> BTreeSet<String> {
        self.iter().map(|class| class.to_string()).collect()
    }
}

/// Builds a fresh class-name source for a namespace rooted at a directory.
pub trait SourceProvider {
    type Source: ClassNameSource;

    fn source(&self, namespace: &str, directory: &Path) -> Self::Source;
}

/// Decides whether a discovered class name currently resolves to a real class.
pub trait ClassLoader {
    fn is_loadable(&self, class: &str) -> bool;
}

impl<F> ClassLoader for F
where
    F: Fn(&str) -> bool,
{
    fn is_loadable(&self, class: &str) -> bool {
        self(class)
    }
}

/// Treats every discovered class as loadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyClass;

impl ClassLoader for AnyClass {
    fn is_loadable(&self, _class: &str) -> bool {
        true
    }
}

/// A registry of the classes that exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownClasses(BTreeSet<String>);

impl KnownClasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: impl Into<String>) -> bool {
        self.0.insert(class.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownClasses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl ClassLoader for KnownClasses {
    fn is_loadable(&self, class: &str) -> bool {
        self.0.contains(class)
    }
}

/// Turns a class name and its resolved fragment into a factory.
pub trait FactoryBuilder {
    type Factory;

    fn make_factory(&self, class: &str, fragment: Fragment) -> Self::Factory;
}

impl<F, T> FactoryBuilder for F
where
    F: Fn(&str, Fragment) -> T,
{
    type Factory = T;

    fn make_factory(&self, class: &str, fragment: Fragment) -> T {
        self(class, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_classes() {
        let known: KnownClasses = ["App\\Foo", "App\\Bar"].into_iter().collect();
        assert_eq!(known.len(), 2);
        assert!(known.is_loadable("App\\Foo"));
        assert!(!known.is_loadable("App\\Baz"));
    }

    #[test]
    fn test_known_classes_registry() {
        let mut known = KnownClasses::new();
        assert!(known.is_empty());

        assert!(known.insert("App\\Foo"));
        assert!(!known.insert("App\\Foo".to_string()));

        assert!(!known.is_empty());
        assert_eq!(known.len(), 1);
        assert!(known.is_loadable("App\\Foo"));
    }

    #[test]
    fn test_any_class() {
        assert!(AnyClass.is_loadable("Anything\\At\\All"));
    }

    #[test]
    fn test_closure_loader() {
        let loader = |class: &str| class.starts_with("App\\");
        assert!(loader.is_loadable("App\\Foo"));
        assert!(!loader.is_loadable("Vendor\\Foo"));
    }

    #[test]
    fn test_slice_source_dedupes() {
        let source: &[&str] = &["B", "A", "B"];
        let classes = source.classes();
        assert_eq!(classes.into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
