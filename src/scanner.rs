//! Namespace scanning
//!
//! Maps a namespace rooted at a directory to the class names its files
//! declare: `<root>/Http/Kernel.php` under namespace `App` becomes
//! `App\Http\Kernel`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use autowire_table::{ClassNameSource, SourceProvider};

/// Namespace separator in fully qualified class names
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Default extension of class files
pub const DEFAULT_EXTENSION: &str = "php";

/// Class names of a namespace rooted at a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScanner {
    namespace: String,
    directory: PathBuf,
    extension: String,
}

impl NamespaceScanner {
    pub fn new(namespace: &str, directory: impl Into<PathBuf>) -> Self {
        Self {
            namespace: namespace.trim_matches(NAMESPACE_SEPARATOR).to_string(),
            directory: directory.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Only files with this extension declare classes
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Class name declared by a file at `rel_path`, if any
    fn class_name(&self, rel_path: &Path) -> Option<String> {
        if rel_path.extension()?.to_str()? != self.extension {
            return None;
        }

        let stem = rel_path.file_stem()?.to_str()?;
        let mut segments: Vec<&str> = Vec::new();

        if !self.namespace.is_empty() {
            segments.push(&self.namespace);
        }

        if let Some(parent) = rel_path.parent() {
            for component in parent.components() {
                let segment = component.as_os_str().to_str()?;
                if !is_identifier(segment) {
                    return None;
                }
                segments.push(segment);
            }
        }

        if !is_identifier(stem) {
            return None;
        }
        segments.push(stem);

        let separator = NAMESPACE_SEPARATOR.to_string();
        Some(segments.join(separator.as_str()))
    }
}

impl ClassNameSource for NamespaceScanner {
    fn classes(&self) -> BTreeSet<String> {
        let mut classes = BTreeSet::new();

        if !self.directory.is_dir() {
            tracing::debug!("Namespace directory {} does not exist", self.directory.display());
            return classes;
        }

        for entry in WalkDir::new(&self.directory).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry under {}", self.directory.display());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(&self.directory) else {
                continue;
            };

            if let Some(class) = self.class_name(rel_path) {
                classes.insert(class);
            }
        }

        classes
    }
}

/// Builds a [`NamespaceScanner`] per namespace and directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerProvider {
    extension: String,
}

impl Default for ScannerProvider {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl ScannerProvider {
    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
        }
    }
}

impl SourceProvider for ScannerProvider {
    type Source = NamespaceScanner;

    fn source(&self, namespace: &str, directory: &Path) -> NamespaceScanner {
        NamespaceScanner::new(namespace, directory).with_extension(&self.extension)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("Foo.php"), "<?php").unwrap();
        fs::write(dir.path().join("README.md"), "docs").unwrap();
        fs::write(dir.path().join("foo.test.php"), "<?php").unwrap();

        fs::create_dir(dir.path().join("Http")).unwrap();
        fs::write(dir.path().join("Http/Kernel.php"), "<?php").unwrap();

        fs::create_dir(dir.path().join("not-a-namespace")).unwrap();
        fs::write(dir.path().join("not-a-namespace/Bar.php"), "<?php").unwrap();

        dir
    }

    fn classes(scanner: &NamespaceScanner) -> Vec<String> {
        scanner.classes().into_iter().collect()
    }

    #[test]
    fn test_scan_namespace() {
        let dir = create_test_dir();
        let scanner = NamespaceScanner::new("App", dir.path());

        assert_eq!(classes(&scanner), vec!["App\\Foo", "App\\Http\\Kernel"]);
    }

    #[test]
    fn test_namespace_separators_trimmed() {
        let dir = create_test_dir();
        let scanner = NamespaceScanner::new("\\App\\", dir.path());

        assert_eq!(scanner.namespace(), "App");
        assert!(scanner.classes().contains("App\\Foo"));
    }

    #[test]
    fn test_empty_namespace() {
        let dir = create_test_dir();
        let scanner = NamespaceScanner::new("", dir.path());

        assert_eq!(classes(&scanner), vec!["Foo", "Http\\Kernel"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let scanner = NamespaceScanner::new("App", "/nonexistent/autowire/src");
        assert!(scanner.classes().is_empty());
    }

    #[test]
    fn test_custom_extension() {
        let dir = create_test_dir();
        fs::write(dir.path().join("Service.inc"), "").unwrap();

        let provider = ScannerProvider::with_extension("inc");
        let scanner = provider.source("App", dir.path());

        assert_eq!(classes(&scanner), vec!["App\\Service"]);
    }

    #[test]
    fn test_identifier() {
        assert!(is_identifier("Kernel"));
        assert!(is_identifier("_Internal2"));
        assert!(!is_identifier("2Fast"));
        assert!(!is_identifier("not-a-namespace"));
        assert!(!is_identifier(""));
    }
}
