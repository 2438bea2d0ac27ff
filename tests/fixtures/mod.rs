//! Test fixtures for namespace resolution
//!
//! Builds throwaway namespace directories and config files.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a namespace directory holding one file per relative class path
/// (e.g. `Http/Kernel` becomes `Http/Kernel.php`).
pub fn namespace_dir(classes: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();

    for class in classes {
        let path = dir.path().join(format!("{}.php", class));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "<?php").unwrap();
    }

    dir
}

/// Write an `autowire.toml` into `dir`
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("autowire.toml");
    fs::write(&path, contents).unwrap();
    path
}
