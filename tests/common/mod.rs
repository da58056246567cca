//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions and canned
//! documents to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::{documents, TestFixture};
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_package_file(documents::SIMPLE);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Common JSON documents for testing.
#[allow(dead_code)]
pub mod documents {
    /// Package file with a single local mapping for `/app`.
    pub const SIMPLE: &str = r#"{
    "name": "acme/app",
    "resources": [
        { "repositoryPath": "/app", "pathReferences": ["res"] }
    ]
}"#;

    /// Package file without any mappings.
    pub const EMPTY: &str = r#"{ "name": "acme/app", "resources": [] }"#;

    /// Package file whose mapping claims `/shared`.
    pub const SHARED: &str = r#"{
    "name": "acme/app",
    "resources": [
        { "repositoryPath": "/shared", "pathReferences": ["res"] }
    ]
}"#;

    /// Invalid JSON for error testing.
    pub const INVALID_JSON: &str = "{ not json }";
}

/// A test fixture that provides a temporary directory with optional
/// package file, install list and package directories.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_package_file(documents::SIMPLE)
///     .with_dir("res");
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `resource-repo.json` root package file with the given content.
    pub fn with_package_file(self, content: &str) -> Self {
        self.temp_dir
            .child("resource-repo.json")
            .write_str(content)
            .expect("Failed to write package file");
        self
    }

    /// Add a `packages.json` install list with the given content.
    pub fn with_packages_file(self, content: &str) -> Self {
        self.temp_dir
            .child("packages.json")
            .write_str(content)
            .expect("Failed to write install list");
        self
    }

    /// Add an installed package: a directory with its own package file.
    ///
    /// The package must still be declared in the install list to be found.
    pub fn with_package(self, dir: &str, package_file: &str) -> Self {
        self.temp_dir
            .child(dir)
            .child("resource-repo.json")
            .write_str(package_file)
            .expect("Failed to write package file");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an empty directory with the given path.
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the root package file.
    pub fn package_file_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("resource-repo.json")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
