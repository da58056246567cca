//! # Installed Packages
//!
//! This module defines the packages that contribute resources to the composed
//! repository. A [`Package`] pairs a name with the absolute filesystem
//! directory it is installed in; a [`PackageCollection`] indexes packages by
//! name so that path references of the form `@vendor/name:path` can be
//! resolved against the right install directory.
//!
//! The collection is usually built from an install list, a JSON document
//! produced by the (out-of-scope) package discovery layer:
//!
//! ```json
//! [
//!     { "name": "acme/blog", "installPath": "packages/blog" },
//!     { "name": "acme/theme", "installPath": "/opt/packages/theme" }
//! ]
//! ```
//!
//! Relative install paths are interpreted against the directory containing
//! the install list.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An installed package that may contribute resource mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    install_path: PathBuf,
}

impl Package {
    /// Creates a new package with the given name and install directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_repo::package::Package;
    ///
    /// let package = Package::new("acme/blog", "/pkg/blog");
    /// assert_eq!(package.name(), "acme/blog");
    /// assert_eq!(package.install_path().to_str(), Some("/pkg/blog"));
    /// ```
    pub fn new<P: Into<PathBuf>>(name: &str, install_path: P) -> Self {
        Self {
            name: name.to_string(),
            install_path: install_path.into(),
        }
    }

    /// Returns the package name (conventionally `vendor/name`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the filesystem directory the package is installed in.
    pub fn install_path(&self) -> &Path {
        &self.install_path
    }
}

/// A collection of installed packages, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct PackageCollection {
    packages: HashMap<String, Package>,
}

impl PackageCollection {
    /// Creates a new, empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a package, returning the previously stored package with the
    /// same name, if any.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        self.packages.insert(package.name.clone(), package)
    }

    /// Checks whether a package with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Looks up a package by name.
    ///
    /// Fails with `NoSuchPackage` if no package with that name is present.
    pub fn get(&self, name: &str) -> Result<&Package> {
        self.packages.get(name).ok_or_else(|| Error::NoSuchPackage {
            package: name.to_string(),
            reference: None,
        })
    }

    /// Returns an iterator over the packages in the collection.
    ///
    /// Iteration order is unspecified; callers that need deterministic output
    /// should sort by name.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Returns the package names in sorted order.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.packages.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of packages in the collection.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns `true` if the collection contains no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// One entry of the install list document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRecord {
    /// The package name.
    pub name: String,
    /// The install directory, absolute or relative to the install list.
    pub install_path: PathBuf,
}

/// Load a package collection from an install list document.
///
/// Relative `installPath` entries are resolved against the directory that
/// contains the document. Duplicate names keep the last entry.
pub fn load_install_list(path: &Path) -> Result<PackageCollection> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<InstallRecord> = serde_json::from_str(&contents)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut packages = PackageCollection::new();
    for record in records {
        let install_path = if record.install_path.is_absolute() {
            record.install_path
        } else {
            base_dir.join(record.install_path)
        };
        packages.insert(Package::new(&record.name, install_path));
    }
    Ok(packages)
}
