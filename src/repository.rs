//! High-level repository assembly
//!
//! This module provides the main interface for composing the repository view
//! out of the root package file and the installed packages, abstracting away
//! the details of mapping loading and conflict detection.

use crate::defaults::DEFAULT_PACKAGE_FILENAME;
use crate::detector::ConflictDetector;
use crate::error::Result;
use crate::mapping::ResourceMapping;
use crate::package::{Package, PackageCollection};
use crate::package_file::{self, RootPackageFile};
use log::warn;
use std::path::Path;

/// The composed view of the repository namespace.
///
/// Loading a view resolves every mapping of the root package and of each
/// installed package (soft mode, so load errors become data on the
/// mappings) and runs a conflict detection pass over the result.
pub struct RepositoryView {
    packages: PackageCollection,
    mappings: Vec<ResourceMapping>,
    detector: ConflictDetector,
}

impl RepositoryView {
    /// Assembles the repository view.
    ///
    /// The root package is registered under the root file's package name
    /// with `root_install_path` as its install directory. Installed packages
    /// contribute the mappings of the `resource-repo.json` in their install
    /// directory, if present; malformed entries there are skipped with a
    /// warning rather than failing the whole view.
    pub fn load(
        root_file: &RootPackageFile,
        root_install_path: &Path,
        mut packages: PackageCollection,
    ) -> Result<Self> {
        let root_package = Package::new(root_file.package_name(), root_install_path);
        packages.insert(root_package.clone());

        let mut mappings = Vec::new();
        for mapping in root_file.resource_mappings() {
            mapping.load(&root_package, &packages, false)?;
            mappings.push(mapping.clone());
        }

        for name in packages.sorted_names() {
            if name == root_package.name() {
                continue;
            }
            let package = packages.get(&name)?.clone();
            let file_path = package.install_path().join(DEFAULT_PACKAGE_FILENAME);
            if !file_path.exists() {
                continue;
            }
            let records = match package_file::load_records(&file_path) {
                Ok(records) => records,
                Err(error) => {
                    warn!(
                        "Skipping package file of '{}' ({}): {}",
                        name,
                        file_path.display(),
                        error
                    );
                    continue;
                }
            };
            for record in records {
                match ResourceMapping::new(&record.repository_path, record.path_references) {
                    Ok(mapping) => {
                        mapping.load(&package, &packages, false)?;
                        mappings.push(mapping);
                    }
                    Err(error) => {
                        warn!("Skipping mapping of package '{name}': {error}");
                    }
                }
            }
        }

        let mut detector = ConflictDetector::new();
        detector.refresh(&mappings)?;

        Ok(Self {
            packages,
            mappings,
            detector,
        })
    }

    /// Returns the packages contributing to the view, including the root.
    pub fn packages(&self) -> &PackageCollection {
        &self.packages
    }

    /// Returns all loaded mappings, root package first.
    pub fn mappings(&self) -> &[ResourceMapping] {
        &self.mappings
    }

    /// Re-runs conflict detection, e.g. after unloading mappings.
    pub fn refresh_conflicts(&mut self) -> Result<()> {
        self.detector.refresh(&self.mappings)
    }

    /// Returns the detected conflicts, sorted by repository path.
    pub fn conflicts(&self) -> Vec<crate::conflict::PathConflict> {
        self.detector.conflicts()
    }
}
