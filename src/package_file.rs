//! # Package Files
//!
//! This module defines [`RootPackageFile`], the in-memory container for the
//! resource mappings of the root package, together with the JSON persistence
//! shape used on disk. Mutating commands never edit a package file in place;
//! they run [`AtomicOperation`]s against the in-memory container and only
//! persist once the whole transaction succeeded.
//!
//! ## Persistence shape
//!
//! A package file is a JSON document with the package name and an ordered
//! list of mapping records:
//!
//! ```json
//! {
//!     "name": "acme/app",
//!     "resources": [
//!         { "repositoryPath": "/app", "pathReferences": ["res"] },
//!         { "repositoryPath": "/ui", "pathReferences": ["@acme/theme:assets"] }
//!     ]
//! }
//! ```
//!
//! Mappings are kept sorted by repository path, so a document written by
//! [`save`] is deterministic and survives remove/re-add cycles unchanged.
//! Installed packages use the same document shape; their records are read
//! with [`load_records`].
//!
//! [`AtomicOperation`]: crate::operations::AtomicOperation

use crate::defaults::DEFAULT_ROOT_PACKAGE_NAME;
use crate::error::Result;
use crate::mapping::ResourceMapping;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The in-memory mapping container of the root package.
#[derive(Debug, Default)]
pub struct RootPackageFile {
    package_name: String,
    mappings: BTreeMap<String, ResourceMapping>,
}

impl RootPackageFile {
    /// Creates an empty package file for the given package name.
    pub fn new(package_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            mappings: BTreeMap::new(),
        }
    }

    /// Returns the name of the package this file belongs to.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Checks whether a mapping exists for the given repository path.
    pub fn has_resource_mapping(&self, repository_path: &str) -> bool {
        self.mappings.contains_key(repository_path)
    }

    /// Returns the mapping for the given repository path, if any.
    pub fn get_resource_mapping(&self, repository_path: &str) -> Option<ResourceMapping> {
        self.mappings.get(repository_path).cloned()
    }

    /// Adds a mapping, returning the mapping it replaced, if any.
    pub fn add_resource_mapping(&mut self, mapping: ResourceMapping) -> Option<ResourceMapping> {
        self.mappings.insert(mapping.repository_path(), mapping)
    }

    /// Removes the mapping for the given repository path, returning it.
    pub fn remove_resource_mapping(&mut self, repository_path: &str) -> Option<ResourceMapping> {
        self.mappings.remove(repository_path)
    }

    /// Returns an iterator over the mappings, ordered by repository path.
    pub fn resource_mappings(&self) -> impl Iterator<Item = &ResourceMapping> {
        self.mappings.values()
    }

    /// Returns the number of mappings in the file.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns `true` if the file contains no mappings.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// One persisted resource mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    /// The repository path of the mapping.
    pub repository_path: String,
    /// The path references, in declaration order.
    pub path_references: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PackageFileDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    resources: Vec<MappingRecord>,
}

/// Load a root package file from disk.
///
/// Every record must form a valid mapping; a malformed record fails the
/// whole load.
pub fn load(path: &Path) -> Result<RootPackageFile> {
    let contents = fs::read_to_string(path)?;
    let document: PackageFileDocument = serde_json::from_str(&contents)?;

    let mut file = RootPackageFile::new(
        document.name.as_deref().unwrap_or(DEFAULT_ROOT_PACKAGE_NAME),
    );
    for record in document.resources {
        let mapping = ResourceMapping::new(&record.repository_path, record.path_references)?;
        file.add_resource_mapping(mapping);
    }
    Ok(file)
}

/// Load only the mapping records of a package file.
///
/// Used for installed packages, whose name comes from the install list
/// rather than from their own file.
pub fn load_records(path: &Path) -> Result<Vec<MappingRecord>> {
    let contents = fs::read_to_string(path)?;
    let document: PackageFileDocument = serde_json::from_str(&contents)?;
    Ok(document.resources)
}

/// Save a root package file to disk.
pub fn save(file: &RootPackageFile, path: &Path) -> Result<()> {
    let document = PackageFileDocument {
        name: Some(file.package_name().to_string()),
        resources: file
            .resource_mappings()
            .map(|mapping| MappingRecord {
                repository_path: mapping.repository_path(),
                path_references: mapping.path_references(),
            })
            .collect(),
    };
    let mut contents = serde_json::to_string_pretty(&document)?;
    contents.push('\n');
    fs::write(path, contents)?;
    Ok(())
}
