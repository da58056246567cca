//! # Resource Mappings
//!
//! This module defines [`ResourceMapping`], the binding between a repository
//! path and one or more path references into package install directories.
//! Mappings are the central entity of the composed repository namespace:
//! they are created detached, loaded against a package and a package
//! collection, and may become entangled in [`PathConflict`]s when several
//! packages claim the same repository path.
//!
//! ## Lifecycle
//!
//! A mapping starts out `Unloaded`. [`ResourceMapping::load`] resolves every
//! path reference against the filesystem and moves the mapping to `Enabled`
//! (at least one reference resolved) or `NotFound` (none did). The conflict
//! detector may attach conflicts, flipping the state to `Conflict`;
//! [`ResourceMapping::unload`] detaches all conflicts and returns the mapping
//! to `Unloaded`.
//!
//! ## Path references
//!
//! A reference is either a path relative to the install directory of the
//! package containing the mapping, or of the form `@vendor/name:path`, in
//! which case it is resolved against the install directory of the named
//! package. A string starting with `@` but containing no `:` is an ordinary
//! relative path.
//!
//! ## Sharing and identity
//!
//! `ResourceMapping` is a cheap handle: cloning yields another handle to the
//! same mapping, and handles compare equal iff they refer to the same
//! mapping. Conflicts hold weak back-references only, so dropping the last
//! handle of an unloaded mapping releases it.

use crate::conflict::PathConflict;
use crate::error::{Error, Result};
use crate::package::{Package, PackageCollection};
use crate::path;
use log::debug;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

/// The load/conflict state of a resource mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingState {
    /// The mapping has not been loaded.
    Unloaded,
    /// The mapping is loaded and at least one path reference resolved.
    Enabled,
    /// The mapping is loaded but none of its path references resolved.
    NotFound,
    /// The mapping is loaded and involved in at least one conflict.
    Conflict,
}

impl fmt::Display for MappingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MappingState::Unloaded => "Unloaded",
            MappingState::Enabled => "Enabled",
            MappingState::NotFound => "NotFound",
            MappingState::Conflict => "Conflict",
        };
        f.write_str(label)
    }
}

/// A mapping from a repository path to path references in package install
/// directories.
#[derive(Debug, Clone)]
pub struct ResourceMapping {
    inner: Rc<RefCell<MappingInner>>,
}

#[derive(Debug)]
pub(crate) struct MappingInner {
    repository_path: String,
    path_references: Vec<String>,
    filesystem_paths: Vec<PathBuf>,
    load_errors: Vec<Error>,
    containing_package: Option<Package>,
    /// Conflicts keyed by their repository path, in insertion order.
    conflicts: Vec<PathConflict>,
    state: MappingState,
}

impl ResourceMapping {
    /// Creates a new, unloaded mapping.
    ///
    /// The repository path must be a well-formed repository path and the
    /// reference list must contain at least one non-empty entry; both are
    /// stored verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_repo::mapping::{MappingState, ResourceMapping};
    ///
    /// let mapping = ResourceMapping::new("/app", vec!["res".to_string()]).unwrap();
    /// assert_eq!(mapping.repository_path(), "/app");
    /// assert_eq!(mapping.state(), MappingState::Unloaded);
    ///
    /// assert!(ResourceMapping::new("app", vec!["res".to_string()]).is_err());
    /// assert!(ResourceMapping::new("/app", vec![]).is_err());
    /// ```
    pub fn new(repository_path: &str, path_references: Vec<String>) -> Result<Self> {
        path::validate_path(repository_path)?;
        if path_references.is_empty() {
            return Err(Error::InvalidReferences {
                repository_path: repository_path.to_string(),
                message: "at least one path reference is required".to_string(),
            });
        }
        if path_references.iter().any(String::is_empty) {
            return Err(Error::InvalidReferences {
                repository_path: repository_path.to_string(),
                message: "path references must not be empty strings".to_string(),
            });
        }

        Ok(Self {
            inner: Rc::new(RefCell::new(MappingInner {
                repository_path: repository_path.to_string(),
                path_references,
                filesystem_paths: Vec::new(),
                load_errors: Vec::new(),
                containing_package: None,
                conflicts: Vec::new(),
                state: MappingState::Unloaded,
            })),
        })
    }

    /// Returns the repository path of the mapping.
    pub fn repository_path(&self) -> String {
        self.inner.borrow().repository_path.clone()
    }

    /// Returns the path references of the mapping, in declaration order.
    pub fn path_references(&self) -> Vec<String> {
        self.inner.borrow().path_references.clone()
    }

    /// Returns the current state of the mapping.
    pub fn state(&self) -> MappingState {
        self.inner.borrow().state
    }

    /// Returns `true` if the mapping is loaded.
    pub fn is_loaded(&self) -> bool {
        self.inner.borrow().containing_package.is_some()
    }

    /// Returns `true` if the mapping is loaded and enabled.
    pub fn is_enabled(&self) -> bool {
        self.state() == MappingState::Enabled
    }

    /// Returns `true` if the mapping is loaded but resolved no paths.
    pub fn is_not_found(&self) -> bool {
        self.state() == MappingState::NotFound
    }

    /// Returns `true` if the mapping is involved in a conflict.
    pub fn is_conflicting(&self) -> bool {
        self.state() == MappingState::Conflict
    }

    /// Loads the mapping by resolving its path references.
    ///
    /// Each reference is resolved against the install directory of
    /// `containing_package`, or against the package named by an
    /// `@vendor/name:` prefix, and checked against the filesystem. With
    /// `fail_fast` set, the first failure aborts the load and leaves the
    /// mapping untouched; otherwise failures are collected as load errors and
    /// the mapping still becomes queryable.
    ///
    /// Fails with `AlreadyLoaded` if the mapping is loaded.
    pub fn load(
        &self,
        containing_package: &Package,
        packages: &PackageCollection,
        fail_fast: bool,
    ) -> Result<()> {
        if self.is_loaded() {
            return Err(Error::AlreadyLoaded {
                repository_path: self.repository_path(),
            });
        }

        let repository_path = self.repository_path();
        let references = self.path_references();
        let mut filesystem_paths = Vec::new();
        let mut load_errors = Vec::new();

        for reference in &references {
            let resolved = match resolve_reference(reference, containing_package, packages) {
                Ok(resolved) => resolved,
                Err(error) => {
                    if fail_fast {
                        return Err(error);
                    }
                    debug!("{repository_path}: {error}");
                    load_errors.push(error);
                    continue;
                }
            };

            if !resolved.exists() {
                let error = Error::FileNotFound {
                    reference: reference.clone(),
                    repository_path: repository_path.clone(),
                    package: containing_package.name().to_string(),
                };
                if fail_fast {
                    return Err(error);
                }
                debug!("{repository_path}: {error}");
                load_errors.push(error);
                continue;
            }

            filesystem_paths.push(resolved);
        }

        let mut inner = self.inner.borrow_mut();
        inner.filesystem_paths = filesystem_paths;
        inner.load_errors = load_errors;
        inner.containing_package = Some(containing_package.clone());
        refresh_state(&mut inner);
        Ok(())
    }

    /// Unloads the mapping, detaching it from all conflicts.
    ///
    /// Fails with `NotLoaded` if the mapping is not loaded.
    pub fn unload(&self) -> Result<()> {
        let conflicts = {
            let mut inner = self.inner.borrow_mut();
            if inner.containing_package.is_none() {
                return Err(Error::NotLoaded {
                    repository_path: inner.repository_path.clone(),
                });
            }
            // Clear the table before notifying the conflicts so the symmetric
            // remove_mapping cannot observe a half-detached mapping.
            std::mem::take(&mut inner.conflicts)
        };
        for conflict in &conflicts {
            conflict.remove_mapping(self);
        }

        let mut inner = self.inner.borrow_mut();
        inner.filesystem_paths.clear();
        inner.load_errors.clear();
        inner.containing_package = None;
        inner.state = MappingState::Unloaded;
        Ok(())
    }

    /// Returns the resolved filesystem paths, in reference order.
    pub fn filesystem_paths(&self) -> Result<Vec<PathBuf>> {
        self.ensure_loaded()?;
        Ok(self.inner.borrow().filesystem_paths.clone())
    }

    /// Returns the package containing this mapping.
    pub fn containing_package(&self) -> Result<Package> {
        let inner = self.inner.borrow();
        inner
            .containing_package
            .clone()
            .ok_or_else(|| Error::NotLoaded {
                repository_path: inner.repository_path.clone(),
            })
    }

    /// Returns the errors collected while loading, in reference order.
    pub fn load_errors(&self) -> Result<Ref<'_, [Error]>> {
        let inner = self.inner.borrow();
        if inner.containing_package.is_none() {
            return Err(Error::NotLoaded {
                repository_path: inner.repository_path.clone(),
            });
        }
        Ok(Ref::map(inner, |inner| inner.load_errors.as_slice()))
    }

    /// Attaches a conflict to this mapping.
    ///
    /// The conflict's repository path must be the mapping's path or lie below
    /// it. Attaching the same conflict twice is a no-op; a different conflict
    /// already occupying the same path is displaced first. The symmetric
    /// membership on the conflict side is updated here as well.
    pub fn add_conflict(&self, conflict: &PathConflict) -> Result<()> {
        self.ensure_loaded()?;
        let repository_path = self.repository_path();
        let conflict_path = conflict.repository_path();
        if !path::is_base_path(&repository_path, &conflict_path) {
            return Err(Error::PathNotWithin {
                conflict_path,
                repository_path,
            });
        }

        let displaced = {
            let mut inner = self.inner.borrow_mut();
            if let Some(index) = inner
                .conflicts
                .iter()
                .position(|existing| existing.repository_path() == conflict_path)
            {
                if inner.conflicts[index] == *conflict {
                    return Ok(());
                }
                Some(std::mem::replace(
                    &mut inner.conflicts[index],
                    conflict.clone(),
                ))
            } else {
                inner.conflicts.push(conflict.clone());
                None
            }
        };
        if let Some(previous) = displaced {
            previous.remove_mapping(self);
        }
        conflict.add_mapping(self);

        let mut inner = self.inner.borrow_mut();
        refresh_state(&mut inner);
        Ok(())
    }

    /// Detaches a conflict from this mapping.
    ///
    /// A conflict that is not attached is ignored. The symmetric membership
    /// on the conflict side is updated as well.
    pub fn remove_conflict(&self, conflict: &PathConflict) -> Result<()> {
        self.ensure_loaded()?;
        let removed = {
            let mut inner = self.inner.borrow_mut();
            match inner.conflicts.iter().position(|existing| existing == conflict) {
                Some(index) => {
                    inner.conflicts.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            conflict.remove_mapping(self);
            let mut inner = self.inner.borrow_mut();
            refresh_state(&mut inner);
        }
        Ok(())
    }

    /// Returns the attached conflicts in insertion order of their paths.
    pub fn conflicts(&self) -> Result<Vec<PathConflict>> {
        self.ensure_loaded()?;
        Ok(self.inner.borrow().conflicts.clone())
    }

    /// Returns every other mapping involved in a conflict with this one,
    /// deduplicated by identity.
    pub fn conflicting_mappings(&self) -> Result<Vec<ResourceMapping>> {
        let conflicts = self.conflicts()?;
        let mut mappings: Vec<ResourceMapping> = Vec::new();
        for conflict in conflicts {
            for mapping in conflict.mappings() {
                if mapping == *self {
                    continue;
                }
                if !mappings.contains(&mapping) {
                    mappings.push(mapping);
                }
            }
        }
        Ok(mappings)
    }

    /// Returns the packages of all conflicting mappings, deduplicated by
    /// name.
    pub fn conflicting_packages(&self) -> Result<Vec<Package>> {
        let mut packages: Vec<Package> = Vec::new();
        for mapping in self.conflicting_mappings()? {
            let package = mapping.containing_package()?;
            if !packages.iter().any(|known| known.name() == package.name()) {
                packages.push(package);
            }
        }
        Ok(packages)
    }

    fn ensure_loaded(&self) -> Result<()> {
        let inner = self.inner.borrow();
        if inner.containing_package.is_none() {
            return Err(Error::NotLoaded {
                repository_path: inner.repository_path.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<MappingInner>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<MappingInner>>) -> Self {
        Self { inner }
    }
}

/// Mappings compare by identity: two handles are equal iff they refer to the
/// same mapping.
impl PartialEq for ResourceMapping {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ResourceMapping {}

/// Recomputes the state from the conflict table and the resolved paths.
fn refresh_state(inner: &mut MappingInner) {
    inner.state = if inner.containing_package.is_none() {
        MappingState::Unloaded
    } else if !inner.conflicts.is_empty() {
        MappingState::Conflict
    } else if inner.filesystem_paths.is_empty() {
        MappingState::NotFound
    } else {
        MappingState::Enabled
    };
}

/// Resolves one path reference to an absolute filesystem path.
fn resolve_reference(
    reference: &str,
    containing_package: &Package,
    packages: &PackageCollection,
) -> Result<PathBuf> {
    if let Some(rest) = reference.strip_prefix('@') {
        if let Some(colon) = rest.find(':') {
            let package_name = &rest[..colon];
            let tail = &rest[colon + 1..];
            if !packages.contains(package_name) {
                return Err(Error::NoSuchPackage {
                    package: package_name.to_string(),
                    reference: Some(reference.to_string()),
                });
            }
            return Ok(packages.get(package_name)?.install_path().join(tail));
        }
    }
    Ok(containing_package.install_path().join(reference))
}
