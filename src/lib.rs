//! # Resource Repository Library
//!
//! This library provides the core functionality for composing a logical
//! "repository" namespace out of filesystem directories spread across
//! multiple installed packages. It is designed to be used by the
//! `resource-repo` command-line tool but can also be integrated into other
//! applications that need to manage cross-package resource mappings.
//!
//! ## Quick Example
//!
//! ```
//! use resource_repo::mapping::{MappingState, ResourceMapping};
//! use resource_repo::package_file::RootPackageFile;
//!
//! // A mapping binds a repository path to references into packages
//! let mapping = ResourceMapping::new("/app/views", vec!["views".to_string()]).unwrap();
//! assert_eq!(mapping.state(), MappingState::Unloaded);
//!
//! // The root package file collects the mappings of the project
//! let mut file = RootPackageFile::new("acme/app");
//! file.add_resource_mapping(mapping);
//! assert!(file.has_resource_mapping("/app/views"));
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Resource Mappings (`mapping`)**: The binding between a repository path
//!   and one or more path references, where a reference may point into the
//!   containing package or, via an `@vendor/name:` prefix, into any other
//!   installed package. Mappings are loaded against a package collection and
//!   track their own state (`Enabled`, `NotFound`, `Conflict`).
//! - **Conflicts (`conflict`, `detector`)**: When several packages claim the
//!   same repository path, the conflict detector links the claimants through
//!   shared [`conflict::PathConflict`] objects, which the mappings expose for
//!   inspection.
//! - **Atomic Operations (`operations`)**: Mutations of the root package file
//!   are execute/rollback command objects composed into transactions, so a
//!   failed mutation leaves the in-memory model untouched.
//! - **Package Files (`package_file`)**: The JSON-backed container for a
//!   package's resource mappings.
//! - **Repository Assembly (`repository`)**: Loads the root package file and
//!   the installed packages into a fully resolved, conflict-checked view.
//!
//! ## Execution Flow
//!
//! The `resource-repo` CLI drives these pieces as follows:
//!
//! 1.  **Discovery**: Read the install list into a `package::PackageCollection`.
//! 2.  **Loading**: Resolve every mapping of the root and installed packages
//!     against the filesystem, collecting per-reference load errors.
//! 3.  **Detection**: Run the `detector::ConflictDetector` over the loaded
//!     mappings.
//! 4.  **Mutation**: Apply `add`/`rm` commands as transactions against the
//!     `package_file::RootPackageFile` and persist on success.

pub mod conflict;
pub mod defaults;
pub mod detector;
pub mod error;
pub mod mapping;
pub mod operations;
pub mod package;
pub mod package_file;
pub mod path;
pub mod repository;
pub mod suggestions;

#[cfg(test)]
mod path_proptest;
