//! Default values for resource-repo configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// File name of the package file that holds a package's resource mappings.
///
/// The root package file lives in the project directory; installed packages
/// may carry a file of the same name in their install directory.
pub const DEFAULT_PACKAGE_FILENAME: &str = "resource-repo.json";

/// File name of the install list describing the installed packages.
pub const DEFAULT_INSTALL_FILENAME: &str = "packages.json";

/// Package name assumed for a root package file that does not declare one.
pub const DEFAULT_ROOT_PACKAGE_NAME: &str = "root";
