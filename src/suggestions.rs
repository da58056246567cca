//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Following CLI recommendations,
//! errors should tell users what went wrong AND how to fix it.

use std::path::Path;

/// Generate an error for when the root package file is not found.
///
/// Includes hints about:
/// - Creating a file with the `add` command
/// - Using the --package-file flag
pub fn package_file_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Package file not found: {path}\n\n\
         hint: Run `resource-repo add <path> <reference>` to create one\n\
         hint: Use --package-file to specify a different path",
        path = path.display()
    )
}

/// Generate an error for when a repository path has no mapping to remove.
///
/// Includes a hint about listing the existing mappings.
pub fn mapping_not_found(repository_path: &str, path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "No mapping for '{repository_path}' in {path}\n\n\
         hint: Run `resource-repo ls` to list the existing mappings",
        path = path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_file_not_found_includes_hints() {
        let error = package_file_not_found(Path::new("resource-repo.json"));
        let message = error.to_string();
        assert!(message.contains("resource-repo.json"));
        assert!(message.contains("hint:"));
    }

    #[test]
    fn test_mapping_not_found_names_path() {
        let error = mapping_not_found("/app", Path::new("resource-repo.json"));
        let message = error.to_string();
        assert!(message.contains("/app"));
        assert!(message.contains("resource-repo ls"));
    }
}
