//! Error handling types for the resource-repo application
//!
//! Two families of errors share this enum. Runtime errors (`NoSuchPackage`,
//! `FileNotFound`) are produced while resolving path references; mappings
//! collect them as plain values unless a load runs in fail-fast mode. The
//! remaining variants signal misuse (querying an unloaded mapping, attaching
//! a conflict outside the mapping's subtree) or malformed input and are
//! always propagated to the caller.

use thiserror::Error;

/// Main error type for resource-repo operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid repository path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("Invalid path references for '{repository_path}': {message}")]
    InvalidReferences {
        repository_path: String,
        message: String,
    },

    #[error("The mapping for '{repository_path}' is already loaded")]
    AlreadyLoaded { repository_path: String },

    #[error("The mapping for '{repository_path}' is not loaded")]
    NotLoaded { repository_path: String },

    #[error("No package named '{package}' is installed{}", reference_note(.reference))]
    NoSuchPackage {
        package: String,
        reference: Option<String>,
    },

    #[error(
        "The reference '{reference}' mapped to '{repository_path}' by package '{package}' points to a path that does not exist"
    )]
    FileNotFound {
        reference: String,
        repository_path: String,
        package: String,
    },

    #[error(
        "The conflict path '{conflict_path}' is not within the repository path '{repository_path}' of the mapping"
    )]
    PathNotWithin {
        conflict_path: String,
        repository_path: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

fn reference_note(reference: &Option<String>) -> String {
    match reference {
        Some(reference) => format!(" (referenced by '{reference}')"),
        None => String::new(),
    }
}

/// Result type alias for resource-repo operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_such_package_message_without_reference() {
        let error = Error::NoSuchPackage {
            package: "acme/missing".to_string(),
            reference: None,
        };
        assert_eq!(
            error.to_string(),
            "No package named 'acme/missing' is installed"
        );
    }

    #[test]
    fn test_no_such_package_message_with_reference() {
        let error = Error::NoSuchPackage {
            package: "acme/missing".to_string(),
            reference: Some("@acme/missing:res".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "No package named 'acme/missing' is installed (referenced by '@acme/missing:res')"
        );
    }

    #[test]
    fn test_file_not_found_message_names_all_parties() {
        let error = Error::FileNotFound {
            reference: "views".to_string(),
            repository_path: "/app".to_string(),
            package: "acme/blog".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("views"));
        assert!(message.contains("/app"));
        assert!(message.contains("acme/blog"));
    }
}
