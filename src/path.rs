//! # Repository Path Utilities
//!
//! This module provides utility functions for working with repository paths,
//! the logical absolute paths that make up the composed repository namespace.
//! These utilities are used throughout the application, particularly by
//! resource mappings and the conflict detector.
//!
//! ## Key Functions
//!
//! - **`validate_path`**: Checks that a string is a well-formed repository
//!   path: absolute, free of `.`/`..` segments and repeated separators, and
//!   without a trailing slash (except for the root itself).
//!
//! - **`canonicalize_path`**: Normalizes a user-supplied path by collapsing
//!   repeated separators and resolving `.` and `..` segments. Paths that
//!   escape the root are rejected.
//!
//! - **`is_base_path`**: Tests whether one repository path contains another,
//!   i.e. whether the candidate equals the base or lives somewhere below it.

use crate::error::{Error, Result};

/// Validate that a string is a well-formed repository path.
///
/// Repository paths are absolute (`/`-prefixed), contain no `.` or `..`
/// segments, no repeated separators, and no trailing slash except for the
/// root path `/` itself.
///
/// # Examples
///
/// ```
/// use resource_repo::path::validate_path;
///
/// assert!(validate_path("/").is_ok());
/// assert!(validate_path("/app/views").is_ok());
///
/// assert!(validate_path("app/views").is_err());
/// assert!(validate_path("/app/").is_err());
/// assert!(validate_path("/app//views").is_err());
/// assert!(validate_path("/app/../views").is_err());
/// ```
pub fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(path, "the path must not be empty"));
    }
    if !path.starts_with('/') {
        return Err(invalid(path, "the path must be absolute"));
    }
    if path == "/" {
        return Ok(());
    }
    if path.ends_with('/') {
        return Err(invalid(path, "the path must not have a trailing slash"));
    }
    for segment in path[1..].split('/') {
        match segment {
            "" => return Err(invalid(path, "the path must not contain repeated separators")),
            "." | ".." => {
                return Err(invalid(path, "the path must not contain '.' or '..' segments"))
            }
            _ => {}
        }
    }
    Ok(())
}

/// Normalize a user-supplied repository path into canonical form.
///
/// Repeated separators and `.` segments are dropped, `..` segments pop the
/// preceding segment, and any trailing slash is removed. The result always
/// satisfies [`validate_path`]. Paths that are relative or that point above
/// the root are rejected with `InvalidPath`.
///
/// # Examples
///
/// ```
/// use resource_repo::path::canonicalize_path;
///
/// assert_eq!(canonicalize_path("/app/views").unwrap(), "/app/views");
/// assert_eq!(canonicalize_path("/app//./views/").unwrap(), "/app/views");
/// assert_eq!(canonicalize_path("/app/../ui").unwrap(), "/ui");
/// assert_eq!(canonicalize_path("/app/..").unwrap(), "/");
///
/// assert!(canonicalize_path("app").is_err());
/// assert!(canonicalize_path("/..").is_err());
/// ```
pub fn canonicalize_path(path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(invalid(path, "the path must not be empty"));
    }
    if !path.starts_with('/') {
        return Err(invalid(path, "the path must be absolute"));
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(invalid(path, "the path points above the root"));
                }
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(format!("/{}", segments.join("/")))
    }
}

/// Test whether `base` is a base path of `path`.
///
/// Returns `true` iff `path` equals `base` or begins with `base` followed by
/// a separator. Both arguments must be canonical absolute repository paths.
/// The root path `/` is a base of every path.
///
/// # Examples
///
/// ```
/// use resource_repo::path::is_base_path;
///
/// assert!(is_base_path("/app", "/app"));
/// assert!(is_base_path("/app", "/app/views"));
/// assert!(is_base_path("/", "/app"));
///
/// assert!(!is_base_path("/app", "/application"));
/// assert!(!is_base_path("/app/views", "/app"));
/// ```
pub fn is_base_path(base: &str, path: &str) -> bool {
    if base == path {
        return true;
    }
    if base == "/" {
        return path.starts_with('/');
    }
    path.starts_with(base) && path.as_bytes().get(base.len()) == Some(&b'/')
}

fn invalid(path: &str, message: &str) -> Error {
    Error::InvalidPath {
        path: path.to_string(),
        message: message.to_string(),
    }
}
