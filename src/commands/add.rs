//! # Add Command Implementation
//!
//! This module implements the `add` subcommand, which adds a resource mapping
//! to an existing or new root package file.
//!
//! ## Functionality
//!
//! - **Path Normalization**: The repository path argument is canonicalized
//!   before use (`/app//views/` becomes `/app/views`)
//! - **Transactional Update**: The mapping is added through an atomic
//!   operation, so a failure leaves the in-memory file untouched
//! - **Replace Semantics**: Adding a path that already has a mapping replaces
//!   the previous mapping

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use resource_repo::defaults::{DEFAULT_PACKAGE_FILENAME, DEFAULT_ROOT_PACKAGE_NAME};
use resource_repo::mapping::ResourceMapping;
use resource_repo::operations::{AddMappingOperation, Transaction};
use resource_repo::package_file::{self, RootPackageFile};
use resource_repo::path;

/// Add a resource mapping to the root package file
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Repository path to map (e.g. /app/views)
    #[arg(value_name = "PATH")]
    pub repository_path: String,

    /// Path references, relative to the package or using @vendor/name:path
    #[arg(value_name = "REFERENCE", required = true, num_args = 1..)]
    pub path_references: Vec<String>,

    /// Path to the root package file
    #[arg(short = 'f', long, default_value = DEFAULT_PACKAGE_FILENAME)]
    pub package_file: PathBuf,
}

/// Execute the `add` command.
///
/// Loads the root package file (creating an empty one if the file does not
/// exist yet), adds the mapping through a transaction and persists the
/// result.
pub fn execute(args: AddArgs) -> Result<()> {
    let repository_path = path::canonicalize_path(&args.repository_path)?;

    let mut file = if args.package_file.exists() {
        package_file::load(&args.package_file)?
    } else {
        println!("Creating {}", args.package_file.display());
        RootPackageFile::new(DEFAULT_ROOT_PACKAGE_NAME)
    };
    let replacing = file.has_resource_mapping(&repository_path);

    let mapping = ResourceMapping::new(&repository_path, args.path_references.clone())?;
    let mut transaction = Transaction::new();
    transaction.push(Box::new(AddMappingOperation::new(mapping)));
    transaction.execute(&mut file)?;

    package_file::save(&file, &args.package_file)?;

    if replacing {
        println!(
            "Replaced mapping {} -> {}",
            repository_path,
            args.path_references.join(", ")
        );
    } else {
        println!(
            "Added mapping {} -> {}",
            repository_path,
            args.path_references.join(", ")
        );
    }
    Ok(())
}
