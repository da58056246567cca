//! # Rm Command Implementation
//!
//! This module implements the `rm` subcommand, which removes a resource
//! mapping from the root package file through the same transactional
//! machinery the `add` command uses.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use resource_repo::defaults::DEFAULT_PACKAGE_FILENAME;
use resource_repo::operations::{RemoveMappingOperation, Transaction};
use resource_repo::package_file;
use resource_repo::path;
use resource_repo::suggestions;

/// Remove a resource mapping from the root package file
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Repository path of the mapping to remove
    #[arg(value_name = "PATH")]
    pub repository_path: String,

    /// Path to the root package file
    #[arg(short = 'f', long, default_value = DEFAULT_PACKAGE_FILENAME)]
    pub package_file: PathBuf,
}

/// Execute the `rm` command.
pub fn execute(args: RmArgs) -> Result<()> {
    let repository_path = path::canonicalize_path(&args.repository_path)?;

    if !args.package_file.exists() {
        return Err(suggestions::package_file_not_found(&args.package_file));
    }
    let mut file = package_file::load(&args.package_file)?;
    if !file.has_resource_mapping(&repository_path) {
        return Err(suggestions::mapping_not_found(
            &repository_path,
            &args.package_file,
        ));
    }

    let mut transaction = Transaction::new();
    transaction.push(Box::new(RemoveMappingOperation::new(&repository_path)));
    transaction.execute(&mut file)?;

    package_file::save(&file, &args.package_file)?;

    println!("Removed mapping {}", repository_path);
    Ok(())
}
