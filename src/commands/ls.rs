//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists every resource
//! mapping of the repository together with its state.
//!
//! ## Functionality
//!
//! - **Mapping Listing**: Shows the mappings of the root package and of every
//!   installed package, grouped by package
//! - **State Readout**: Each mapping is shown as Enabled, NotFound or Conflict
//! - **Conflict Report**: Contested repository paths are listed with the
//!   packages claiming them
//! - **Load Errors**: References that failed to resolve are reported per
//!   mapping
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use resource_repo::defaults::{DEFAULT_INSTALL_FILENAME, DEFAULT_PACKAGE_FILENAME};
use resource_repo::mapping::{MappingState, ResourceMapping};
use resource_repo::package::{self, PackageCollection};
use resource_repo::package_file;
use resource_repo::repository::RepositoryView;
use resource_repo::suggestions;

/// List the resource mappings of the repository with their state
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the root package file
    #[arg(short = 'f', long, default_value = DEFAULT_PACKAGE_FILENAME)]
    pub package_file: PathBuf,

    /// Path to the install list of packages
    #[arg(short, long, default_value = DEFAULT_INSTALL_FILENAME)]
    pub packages: PathBuf,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    if !args.package_file.exists() {
        return Err(suggestions::package_file_not_found(&args.package_file));
    }
    let root_file = package_file::load(&args.package_file)?;
    let root_dir = args
        .package_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."))
        .to_path_buf();

    let packages = if args.packages.exists() {
        package::load_install_list(&args.packages)?
    } else {
        PackageCollection::new()
    };

    let view = RepositoryView::load(&root_file, &root_dir, packages)?;

    print_mappings(&view);
    print_conflicts(&view);
    print_load_errors(view.mappings())?;

    Ok(())
}

fn print_mappings(view: &RepositoryView) {
    let path_width = view
        .mappings()
        .iter()
        .map(|mapping| mapping.repository_path().len())
        .max()
        .unwrap_or(0);

    for name in view.packages().sorted_names() {
        let mappings: Vec<&ResourceMapping> = view
            .mappings()
            .iter()
            .filter(|mapping| {
                mapping
                    .containing_package()
                    .map(|package| package.name() == name)
                    .unwrap_or(false)
            })
            .collect();
        if mappings.is_empty() {
            continue;
        }

        println!("{}", style(&name).bold());
        for mapping in mappings {
            println!(
                "  {:<path_width$}  {}  {}",
                mapping.repository_path(),
                styled_state(mapping.state()),
                mapping.path_references().join(", "),
            );
        }
        println!();
    }

    let total = view.mappings().len();
    println!("{} mapping(s)", total);
}

fn styled_state(state: MappingState) -> String {
    // Pad before styling so the ANSI codes do not skew the column width.
    let label = format!("{state:<8}");
    let styled = match state {
        MappingState::Enabled => style(label).green(),
        MappingState::NotFound => style(label).yellow(),
        MappingState::Conflict => style(label).red(),
        MappingState::Unloaded => style(label).dim(),
    };
    styled.to_string()
}

fn print_conflicts(view: &RepositoryView) {
    let conflicts = view.conflicts();
    if conflicts.is_empty() {
        return;
    }

    println!();
    println!("{} conflict(s):", conflicts.len());
    for conflict in conflicts {
        let claimants: Vec<String> = conflict
            .mappings()
            .iter()
            .filter_map(|mapping| mapping.containing_package().ok())
            .map(|package| package.name().to_string())
            .collect();
        println!(
            "  {} claimed by: {}",
            style(conflict.repository_path()).red(),
            claimants.join(", ")
        );
    }
}

fn print_load_errors(mappings: &[ResourceMapping]) -> Result<()> {
    let mut total = 0;
    let mut lines = Vec::new();
    for mapping in mappings {
        let errors = mapping.load_errors()?;
        total += errors.len();
        for error in errors.iter() {
            lines.push(format!("  {}", error));
        }
    }
    if total == 0 {
        return Ok(());
    }

    println!();
    println!("{} load error(s):", total);
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
