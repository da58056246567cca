//! # CLI Argument Parsing and Command Dispatch
//!
//! This module defines the command-line interface for the `resource-repo`
//! tool using the `clap` library. It is responsible for:
//!
//! - Defining the top-level CLI structure, including global arguments like
//!   `--color` and `--log-level`.
//! - Defining the available subcommands (`ls`, `add`, `rm`).
//! - Parsing the command-line arguments provided by the user.
//! - Dispatching to the appropriate command implementation based on the
//!   parsed arguments.
//!
//! Each subcommand is implemented in its own module under `src/commands/` to
//! keep the code organized and maintainable.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// Resource Repository - Manage cross-package resource mappings
#[derive(Parser, Debug)]
#[command(name = "resource-repo")]
#[command(
    version,
    about,
    long_about = "Resource Repository - Manage cross-package resource mappings"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Increase output verbosity (can be repeated: --verbose --verbose)
    ///
    /// Overrides --log-level when specified:
    ///   --verbose       = debug level
    ///   --verbose -v    = trace level
    #[arg(long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Suppress output except errors
    ///
    /// Overrides --log-level to show only error messages.
    /// Use for scripting or quiet operation.
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a resource mapping to the root package file
    Add(commands::add::AddArgs),

    /// List the resource mappings of the repository with their state
    Ls(commands::ls::LsArgs),

    /// Remove a resource mapping from the root package file
    Rm(commands::rm::RmArgs),
}

impl Cli {
    /// Execute the parsed CLI command
    pub fn execute(self) -> Result<()> {
        // Initialize logger based on log level
        self.init_logger()?;
        console::set_colors_enabled(self.should_use_color());

        match self.command {
            Commands::Add(args) => commands::add::execute(args),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Rm(args) => commands::rm::execute(args),
        }
    }

    /// Initialize the logger with the specified log level and color settings
    fn init_logger(&self) -> Result<()> {
        let log_level = self.parse_log_level()?;
        let use_color = self.should_use_color();

        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .write_style(if use_color {
                env_logger::WriteStyle::Auto
            } else {
                env_logger::WriteStyle::Never
            })
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

        Ok(())
    }

    /// Parse the log level, considering --verbose and --quiet flags
    ///
    /// Priority order:
    /// 1. --quiet (always sets to Error level)
    /// 2. --verbose (sets Debug for 1, Trace for 2+)
    /// 3. --log-level (explicit level)
    fn parse_log_level(&self) -> Result<LevelFilter> {
        // --quiet takes precedence: minimal output
        if self.quiet {
            return Ok(LevelFilter::Error);
        }

        // --verbose overrides --log-level
        if self.verbose > 0 {
            return Ok(match self.verbose {
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace, // 2+ means trace
            });
        }

        // Fall back to explicit --log-level
        match self.log_level.to_lowercase().as_str() {
            "error" => Ok(LevelFilter::Error),
            "warn" => Ok(LevelFilter::Warn),
            "info" => Ok(LevelFilter::Info),
            "debug" => Ok(LevelFilter::Debug),
            "trace" => Ok(LevelFilter::Trace),
            "off" => Ok(LevelFilter::Off),
            _ => Err(anyhow::anyhow!(
                "Invalid log level: '{}'. Valid options are: error, warn, info, debug, trace, off",
                self.log_level
            )),
        }
    }

    /// Determine whether to use color output based on the color setting
    fn should_use_color(&self) -> bool {
        match self.color.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            "auto" => console::Term::stdout().features().colors_supported(),
            _ => {
                // Default to auto if invalid value provided
                eprintln!(
                    "Warning: Invalid color option '{}', using 'auto'. Valid options are: always, never, auto",
                    self.color
                );
                console::Term::stdout().features().colors_supported()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cli_with(log_level: &str, verbose: u8, quiet: bool) -> Cli {
        Cli {
            command: Commands::Ls(commands::ls::LsArgs {
                package_file: PathBuf::from("resource-repo.json"),
                packages: PathBuf::from("packages.json"),
            }),
            color: "auto".to_string(),
            log_level: log_level.to_string(),
            verbose,
            quiet,
        }
    }

    #[test]
    fn test_parse_log_level_with_verbose() {
        // --verbose should override --log-level to debug
        assert_eq!(
            cli_with("info", 1, false).parse_log_level().unwrap(),
            LevelFilter::Debug
        );
    }

    #[test]
    fn test_parse_log_level_with_verbose_twice() {
        // --verbose --verbose should set trace level
        assert_eq!(
            cli_with("info", 2, false).parse_log_level().unwrap(),
            LevelFilter::Trace
        );
    }

    #[test]
    fn test_parse_log_level_with_quiet() {
        // --quiet should override to error level
        assert_eq!(
            cli_with("debug", 0, true).parse_log_level().unwrap(),
            LevelFilter::Error
        );
    }

    #[test]
    fn test_parse_log_level_default() {
        // Without --verbose or --quiet, should use --log-level
        assert_eq!(
            cli_with("warn", 0, false).parse_log_level().unwrap(),
            LevelFilter::Warn
        );
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(cli_with("loud", 0, false).parse_log_level().is_err());
    }
}
