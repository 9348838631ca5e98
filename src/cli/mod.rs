//! CLI module for hxparse
//!
//! This module provides the command-line interface over the parser.
//!
//! ## Commands
//!
//! - `check <PATH>...` - Parse files (or every `.hx` file under a directory) and report diagnostics
//! - `tree <FILE> [--json]` - Print the syntax tree as an S-expression or JSON
//! - `tokens <FILE>` - Print the token stream, trivia included
//!
//! With no subcommand, `hxparse FILE` checks `FILE`.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use hxparse_syntax::ParseConfig;
use hxparse_syntax::config::DEFAULT_MAX_DEPTH;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Error-tolerant, lossless parser for Haxe source
#[derive(Parser, Debug)]
#[command(name = "hxparse")]
#[command(version = VERSION)]
#[command(about = "Error-tolerant, lossless parser for Haxe source", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum grammar nesting before a subtree is abandoned
    #[arg(long = "max-depth", value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    pub max_depth: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse files and report diagnostics
    Check {
        /// Files or directories (searched recursively for `.hx` files)
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the syntax tree
    Tree {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Emit JSON (with trivia and spans) instead of an S-expression
        #[arg(long)]
        json: bool,
    },

    /// Print the token stream
    Tokens {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = ParseConfig::new().with_max_depth(cli.max_depth);

    match cli.command {
        Some(Command::Check { paths }) => commands::check_paths(&paths, &config),
        Some(Command::Tree { file, json }) => commands::print_tree(&file, json, &config),
        Some(Command::Tokens { file }) => commands::print_tokens(&file),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_paths(&[file], &config)
            } else {
                Err(CliError::failure("Error: no input file (see `hxparse --help`)"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["hxparse", "check", "a.hx", "src/"]).unwrap();
        if let Some(Command::Check { paths }) = cli.command {
            assert_eq!(paths, vec![PathBuf::from("a.hx"), PathBuf::from("src/")]);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_check_requires_a_path() {
        assert!(Cli::try_parse_from(["hxparse", "check"]).is_err());
    }

    #[test]
    fn test_cli_parse_tree_json() {
        let cli = Cli::try_parse_from(["hxparse", "tree", "a.hx", "--json"]).unwrap();
        if let Some(Command::Tree { json, .. }) = cli.command {
            assert!(json);
        } else {
            panic!("Expected Tree command");
        }
    }

    #[test]
    fn test_cli_parse_tokens() {
        let cli = Cli::try_parse_from(["hxparse", "tokens", "a.hx"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Tokens { .. })));
    }

    #[test]
    fn test_cli_default_file() {
        let cli = Cli::try_parse_from(["hxparse", "Main.hx"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("Main.hx")));
        assert_eq!(cli.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_cli_max_depth() {
        let cli = Cli::try_parse_from(["hxparse", "tree", "a.hx", "--max-depth", "16"]).unwrap();
        assert_eq!(cli.max_depth, 16);
    }
}
