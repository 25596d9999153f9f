//! Command-line interface for biodata.
//!
//! This module provides the CLI structure and output rendering for the
//! `biodata` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ListCommand, SearchCommand, ServeCommand, StatusCommand, SubmitCommand,
};

/// biodata - Collect, store and search student biodata
///
/// Serves the biodata form endpoints over HTTP and offers the same
/// submit/search/list operations from the command line.
#[derive(Debug, Parser)]
#[command(name = "biodata")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Validate and store one submission
    Submit(SubmitCommand),

    /// Search stored records
    Search(SearchCommand),

    /// List all stored records
    List(ListCommand),

    /// Show record store status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
