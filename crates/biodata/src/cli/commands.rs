//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::validate::RawSubmission;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `server.bind`)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Submit command arguments.
///
/// Every field is optional on the command line so that missing values are
/// reported by the validator, all at once, instead of by clap.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Full name
    #[arg(long, default_value = "")]
    pub nama: String,

    /// Student identification number
    #[arg(long, default_value = "")]
    pub nim: String,

    /// Study program (e.g. "Informatika")
    #[arg(long, default_value = "")]
    pub prodi: String,

    /// Gender ("Laki-laki" or "Perempuan")
    #[arg(long, default_value = "")]
    pub gender: String,

    /// Hobby; repeat for several
    #[arg(long)]
    pub hobi: Vec<String>,

    /// Address
    #[arg(long, default_value = "")]
    pub alamat: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl From<SubmitCommand> for RawSubmission {
    fn from(cmd: SubmitCommand) -> Self {
        Self {
            nama: cmd.nama,
            nim: cmd.nim,
            prodi: cmd.prodi,
            gender: cmd.gender,
            hobi: cmd.hobi,
            alamat: cmd.alamat,
        }
    }
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Matched against name, student id and program, ignoring case
    pub query: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_command_into_raw() {
        let cmd = SubmitCommand {
            nama: "Rin".to_string(),
            nim: "3337240001".to_string(),
            prodi: "Informatika".to_string(),
            gender: "Perempuan".to_string(),
            hobi: vec!["Musik".to_string(), "Coding".to_string()],
            alamat: "Jl. A".to_string(),
            json: false,
        };
        let raw = RawSubmission::from(cmd);
        assert_eq!(raw.nama, "Rin");
        assert_eq!(raw.hobi, vec!["Musik", "Coding"]);
    }

    #[test]
    fn test_status_command_debug() {
        let cmd = StatusCommand { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
