//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Festival equipment reconciliation.
///
/// Checks artist tech riders against the production inventory and
/// computes true peak simultaneous demand per equipment model.
#[derive(Debug, Parser)]
#[command(name = "rider", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check each artist's requests against the stage inventory.
    Check {
        /// Production file; overrides the configured path.
        file: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute peak simultaneous demand per equipment model.
    Peaks {
        /// Production file; overrides the configured path.
        file: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Output as CSV.
        #[arg(long, conflicts_with = "json")]
        csv: bool,
    },

    /// Report additional equipment to source beyond current stock.
    Needs {
        /// Production file; overrides the configured path.
        file: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
