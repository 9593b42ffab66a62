//! Command-line interface definitions for reportkit

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the reportkit application
#[derive(Parser)]
#[command(name = "reportkit")]
#[command(version)]
#[command(about = "Structured report assembly to .docx", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for reportkit
#[derive(Subcommand)]
pub enum Commands {
    /// Build a report manifest into a .docx file
    Build {
        /// Report manifest (TOML)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Output file (defaults to the manifest's `output` setting)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the node structure of a .docx file
    Inspect {
        /// The .docx file to read
        #[arg(value_name = "DOCX")]
        path: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the style catalog
    Styles,
}
