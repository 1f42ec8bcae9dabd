//! Command-line argument definitions for the ddags CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the snapshot, the models to resolve, the
//! output destination, configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the ddags schema resolver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input snapshot file
    #[arg(help = "Path to the JSON model snapshot")]
    pub input: String,

    /// Model to resolve; may be repeated. Resolves every model when omitted
    #[arg(short, long = "model", value_name = "ID")]
    pub models: Vec<String>,

    /// Path to the output JSON file. Writes to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Pretty-print the JSON output, overriding the configuration file
    #[arg(long)]
    pub pretty: bool,
}
