//! Command-line argument definitions for the Stagehand CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, layout overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Stagehand layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram description (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Add literal endpoint coordinates for every connection to the output
    #[arg(long)]
    pub resolve: bool,

    /// Run the layout engine even if the diagram asks for manual layout
    #[arg(long)]
    pub auto: bool,
}
