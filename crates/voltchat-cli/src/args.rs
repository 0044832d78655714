//! Command-line argument definitions for the Voltchat CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, validation-only mode and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Voltchat reply renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a file holding one captured model reply
    #[arg(help = "Path to the captured reply")]
    pub input: String,

    /// Path to the output SVG file, written when the reply is a diagram
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Validate the diagram payload and report diagnostics without rendering
    #[arg(long)]
    pub check: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
