use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "vivigen",
    about = "Generates Vivian prototype functional-specification artifacts from a project specification",
    version,
    author,
    long_about = None
)]
pub struct VivigenCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file (defaults to vivigen.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the five artifact files from a project specification
    Generate {
        /// Path to the project specification file
        #[arg(short, long)]
        spec: PathBuf,

        /// Directory holding the official docs bundled into the prompt
        #[arg(short, long)]
        docs_dir: Option<PathBuf>,

        /// Output directory for the artifacts
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Model to request from the generation service
        #[arg(short, long)]
        model: Option<String>,

        /// Response mapping (per-section, combined)
        #[arg(long)]
        mode: Option<String>,

        /// Ask before overwriting existing artifacts
        #[arg(short, long, default_value = "false")]
        interactive: bool,
    },

    /// Check that the configuration resolves without calling the service
    Check,
}
