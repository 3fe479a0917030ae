use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photoforged")]
#[command(author, version, about = "HTTP service that runs image action pipelines")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "PHOTOFORGED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run an action pipeline on a local image
    Process {
        /// Image to process; a bare name when --storage is given
        #[arg(required = true)]
        image: PathBuf,

        /// Actions as a JSON array, or @path to a file containing one
        #[arg(short, long)]
        actions: String,

        /// Directory holding the image; results are written there too
        #[arg(long)]
        storage: Option<PathBuf>,

        /// Check the actions without touching the image
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
