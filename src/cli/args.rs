//! CLI argument definitions using clap
//!
//! Commands:
//! - flatquery serve [--config <path>] [--port <n>]
//! - flatquery query [--config <path>] [--max-nesting-level <n>]
//! - flatquery explain [--config <path>] [--max-nesting-level <n>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// flatquery - nested filter resolution for depth-limited databases
#[derive(Parser, Debug)]
#[command(name = "flatquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding configuration and environment
        #[arg(long)]
        port: Option<u16>,
    },

    /// Resolve one request read from stdin and print the records
    Query {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Nesting limit for requests that do not carry one
        #[arg(long)]
        max_nesting_level: Option<usize>,
    },

    /// Print the decomposition plan for a request read from stdin
    Explain {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Nesting limit for requests that do not carry one
        #[arg(long)]
        max_nesting_level: Option<usize>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
