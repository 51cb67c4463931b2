//! CLI module for flatquery
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - query: One-shot resolution of a request read from stdin
//! - explain: One-shot decomposition plan of a request read from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{explain, query, run, run_command, run_explain, run_query, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_json};
