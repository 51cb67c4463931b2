//! CLI command implementations
//!
//! Every command loads configuration first (file, then environment), then
//! builds the resolver from it. `explain` never calls the remote API, so it
//! loads without credentials and plans against an empty in-memory client.
//! `query` and `explain` keep stdout for their JSON output and send log lines
//! to stderr.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::executor::QueryResolver;
use crate::http_server::HttpServer;
use crate::observability::Logger;
use crate::records::map_records;
use crate::remote::{HttpQueryClient, MemoryQueryClient};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Query {
            config,
            max_nesting_level,
        } => query(config.as_deref(), max_nesting_level),
        Command::Explain {
            config,
            max_nesting_level,
        } => explain(config.as_deref(), max_nesting_level),
    }
}

/// Start the HTTP server and serve until the process is stopped
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
        config.validate()?;
    }

    let resolver = build_resolver(&config)?;
    let server = HttpServer::new(&config, resolver);

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Resolve one request from stdin and print the mapped records
pub fn query(config_path: Option<&Path>, max_nesting_level: Option<usize>) -> CliResult<()> {
    Logger::redirect_to_stderr();
    let config = load_config(config_path)?;
    let resolver = build_resolver(&config)?;
    let default_max = max_nesting_level.unwrap_or(config.max_nesting_level);

    run_query(&resolver, default_max, io::stdin().lock(), io::stdout().lock())
}

/// Print the decomposition plan for one request from stdin
pub fn explain(config_path: Option<&Path>, max_nesting_level: Option<usize>) -> CliResult<()> {
    Logger::redirect_to_stderr();
    let config = ServiceConfig::load_offline(config_path)?;
    Logger::set_min_severity(config.log_level);
    let resolver = offline_resolver(&config);
    let default_max = max_nesting_level.unwrap_or(config.max_nesting_level);

    run_explain(&resolver, default_max, io::stdin().lock(), io::stdout().lock())
}

/// Resolves a request read from `input` and writes the records to `output`
pub fn run_query<R: Read, W: Write>(
    resolver: &QueryResolver,
    default_max_nesting_level: usize,
    input: R,
    output: W,
) -> CliResult<()> {
    let request = read_request(input)?;
    let records = runtime()?.block_on(resolver.resolve_request(&request, default_max_nesting_level))?;

    write_json(output, &map_records(&records))
}

/// Plans a request read from `input` and writes the plan to `output`
pub fn run_explain<R: Read, W: Write>(
    resolver: &QueryResolver,
    default_max_nesting_level: usize,
    input: R,
    output: W,
) -> CliResult<()> {
    let request = read_request(input)?;
    let plan = resolver.explain(&request, default_max_nesting_level)?;

    write_json(output, &plan)
}

fn load_config(config_path: Option<&Path>) -> CliResult<ServiceConfig> {
    let config = ServiceConfig::load(config_path)?;
    Logger::set_min_severity(config.log_level);
    Ok(config)
}

fn build_resolver(config: &ServiceConfig) -> CliResult<QueryResolver> {
    let client = HttpQueryClient::new(&config.remote_config())
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    Ok(QueryResolver::new(
        Arc::new(client),
        Arc::new(config.schema.clone()),
    ))
}

fn offline_resolver(config: &ServiceConfig) -> QueryResolver {
    QueryResolver::new(
        Arc::new(MemoryQueryClient::new()),
        Arc::new(config.schema.clone()),
    )
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}
