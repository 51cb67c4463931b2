//! flatquery - nested filter resolution for depth-limited databases
//!
//! Validates AND/OR filter trees against a property schema and, when a tree
//! nests deeper than the remote service accepts, resolves its subtrees as
//! separate queries and merges the results by record id.

pub mod cli;
pub mod config;
pub mod executor;
pub mod filter;
pub mod http_server;
pub mod observability;
pub mod records;
pub mod remote;
pub mod schema;
