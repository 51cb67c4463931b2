//! Remote query errors
//!
//! The resolver never interprets or retries these; they propagate unchanged.

use thiserror::Error;

/// Result type for remote queries
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failures surfaced by a remote query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Request could not be sent or the connection failed
    #[error("Remote query transport failed: {0}")]
    Transport(String),

    /// Remote service answered with a non-success status
    #[error("Remote query failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a query result
    #[error("Remote query returned an undecodable body: {0}")]
    Decode(String),

    /// Query refused by the client itself
    #[error("Remote query rejected: {0}")]
    Rejected(String),
}

impl RemoteError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            RemoteError::Transport(_) => "FLATQUERY_REMOTE_TRANSPORT",
            RemoteError::Status { .. } => "FLATQUERY_REMOTE_STATUS",
            RemoteError::Decode(_) => "FLATQUERY_REMOTE_DECODE",
            RemoteError::Rejected(_) => "FLATQUERY_REMOTE_REJECTED",
        }
    }
}
