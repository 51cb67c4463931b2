//! Observable events
//!
//! Events are explicit and typed. Scoped operations (`RESOLVE`)
//! derive their `_BEGIN`/`_COMPLETE`/`_FAILED` names in `ObservationScope`.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP server binding
    ServerStart,
    /// HTTP server accepting requests
    Serving,
    /// Startup failed (FATAL)
    StartupFailed,

    // Requests
    /// HTTP request received
    RequestReceived,
    /// HTTP request answered
    RequestComplete,

    // Resolution
    /// Filter or sort failed validation
    FilterRejected,
    /// Group exceeded the nesting limit and was split
    DecompositionSplit,
    /// Child results merged
    MergeComplete,
    /// Single request sent to the remote service
    RemoteQuery,
    /// Remote service call failed
    RemoteQueryFailed,
    /// Decomposition plan reported without remote calls
    ExplainComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::Serving => "SERVER_SERVING",
            Event::StartupFailed => "STARTUP_FAILED",

            Event::RequestReceived => "REQUEST_RECEIVED",
            Event::RequestComplete => "REQUEST_COMPLETE",

            Event::FilterRejected => "FILTER_REJECTED",
            Event::DecompositionSplit => "DECOMPOSITION_SPLIT",
            Event::MergeComplete => "MERGE_COMPLETE",
            Event::RemoteQuery => "REMOTE_QUERY",
            Event::RemoteQueryFailed => "REMOTE_QUERY_FAILED",
            Event::ExplainComplete => "EXPLAIN_COMPLETE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StartupFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
