//! Observability for flatquery
//!
//! - Structured logging (JSON lines)
//! - Counters for requests, remote calls and decompositions
//! - Lifecycle scopes for resolutions
//!
//! Observability is read-only: it never changes the outcome of a request.
//!
//! ```ignore
//! use flatquery::observability::{Event, Logger, MetricsRegistry};
//!
//! Logger::info("REMOTE_QUERY", &[("filtered", "true")]);
//! log_event_with_fields(Event::DecompositionSplit, &[("children", "3")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

/// Log a per-call event at TRACE level
pub fn trace_event(event: Event, fields: &[(&str, &str)]) {
    Logger::trace(event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::ServerStart);
        log_event(Event::Serving);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("port", "8000")]);
        trace_event(Event::RemoteQuery, &[("filtered", "false")]);
    }
}
