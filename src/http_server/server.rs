//! # HTTP Server
//!
//! Combines the query and observability routers behind CORS and request
//! logging.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use uuid::Uuid;

use super::errors::ApiError;
use super::observability_routes::observability_routes;
use super::query_routes::query_routes;
use super::state::AppState;
use crate::config::ServiceConfig;
use crate::executor::QueryResolver;
use crate::observability::{log_event_with_fields, Event, Logger, Timer};

/// HTTP server for the query API
pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    /// Create a server answering from `resolver`
    pub fn new(config: &ServiceConfig, resolver: QueryResolver) -> Self {
        let state = Arc::new(AppState::new(resolver, config.max_nesting_level));
        Self {
            addr: config.socket_addr(),
            router: Self::build_router(config, state),
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServiceConfig, state: Arc<AppState>) -> Router {
        let origins = if config.cors_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            AllowOrigin::list(origins)
        };

        let cors = CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .merge(observability_routes(state.clone()))
            .merge(query_routes(state.clone()))
            .fallback(not_found_handler)
            .layer(cors)
            .layer(middleware::from_fn_with_state(state, log_requests))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        log_event_with_fields(Event::ServerStart, &[("addr", self.addr.as_str())]);

        let listener = match TcpListener::bind(self.addr.as_str()).await {
            Ok(listener) => listener,
            Err(e) => {
                log_event_with_fields(
                    Event::StartupFailed,
                    &[("addr", self.addr.as_str()), ("reason", e.to_string().as_str())],
                );
                return Err(e);
            }
        };

        let local = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", local.as_str())]);

        axum::serve(listener, self.router).await
    }
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

/// Logs every request with a generated request id
async fn log_requests(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let timer = Timer::new();

    state.metrics.increment_requests();
    Logger::info(
        Event::RequestReceived.as_str(),
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
        ],
    );

    let mut response = next.run(request).await;

    Logger::info(
        Event::RequestComplete.as_str(),
        &[
            ("elapsed_ms", timer.elapsed_ms().as_str()),
            ("request_id", request_id.as_str()),
            ("status", response.status().as_str()),
        ],
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
