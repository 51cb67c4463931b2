//! HTTP client for the remote database query endpoint
//!
//! `POST {base_url}/v1/databases/{database_id}/query` with a bearer token and
//! the API version header. Only the first page of results is read.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;

use super::errors::{RemoteError, RemoteResult};
use super::{QueryClient, QueryRequest, QueryResponse};

/// Connection settings for the remote database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub database_id: String,
    pub secret: String,
    pub api_version: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Full URL of the database query endpoint
    pub fn query_url(&self) -> String {
        format!(
            "{}/v1/databases/{}/query",
            self.base_url.trim_end_matches('/'),
            self.database_id
        )
    }
}

/// Query client backed by `reqwest`
pub struct HttpQueryClient {
    http: Client,
    url: String,
    secret: String,
    api_version: String,
}

impl HttpQueryClient {
    /// Builds a client; fails only if the TLS backend cannot be initialised
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.query_url(),
            secret: config.secret.clone(),
            api_version: config.api_version.clone(),
        })
    }

    async fn send(&self, request: QueryRequest) -> RemoteResult<QueryResponse> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.secret)
            .header("Notion-Version", &self.api_version)
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl QueryClient for HttpQueryClient {
    fn query(
        &self,
        request: QueryRequest,
    ) -> Pin<Box<dyn Future<Output = RemoteResult<QueryResponse>> + Send + '_>> {
        Box::pin(self.send(request))
    }
}
