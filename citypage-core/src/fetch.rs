use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::TransportError;

/// Retrieves a document body by URL. The only suspension point of the client.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    async fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

/// [`Fetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Client with an optional request timeout, optionally skipping certificate checks.
    pub fn with_options(
        timeout: Option<Duration>,
        accept_invalid_certs: bool,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder().danger_accept_invalid_certs(accept_invalid_certs);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(TransportError::Client)?;
        Ok(Self { http })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        debug!(url, "Fetching document");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| TransportError::Body {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        debug!(url, bytes = body.len(), "Fetched document");
        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
