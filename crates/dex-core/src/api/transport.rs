//! The HTTP seam of the data client.
//!
//! [`Transport`] performs a single GET and returns the body. The production
//! implementation is [`HttpTransport`] (`reqwest`); tests substitute an
//! in-memory transport.

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};

/// Fetches the body of a URL.
///
/// Any transport failure or non-success status must be reported as
/// [`CoreError::RemoteUnavailable`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &str) -> CoreResult<String>;
}

/// `reqwest`-backed transport. No timeout and no retry are applied.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client (shared connection pool, custom headers).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> CoreResult<String> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::remote(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::remote(url, format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| CoreError::remote(url, e))
    }
}
