//! HTTP remote: GET returns the quote list, POST accepts one new quote.

use super::RemoteSource;
use crate::error::{QuipError, Result};
use crate::model::Quote;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct HttpRemote {
    client: Client,
    url: String,
}

impl HttpRemote {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuipError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, url))
    }

    /// Create a remote with an existing reqwest client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch(&self) -> Result<Value> {
        debug!(url = %self.url, "fetching remote quotes");
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| QuipError::Transport(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(QuipError::Transport(format!("status: {}", resp.status())));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| QuipError::Parse(format!("remote response is not JSON: {}", e)))
    }

    async fn push(&self, quote: &Quote) -> Result<()> {
        let resp = self
            .client
            .post(&self.url)
            .json(quote)
            .send()
            .await
            .map_err(|e| QuipError::Transport(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(QuipError::Transport(format!("status: {}", resp.status())));
        }
        debug!(status = %resp.status(), "pushed quote to remote");
        Ok(())
    }
}
