use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{BaseSearchService, WebSearchQuery};

const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

/// Serper (Google search) API client
pub struct SerperClient {
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl SerperClient {
    /// Create a new Serper client
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            endpoint: SERPER_ENDPOINT.to_string(),
            client,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl BaseSearchService for SerperClient {
    async fn search(&self, query: &WebSearchQuery) -> Result<serde_json::Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(query)
            .send()
            .await
            .context("Failed to send Serper search request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Serper search failed");
            anyhow::bail!("Serper API error {}: {}", status, body);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Serper response")?;

        tracing::debug!(query = %query.q, "Serper search completed");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let client = SerperClient::new("key".into())
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/search");

        let query = WebSearchQuery {
            q: "site:instagram.com iphone".into(),
            gl: "az".into(),
            hl: "az".into(),
        };
        let err = client.search(&query).await.unwrap_err();
        assert!(err.to_string().contains("Failed to send Serper search request"));
    }
}
