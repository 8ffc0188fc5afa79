//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor runs,
//! polling for completion, and fetching dataset results. Each run writes to
//! its own default dataset, so results of concurrent runs never mix.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{ApifyClient, StartUrlsInput};
//!
//! let client = ApifyClient::new("your-api-token".into());
//!
//! let rows: Vec<serde_json::Value> = client
//!     .run_actor("someone~listings-scraper", &StartUrlsInput::single(url))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{RunData, RunStatus, StartUrl, StartUrlsInput};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Each poll long-waits this many seconds server-side.
const WAIT_FOR_FINISH_SECS: u32 = 60;

const DEFAULT_MAX_POLLS: u32 = 10;

#[derive(Clone)]
pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    max_polls: u32,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Give up on a run after this many long-polls.
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls.max(1);
        self
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let api_resp: ApiResponse<RunData> = Self::parse(resp).await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish` for long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        let mut last_status = String::new();
        for _ in 0..self.max_polls {
            let url = format!(
                "{}/actor-runs/{}?waitForFinish={}",
                self.base_url, run_id, WAIT_FOR_FINISH_SECS
            );
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let api_resp: ApiResponse<RunData> = Self::parse(resp).await?;
            match api_resp.data.run_status() {
                RunStatus::Succeeded => return Ok(api_resp.data),
                RunStatus::Failed => return Err(ApifyError::RunFailed(api_resp.data.status)),
                RunStatus::Running => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                    last_status = api_resp.data.status;
                }
            }
        }

        Err(ApifyError::PollLimit {
            run_id: run_id.to_string(),
            status: last_status,
            polls: self.max_polls,
        })
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!(
            "{}/datasets/{}/items?format=json&clean=true",
            self.base_url, dataset_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::parse(resp).await
    }

    /// Run an actor end-to-end: start run, poll, fetch its dataset.
    pub async fn run_actor<I, T>(&self, actor_id: &str, input: &I) -> Result<Vec<T>>
    where
        I: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let run = self.start_run(actor_id, input).await?;
        tracing::info!(actor_id, run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            duration_ms = completed.duration_ms(),
            "Run completed, fetching results"
        );

        let items: Vec<T> = self.get_dataset_items(&completed.default_dataset_id).await?;
        tracing::info!(actor_id, count = items.len(), "Fetched dataset items");

        Ok(items)
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(resp.json().await?)
    }
}
