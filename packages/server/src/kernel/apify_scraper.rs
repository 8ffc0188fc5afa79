//! Scraping backends hosted as Apify actors.
//!
//! The actor receives the locator as its single start URL and pushes one
//! dataset item per scraped row. Every run gets a fresh dataset, so rows are
//! isolated per call.

use anyhow::{Context, Result};
use apify_client::{ApifyClient, StartUrlsInput};
use async_trait::async_trait;
use tracing::{info, warn};

use super::BaseScraper;
use crate::common::RawRecord;

pub struct ApifyScraper {
    client: ApifyClient,
    actor_id: String,
}

impl ApifyScraper {
    pub fn new(client: ApifyClient, actor_id: impl Into<String>) -> Self {
        Self {
            client,
            actor_id: actor_id.into(),
        }
    }
}

#[async_trait]
impl BaseScraper for ApifyScraper {
    async fn scrape(&self, locator: &str) -> Result<Vec<RawRecord>> {
        info!(actor_id = %self.actor_id, locator, "Starting scraper run");

        let rows: Vec<RawRecord> = self
            .client
            .run_actor(&self.actor_id, &StartUrlsInput::single(locator))
            .await
            .map_err(|e| {
                warn!(actor_id = %self.actor_id, error = %e, "Scraper run failed");
                e
            })
            .with_context(|| format!("actor {} failed", self.actor_id))?;

        Ok(rows)
    }
}
