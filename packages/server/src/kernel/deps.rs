//! Server dependencies (using traits for testability)
//!
//! Central dependency container shared by every request. All external
//! services sit behind trait objects so tests can swap in mocks.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use apify_client::ApifyClient;

use crate::config::Config;
use crate::kernel::{
    ApifyScraper, BaseAI, BaseScraper, BaseSearchService, OpenAIChat, SerperClient,
};

/// Server dependencies accessible to request handlers
#[derive(Clone)]
pub struct ServerDeps {
    pub ai: Arc<dyn BaseAI>,
    /// Property listings backend (Bina.az)
    pub listings_scraper: Arc<dyn BaseScraper>,
    /// Classifieds backend (Tap.az)
    pub marketplace_scraper: Arc<dyn BaseScraper>,
    pub search: Arc<dyn BaseSearchService>,
    /// Classifier system instruction, loaded once at startup
    pub instructions: Arc<str>,
    /// Deadline for one classification call
    pub ai_timeout: Duration,
}

/// Classification deadline when none is configured.
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(60);

impl ServerDeps {
    pub fn new(
        ai: Arc<dyn BaseAI>,
        listings_scraper: Arc<dyn BaseScraper>,
        marketplace_scraper: Arc<dyn BaseScraper>,
        search: Arc<dyn BaseSearchService>,
        instructions: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            ai,
            listings_scraper,
            marketplace_scraper,
            search,
            instructions: instructions.into(),
            ai_timeout: DEFAULT_AI_TIMEOUT,
        }
    }

    pub fn with_ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = timeout;
        self
    }

    /// Wire the production clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let instructions = config.load_instructions()?;

        let ai = OpenAIChat::new(config.openai_api_key.clone(), config.openai_model.clone())
            .with_timeout(config.openai_timeout);

        let apify = ApifyClient::new(config.apify_token.clone());
        let listings = ApifyScraper::new(apify.clone(), config.bina_actor_id.clone());
        let marketplace = ApifyScraper::new(apify, config.tapaz_actor_id.clone());

        let search = SerperClient::new(config.serper_api_key.clone())?;

        Ok(Self::new(
            Arc::new(ai),
            Arc::new(listings),
            Arc::new(marketplace),
            Arc::new(search),
            instructions,
        )
        .with_ai_timeout(config.openai_timeout))
    }
}
