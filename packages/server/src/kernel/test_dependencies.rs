// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BaseAI, BaseScraper, BaseSearchService, ServerDeps, WebSearchQuery};
use crate::common::RawRecord;

// =============================================================================
// Mock AI
// =============================================================================

/// Arguments captured from a completion call
#[derive(Debug, Clone)]
pub struct CompletionCall {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[derive(Clone, Default)]
pub struct MockAI {
    responses: Arc<Mutex<Vec<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<CompletionCall>>>,
    delay: Option<Duration>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completion text
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    /// Queue an upstream failure
    pub fn with_error(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    /// Hold every completion for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(CompletionCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            anyhow::bail!("MockAI: no response queued");
        }
        responses.remove(0).map_err(anyhow::Error::msg)
    }
}

// =============================================================================
// Mock Scraper
// =============================================================================

#[derive(Clone, Default)]
pub struct MockScraper {
    responses: Arc<Mutex<Vec<Result<Vec<RawRecord>, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockScraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next scrape
    pub fn with_rows(self, rows: Vec<RawRecord>) -> Self {
        self.responses.lock().unwrap().push(Ok(rows));
        self
    }

    /// Queue a backend failure
    pub fn with_error(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    /// Locators passed to scrape, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self) -> bool {
        !self.calls.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl BaseScraper for MockScraper {
    async fn scrape(&self, locator: &str) -> Result<Vec<RawRecord>> {
        self.calls.lock().unwrap().push(locator.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(Vec::new());
        }
        responses.remove(0).map_err(anyhow::Error::msg)
    }
}

// =============================================================================
// Mock Search Service
// =============================================================================

#[derive(Clone, Default)]
pub struct MockSearchService {
    responses: Arc<Mutex<Vec<Result<serde_json::Value, String>>>>,
    calls: Arc<Mutex<Vec<WebSearchQuery>>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw JSON body
    pub fn with_body(self, body: serde_json::Value) -> Self {
        self.responses.lock().unwrap().push(Ok(body));
        self
    }

    /// Queue a provider failure (e.g. non-success status)
    pub fn with_error(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<WebSearchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseSearchService for MockSearchService {
    async fn search(&self, query: &WebSearchQuery) -> Result<serde_json::Value> {
        self.calls.lock().unwrap().push(query.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(serde_json::json!({ "organic": [] }));
        }
        responses.remove(0).map_err(anyhow::Error::msg)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub const TEST_INSTRUCTIONS: &str = "Classify the request as a Python dict.";

/// Builder for ServerDeps backed by mocks.
///
/// Mocks are cheap clones sharing state, so tests keep a handle to inspect
/// recorded calls after the request.
#[derive(Clone, Default)]
pub struct TestDependencies {
    pub ai: MockAI,
    pub listings: MockScraper,
    pub marketplace: MockScraper,
    pub search: MockSearchService,
    pub ai_timeout: Option<Duration>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = ai;
        self
    }

    pub fn mock_listings(mut self, scraper: MockScraper) -> Self {
        self.listings = scraper;
        self
    }

    pub fn mock_marketplace(mut self, scraper: MockScraper) -> Self {
        self.marketplace = scraper;
        self
    }

    pub fn mock_search(mut self, search: MockSearchService) -> Self {
        self.search = search;
        self
    }

    pub fn ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = Some(timeout);
        self
    }

    pub fn into_server_deps(self) -> ServerDeps {
        let deps = ServerDeps::new(
            Arc::new(self.ai),
            Arc::new(self.listings),
            Arc::new(self.marketplace),
            Arc::new(self.search),
            TEST_INSTRUCTIONS,
        );
        match self.ai_timeout {
            Some(timeout) => deps.with_ai_timeout(timeout),
            None => deps,
        }
    }
}
