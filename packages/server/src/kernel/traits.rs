// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Routing and field mapping live in domains/search and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseScraper)

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::common::RawRecord;

// =============================================================================
// AI Trait (Infrastructure - LLM text completion)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// One completion for a system instruction and a user message.
    /// Returns the raw text of the first choice.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

// =============================================================================
// Scraper Trait (Infrastructure - listings / marketplace backends)
// =============================================================================

#[async_trait]
pub trait BaseScraper: Send + Sync {
    /// Scrape everything reachable from `locator`.
    ///
    /// Rows are returned by value and belong to this call only; two
    /// concurrent calls never observe each other's rows.
    async fn scrape(&self, locator: &str) -> Result<Vec<RawRecord>>;
}

// =============================================================================
// Search Service Trait (Infrastructure - web search API)
// =============================================================================

/// Query body sent to the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebSearchQuery {
    pub q: String,
    /// Country
    pub gl: String,
    /// Interface language
    pub hl: String,
}

#[async_trait]
pub trait BaseSearchService: Send + Sync {
    /// Run a search and return the provider's JSON body untouched.
    /// A non-success status is an error.
    async fn search(&self, query: &WebSearchQuery) -> Result<serde_json::Value>;
}
