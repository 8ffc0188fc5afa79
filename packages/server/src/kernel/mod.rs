//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod apify_scraper;
pub mod deps;
pub mod serper_client;
pub mod test_dependencies;
pub mod traits;

pub use ai::{OpenAIChat, GPT_4O_MINI};
pub use apify_scraper::ApifyScraper;
pub use deps::ServerDeps;
pub use serper_client::SerperClient;
pub use test_dependencies::{MockAI, MockScraper, MockSearchService, TestDependencies};
pub use traits::*;
