//! Source adapters: build a backend locator, invoke the backend, and map
//! its rows onto normalized records.

pub mod listings;
pub mod marketplace;
pub mod social;

pub use listings::{listings_locator, search_listings, ListingsQuery};
pub use marketplace::{encode_keywords, marketplace_locator, search_marketplace};
pub use social::{search_social, social_query};

use crate::common::RawRecord;
use crate::domains::search::error::{RecordError, SearchError};
use crate::domains::search::models::{ItemQuery, NormalizedRecord};
use crate::kernel::ServerDeps;

/// Text of a required column.
pub(crate) fn column(row_index: usize, row: &RawRecord, column: usize) -> Result<String, RecordError> {
    row.text(column).ok_or(RecordError::MissingColumn {
        row: row_index,
        column,
        width: row.len(),
    })
}

/// Marketplace ads followed by social posts.
///
/// Both backends are queried concurrently. The marketplace result is
/// inspected first, so its error wins when both fail, and a social failure
/// discards the marketplace rows.
pub async fn search_marketplace_and_social(
    deps: &ServerDeps,
    query: &ItemQuery,
) -> Result<Vec<NormalizedRecord>, SearchError> {
    let (marketplace, social) = tokio::join!(
        search_marketplace(deps.marketplace_scraper.as_ref(), query),
        search_social(deps.search.as_ref(), &query.item),
    );

    let mut data = marketplace?;
    data.extend(social?);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::search::models::Price;
    use crate::kernel::{MockScraper, MockSearchService, TestDependencies};
    use serde_json::json;

    fn query() -> ItemQuery {
        ItemQuery {
            item: "iphone 13".into(),
            price_min: Price::UNBOUNDED,
            price_max: Price::from(500_u32),
        }
    }

    fn ad(link: &str) -> RawRecord {
        RawRecord::from_strs(&[
            "0", "title", link, "phone", "seller", "480", "AZN", "{'Şəhər': 'Bakı'}", "details",
            "views", "date",
        ])
    }

    #[test]
    fn test_column_reports_position() {
        let row = RawRecord::from_strs(&["a", "b"]);
        assert_eq!(column(3, &row, 1).unwrap(), "b");
        assert_eq!(
            column(3, &row, 5).unwrap_err(),
            RecordError::MissingColumn {
                row: 3,
                column: 5,
                width: 2
            }
        );
    }

    #[tokio::test]
    async fn test_marketplace_first_then_social() {
        let deps = TestDependencies::new()
            .mock_marketplace(MockScraper::new().with_rows(vec![ad("https://tap.az/1"), ad("https://tap.az/2")]))
            .mock_search(MockSearchService::new().with_body(json!({
                "organic": [
                    {"title": "a", "link": "https://instagram.com/p/a"},
                    {"title": "b", "link": "https://instagram.com/p/b", "date": "1 day ago"}
                ]
            })))
            .into_server_deps();

        let data = search_marketplace_and_social(&deps, &query()).await.unwrap();
        let links: Vec<_> = data.iter().map(NormalizedRecord::link).collect();

        assert_eq!(
            links,
            vec![
                "https://tap.az/1",
                "https://tap.az/2",
                "https://instagram.com/p/a",
                "https://instagram.com/p/b",
            ]
        );
    }

    #[tokio::test]
    async fn test_social_failure_discards_marketplace_rows() {
        let deps = TestDependencies::new()
            .mock_marketplace(MockScraper::new().with_rows(vec![ad("https://tap.az/1")]))
            .mock_search(MockSearchService::new().with_body(json!({"error": "quota"})))
            .into_server_deps();

        let err = search_marketplace_and_social(&deps, &query()).await.unwrap_err();
        assert!(matches!(err, SearchError::SocialSearch(_)));
    }

    #[tokio::test]
    async fn test_marketplace_error_wins_when_both_fail() {
        let deps = TestDependencies::new()
            .mock_marketplace(MockScraper::new().with_error("actor failed"))
            .mock_search(MockSearchService::new().with_error("403"))
            .into_server_deps();

        let err = search_marketplace_and_social(&deps, &query()).await.unwrap_err();
        assert_eq!(err.to_string(), "Tap.az Scraping Error: actor failed");
    }
}
