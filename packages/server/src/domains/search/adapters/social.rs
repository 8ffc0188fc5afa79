//! Social search adapter (Instagram posts via web search).

use serde_json::Value;
use tracing::{info, warn};

use crate::common::cell_text;
use crate::domains::search::error::SearchError;
use crate::domains::search::models::{NormalizedRecord, SocialRecord, UNKNOWN_DATE};
use crate::kernel::{BaseSearchService, WebSearchQuery};

const SITE_SCOPE: &str = "site:instagram.com";
/// Country and interface language for every search.
const LOCALE: &str = "az";

pub fn social_query(phrase: &str) -> WebSearchQuery {
    WebSearchQuery {
        q: format!("{SITE_SCOPE} {phrase}"),
        gl: LOCALE.to_string(),
        hl: LOCALE.to_string(),
    }
}

/// Map the provider's `organic` results. A missing or non-list `organic`
/// is an error; a missing or null `date` is not.
pub fn map_organic_results(body: &Value) -> Result<Vec<SocialRecord>, String> {
    let organic = body
        .get("organic")
        .ok_or_else(|| "response has no 'organic' results".to_string())?
        .as_array()
        .ok_or_else(|| "'organic' is not a list".to_string())?;

    organic
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<SocialRecord, String> {
            let field = |key: &str| {
                item.get(key)
                    .map(cell_text)
                    .ok_or_else(|| format!("result {i} has no '{key}'"))
            };

            Ok(SocialRecord {
                title: field("title")?,
                link: field("link")?,
                date: item
                    .get("date")
                    .filter(|date| !date.is_null())
                    .map(cell_text)
                    .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            })
        })
        .collect()
}

pub async fn search_social(
    search: &dyn BaseSearchService,
    phrase: &str,
) -> Result<Vec<NormalizedRecord>, SearchError> {
    let query = social_query(phrase);
    info!(q = %query.q, "Searching social posts");

    let body = search.search(&query).await.map_err(|e| {
        warn!(error = %e, "Social search failed");
        SearchError::SocialSearch(format!("{e:#}"))
    })?;

    let records = map_organic_results(&body).map_err(SearchError::SocialSearch)?;

    info!(count = records.len(), "Social posts normalized");
    Ok(records.into_iter().map(NormalizedRecord::from).collect())
}
