//! Classifieds adapter (Tap.az).

use serde_json::Value;
use tracing::{info, warn};

use crate::common::{cell_text, RawRecord};
use crate::domains::search::adapters::column;
use crate::domains::search::error::{RecordError, SearchError};
use crate::domains::search::literal::parse_mapping;
use crate::domains::search::models::{ItemQuery, MarketplaceRecord, NormalizedRecord};
use crate::kernel::BaseScraper;

const MARKETPLACE_BASE_URL: &str = "https://tap.az/elanlar";

/// Pre-encoded `q[price][]` query key.
const PRICE_PARAM: &str = "q%5Bprice%5D%5B%5D";
/// Pre-encoded `q[keywords]` query key.
const KEYWORDS_PARAM: &str = "q%5Bkeywords%5D";

/// Key of the city inside the address column.
const CITY_KEY: &str = "Şəhər";

// Column layout of a marketplace row
const COL_TITLE: usize = 1;
const COL_LINK: usize = 2;
const COL_CONTACT: usize = 3;
const COL_PRICE: usize = 5;
const COL_CURRENCY: usize = 6;
const COL_ADDRESS: usize = 7;
const COL_DETAILS: usize = 8;
const COL_DATE: usize = 10;

/// Join the words of a phrase with `%20`. Nothing else is escaped.
pub fn encode_keywords(phrase: &str) -> String {
    phrase.split(' ').collect::<Vec<_>>().join("%20")
}

/// Search URL for the marketplace backend. The second price term is left
/// out entirely for an unbounded `price_max`.
pub fn marketplace_locator(query: &ItemQuery) -> String {
    let mut url = format!("{}?{}={}", MARKETPLACE_BASE_URL, PRICE_PARAM, query.price_min);
    if let Some(max) = query.price_max.as_upper_bound() {
        url.push_str(&format!("&{PRICE_PARAM}={max}"));
    }
    url.push_str(&format!("&{}={}", KEYWORDS_PARAM, encode_keywords(&query.item)));
    url
}

/// Extract the city from the serialized address mapping in column 7.
fn city(index: usize, cell: &Value) -> Result<String, RecordError> {
    let malformed = |reason: String| RecordError::MalformedAddress { row: index, reason };

    let address = match cell {
        Value::Object(map) => map.clone(),
        Value::String(text) => parse_mapping(text).map_err(|e| malformed(e.to_string()))?,
        other => return Err(malformed(format!("expected a mapping, got {other}"))),
    };

    address
        .get(CITY_KEY)
        .map(cell_text)
        .ok_or_else(|| malformed(format!("no {CITY_KEY:?} key")))
}

pub fn map_marketplace_row(index: usize, row: &RawRecord) -> Result<MarketplaceRecord, RecordError> {
    let col = |c| column(index, row, c);

    let address = row.cell(COL_ADDRESS).ok_or(RecordError::MissingColumn {
        row: index,
        column: COL_ADDRESS,
        width: row.len(),
    })?;

    Ok(MarketplaceRecord {
        title: col(COL_TITLE)?,
        link: col(COL_LINK)?,
        contact: col(COL_CONTACT)?,
        price: format!("{} {}", col(COL_PRICE)?, col(COL_CURRENCY)?),
        city: city(index, address)?,
        date: col(COL_DATE)?,
        details: col(COL_DETAILS)?,
    })
}

/// Scrape and normalize classified ads.
pub async fn search_marketplace(
    scraper: &dyn BaseScraper,
    query: &ItemQuery,
) -> Result<Vec<NormalizedRecord>, SearchError> {
    let locator = marketplace_locator(query);
    info!(%locator, "Searching marketplace");

    let rows = scraper.scrape(&locator).await.map_err(|e| {
        warn!(error = %e, "Marketplace scrape failed");
        SearchError::MarketplaceScraping(format!("{e:#}"))
    })?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| map_marketplace_row(i, row).map(NormalizedRecord::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SearchError::MarketplaceScraping(e.to_string()))?;

    info!(count = records.len(), "Marketplace ads normalized");
    Ok(records)
}
