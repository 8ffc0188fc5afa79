//! Property listings adapter (Bina.az).

use tracing::{info, warn};

use crate::common::RawRecord;
use crate::domains::search::adapters::column;
use crate::domains::search::error::{RecordError, SearchError};
use crate::domains::search::models::{ListingRecord, NormalizedRecord, Price, PropertyType};
use crate::kernel::BaseScraper;

const LISTINGS_BASE_URL: &str = "https://bina.az/baki/alqi-satqi";

// Column layout of a listings row
const COL_LINK: usize = 1;
const COL_CONTACT: usize = 2;
const COL_SELLER_NAME: usize = 3;
const COL_SELLER_TYPE: usize = 4;
const COL_PRICE: usize = 5;
const COL_CURRENCY: usize = 7;
const COL_DETAILS: usize = 10;

/// Resolved listings search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingsQuery {
    pub property_type: PropertyType,
    pub price_min: Price,
    pub price_max: Price,
}

/// Search URL for the listings backend. The upper bound is only added for
/// a non-zero `price_max`.
pub fn listings_locator(query: &ListingsQuery) -> String {
    let mut url = format!(
        "{}/{}?page&price_from={}",
        LISTINGS_BASE_URL,
        query.property_type.path_segment(),
        query.price_min
    );
    if let Some(max) = query.price_max.as_upper_bound() {
        url.push_str(&format!("&price_to={max}"));
    }
    url
}

pub fn map_listing_row(index: usize, row: &RawRecord) -> Result<ListingRecord, RecordError> {
    let col = |c| column(index, row, c);

    Ok(ListingRecord {
        seller: format!("{} ({})", col(COL_SELLER_NAME)?, col(COL_SELLER_TYPE)?),
        price: format!("{} {}", col(COL_PRICE)?, col(COL_CURRENCY)?),
        link: col(COL_LINK)?,
        contact: col(COL_CONTACT)?,
        details: col(COL_DETAILS)?,
    })
}

/// Scrape and normalize listings.
pub async fn search_listings(
    scraper: &dyn BaseScraper,
    query: &ListingsQuery,
) -> Result<Vec<NormalizedRecord>, SearchError> {
    let locator = listings_locator(query);
    info!(%locator, property_type = query.property_type.label(), "Searching listings");

    let rows = scraper.scrape(&locator).await.map_err(|e| {
        warn!(error = %e, "Listings scrape failed");
        SearchError::ListingsScraping(format!("{e:#}"))
    })?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| map_listing_row(i, row).map(NormalizedRecord::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SearchError::ListingsScraping(e.to_string()))?;

    info!(count = records.len(), "Listings normalized");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockScraper;

    fn query(property_type: PropertyType, min: u32, max: u32) -> ListingsQuery {
        ListingsQuery {
            property_type,
            price_min: Price::from(min),
            price_max: Price::from(max),
        }
    }

    fn listing_row() -> RawRecord {
        RawRecord::from_strs(&[
            "0",
            "https://bina.az/items/4012345",
            "(050) 123-45-67",
            "Rəşad",
            "vasitəçi (agent)",
            "185 000",
            "m²",
            "AZN",
            "Bakı",
            "Yasamal",
            "3 otaqlı, 92 m², 7/16 mərtəbə",
        ])
    }

    #[test]
    fn test_locator_without_upper_bound() {
        assert_eq!(
            listings_locator(&query(PropertyType::Menzil, 100000, 0)),
            "https://bina.az/baki/alqi-satqi/menziller?page&price_from=100000"
        );
    }

    #[test]
    fn test_locator_with_upper_bound() {
        assert_eq!(
            listings_locator(&query(PropertyType::YeniTikili, 50000, 120000)),
            "https://bina.az/baki/alqi-satqi/menziller/yeni-tikili?page&price_from=50000&price_to=120000"
        );
    }

    #[test]
    fn test_every_property_type_reaches_its_segment() {
        for property_type in PropertyType::ALL {
            let url = listings_locator(&query(property_type, 0, 0));
            assert!(url.contains(&format!("/{}?", property_type.path_segment())));
            assert!(!url.contains("price_to"));
        }
    }

    #[test]
    fn test_map_row() {
        let record = map_listing_row(0, &listing_row()).unwrap();
        assert_eq!(record.seller, "Rəşad (vasitəçi (agent))");
        assert_eq!(record.price, "185 000 AZN");
        assert_eq!(record.link, "https://bina.az/items/4012345");
        assert_eq!(record.contact, "(050) 123-45-67");
        assert_eq!(record.details, "3 otaqlı, 92 m², 7/16 mərtəbə");
    }

    #[test]
    fn test_short_row_is_schema_drift() {
        let row = RawRecord::from_strs(&["0", "link", "phone", "name", "type", "1", "", "AZN"]);
        assert_eq!(
            map_listing_row(4, &row).unwrap_err(),
            RecordError::MissingColumn {
                row: 4,
                column: 10,
                width: 8
            }
        );
    }

    #[tokio::test]
    async fn test_search_maps_every_row() {
        let scraper = MockScraper::new().with_rows(vec![listing_row(), listing_row()]);
        let q = query(PropertyType::Menzil, 100000, 0);

        let records = search_listings(&scraper, &q).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(scraper.calls(), vec![listings_locator(&q)]);
    }

    #[tokio::test]
    async fn test_search_backend_failure() {
        let scraper = MockScraper::new().with_error("actor crashed");
        let err = search_listings(&scraper, &query(PropertyType::Ofis, 0, 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Scraping Error: actor crashed");
    }

    #[tokio::test]
    async fn test_search_rejects_drifted_rows() {
        let scraper = MockScraper::new().with_rows(vec![listing_row(), RawRecord::from_strs(&["x"])]);
        let err = search_listings(&scraper, &query(PropertyType::Ofis, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::ListingsScraping(ref m) if m.contains("row 1")));
    }
}
