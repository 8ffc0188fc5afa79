//! Normalized result records and the response envelope.
//!
//! Field labels are the client-facing Azerbaijani captions; their order is
//! the serialization order.

use serde::Serialize;

/// Placeholder for a social post without a publication date.
pub const UNKNOWN_DATE: &str = "Bilinmir";

/// One property listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    /// `"<name> (<seller type>)"`
    #[serde(rename = "Satan:")]
    pub seller: String,
    /// `"<amount> <currency>"`
    #[serde(rename = "Qiymət:")]
    pub price: String,
    #[serde(rename = "Elan Linki:")]
    pub link: String,
    #[serde(rename = "Əlaqə Nömrəsi:")]
    pub contact: String,
    #[serde(rename = "Detallar:")]
    pub details: String,
}

/// One classified ad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketplaceRecord {
    #[serde(rename = "Elan Başlığı:")]
    pub title: String,
    #[serde(rename = "Elan Linki:")]
    pub link: String,
    #[serde(rename = "Əlaqə Nömrəsi:")]
    pub contact: String,
    #[serde(rename = "Qiymət:")]
    pub price: String,
    #[serde(rename = "Ünvan")]
    pub city: String,
    #[serde(rename = "Tarix")]
    pub date: String,
    #[serde(rename = "Detallar")]
    pub details: String,
}

/// One social post found through web search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialRecord {
    #[serde(rename = "Elan Başlığı:")]
    pub title: String,
    #[serde(rename = "Link:")]
    pub link: String,
    #[serde(rename = "Tarix")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedRecord {
    Listing(ListingRecord),
    Marketplace(MarketplaceRecord),
    Social(SocialRecord),
}

impl NormalizedRecord {
    pub fn link(&self) -> &str {
        match self {
            Self::Listing(r) => &r.link,
            Self::Marketplace(r) => &r.link,
            Self::Social(r) => &r.link,
        }
    }
}

impl From<ListingRecord> for NormalizedRecord {
    fn from(record: ListingRecord) -> Self {
        Self::Listing(record)
    }
}

impl From<MarketplaceRecord> for NormalizedRecord {
    fn from(record: MarketplaceRecord) -> Self {
        Self::Marketplace(record)
    }
}

impl From<SocialRecord> for NormalizedRecord {
    fn from(record: SocialRecord) -> Self {
        Self::Social(record)
    }
}

/// Which backend pipeline produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Listings,
    MarketplaceAndSocial,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Self::Listings => "Bina.az",
            Self::MarketplaceAndSocial => "Tap.az + Instagram",
        }
    }
}

/// Uniform response body for `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub source: String,
    pub data: Vec<NormalizedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_serializes_with_labels_in_order() {
        let record = NormalizedRecord::from(ListingRecord {
            seller: "Elvin (vasitəçi)".into(),
            price: "150000 AZN".into(),
            link: "https://bina.az/items/1".into(),
            contact: "050 000 00 00".into(),
            details: "3 otaqlı".into(),
        });

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(
            text,
            r#"{"Satan:":"Elvin (vasitəçi)","Qiymət:":"150000 AZN","Elan Linki:":"https://bina.az/items/1","Əlaqə Nömrəsi:":"050 000 00 00","Detallar:":"3 otaqlı"}"#
        );
    }

    #[test]
    fn test_social_record_shape() {
        let record = NormalizedRecord::from(SocialRecord {
            title: "iPhone 13".into(),
            link: "https://instagram.com/p/1".into(),
            date: UNKNOWN_DATE.into(),
        });

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"Elan Başlığı:": "iPhone 13", "Link:": "https://instagram.com/p/1", "Tarix": "Bilinmir"})
        );
        assert_eq!(record.link(), "https://instagram.com/p/1");
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(Source::Listings.label(), "Bina.az");
        assert_eq!(Source::MarketplaceAndSocial.label(), "Tap.az + Instagram");
    }
}
