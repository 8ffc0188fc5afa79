//! Backend rows and classifier outputs shared by the endpoint tests.

use search_core::common::RawRecord;
use serde_json::{json, Value};

pub const HOUSE_CLASSIFICATION: &str =
    "{'category': 'house', 'type': 'Menzil', 'price_min': 100000, 'price_max': 0}";

pub const ITEM_CLASSIFICATION: &str =
    "```python\n{'category': 'other', 'item': 'iphone 13', 'price_min': 0, 'price_max': 500}\n```";

/// A listings row: link, contact, seller, seller type, price, currency, details.
pub fn listing_row(link: &str) -> RawRecord {
    RawRecord::from_strs(&[
        "0",
        link,
        "(050) 123-45-67",
        "Elvin",
        "vasitəçi",
        "185000",
        "m²",
        "AZN",
        "3 otaqlı",
        "Yasamal r.",
        "Təmirli, kupçalı",
    ])
}

/// A marketplace row with a Python-literal address cell.
pub fn ad_row(title: &str, link: &str, city: &str) -> RawRecord {
    let address = format!("{{'Şəhər': '{city}'}}");
    RawRecord::from_strs(&[
        "0",
        title,
        link,
        "(055) 555-55-55",
        "Fərid",
        "480",
        "AZN",
        &address,
        "Yaddaş: 128 GB",
        "baxış: 120",
        "bugün 14:20",
    ])
}

pub fn organic(title: &str, link: &str, date: Option<&str>) -> Value {
    match date {
        Some(date) => json!({ "title": title, "link": link, "date": date }),
        None => json!({ "title": title, "link": link }),
    }
}
