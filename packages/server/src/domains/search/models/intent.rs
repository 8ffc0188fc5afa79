//! Structured classification of a free-text query.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// What the classifier decided the user is looking for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Real estate, served by the listings backend
    House(HouseQuery),
    /// Anything else, served by the marketplace and social search
    Other(ItemQuery),
    /// The classifier produced a category we do not serve (raw value kept for logs)
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseQuery {
    /// Human-facing property type label, resolved by the router
    #[serde(rename = "type")]
    pub property_type: String,
    pub price_min: Price,
    pub price_max: Price,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemQuery {
    /// Free-text search phrase
    pub item: String,
    pub price_min: Price,
    pub price_max: Price,
}

impl Intent {
    pub const HOUSE: &'static str = "house";
    pub const OTHER: &'static str = "other";

    /// Build an intent from a parsed mapping.
    ///
    /// A missing or unknown `category` yields [`Intent::Unrecognized`]; a
    /// known category with a missing, extra or mistyped field is an error.
    pub fn from_mapping(mut map: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let category = match map.remove("category") {
            Some(Value::String(category)) => category,
            Some(other) => return Ok(Self::Unrecognized(other.to_string())),
            None => return Ok(Self::Unrecognized(String::new())),
        };

        match category.as_str() {
            Self::HOUSE => serde_json::from_value(Value::Object(map)).map(Self::House),
            Self::OTHER => serde_json::from_value(Value::Object(map)).map(Self::Other),
            _ => Ok(Self::Unrecognized(category)),
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Self::House(_) => Self::HOUSE,
            Self::Other(_) => Self::OTHER,
            Self::Unrecognized(raw) => raw,
        }
    }
}

// =============================================================================
// Price
// =============================================================================

/// Non-negative price bound. As an upper bound, `0` means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Price(f64);

impl Price {
    pub const UNBOUNDED: Price = Price(0.0);

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True for the "no upper bound" sentinel.
    pub fn is_unbounded(self) -> bool {
        self.0 == 0.0
    }

    /// Upper-bound view: `None` when unbounded.
    pub fn as_upper_bound(self) -> Option<Self> {
        (!self.is_unbounded()).then_some(self)
    }
}

impl From<u32> for Price {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

/// Whole amounts print without a fraction (`100000`, not `100000.0`).
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0 < 1e15 {
            write!(f, "{}", self.0 as u64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| de::Error::custom("price out of range"))?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("price {s:?} is not a number")))?,
            other => {
                return Err(de::Error::custom(format!(
                    "price must be a number, got {other}"
                )))
            }
        };

        Price::new(raw).ok_or_else(|| de::Error::custom(format!("price {raw} is negative")))
    }
}

// =============================================================================
// Property types
// =============================================================================

/// Property types served by the listings backend.
///
/// The table is closed: adding a type means adding a variant, and the
/// exhaustive matches below will not compile until it has a label and a
/// path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Menzil,
    YeniTikili,
    KohneTikili,
    HeyetEvi,
    Ofis,
    Qaraj,
    Torpaq,
    Obyekt,
}

impl PropertyType {
    pub const ALL: [PropertyType; 8] = [
        PropertyType::Menzil,
        PropertyType::YeniTikili,
        PropertyType::KohneTikili,
        PropertyType::HeyetEvi,
        PropertyType::Ofis,
        PropertyType::Qaraj,
        PropertyType::Torpaq,
        PropertyType::Obyekt,
    ];

    /// Label the classifier emits.
    pub fn label(self) -> &'static str {
        match self {
            Self::Menzil => "Menzil",
            Self::YeniTikili => "Yeni Tikili",
            Self::KohneTikili => "Kohne Tikili",
            Self::HeyetEvi => "Heyet Evi",
            Self::Ofis => "Ofis",
            Self::Qaraj => "Qaraj",
            Self::Torpaq => "Torpaq",
            Self::Obyekt => "Obyekt",
        }
    }

    /// Category path on the listings site.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Menzil => "menziller",
            Self::YeniTikili => "menziller/yeni-tikili",
            Self::KohneTikili => "menziller/kohne-tikili",
            Self::HeyetEvi => "heyet-evleri",
            Self::Ofis => "ofisler",
            Self::Qaraj => "qarajlar",
            Self::Torpaq => "torpaqlar",
            Self::Obyekt => "obyektler",
        }
    }

    /// Exact label lookup (surrounding whitespace ignored). No fallback.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}
