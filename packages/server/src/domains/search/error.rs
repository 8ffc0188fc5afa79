//! Errors surfaced by the search pipeline.
//!
//! Display strings are the client-facing `detail` messages.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// LLM call failed, timed out, or produced unparsable output
    #[error("OpenAI API Error: {0}")]
    Classification(String),

    #[error("Invalid category")]
    InvalidCategory,

    /// House intent with a type label outside the property table
    #[error("Invalid property type: {0}")]
    UnknownPropertyType(String),

    /// Listings backend failed or its rows did not match the expected columns
    #[error("Scraping Error: {0}")]
    ListingsScraping(String),

    #[error("Tap.az Scraping Error: {0}")]
    MarketplaceScraping(String),

    #[error("Instagram Search Error: {0}")]
    SocialSearch(String),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCategory | Self::UnknownPropertyType(_) => StatusCode::BAD_REQUEST,
            Self::Classification(_)
            | Self::ListingsScraping(_)
            | Self::MarketplaceScraping(_)
            | Self::SocialSearch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A row that does not match the backend's column layout.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("row {row}: column {column} missing (row has {width} columns)")]
    MissingColumn {
        row: usize,
        column: usize,
        width: usize,
    },

    #[error("row {row}: malformed address field: {reason}")]
    MalformedAddress { row: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SearchError::Classification("timeout".into()).to_string(),
            "OpenAI API Error: timeout"
        );
        assert_eq!(SearchError::InvalidCategory.to_string(), "Invalid category");
        assert_eq!(
            SearchError::ListingsScraping("x".into()).to_string(),
            "Scraping Error: x"
        );
        assert_eq!(
            SearchError::MarketplaceScraping("x".into()).to_string(),
            "Tap.az Scraping Error: x"
        );
        assert_eq!(
            SearchError::SocialSearch("x".into()).to_string(),
            "Instagram Search Error: x"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(SearchError::InvalidCategory.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            SearchError::UnknownPropertyType("Villa".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SearchError::Classification("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SearchError::SocialSearch("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
