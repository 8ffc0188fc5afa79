//! Search domain: free-text query to normalized results.
//!
//! Flow: [`classifier`] turns the query into an [`models::Intent`],
//! [`router`] picks a backend pipeline, [`adapters`] scrape and normalize,
//! and [`assembler`] wraps the records in a [`models::ResponseEnvelope`].

pub mod adapters;
pub mod assembler;
pub mod classifier;
pub mod error;
pub mod literal;
pub mod models;
pub mod router;

pub use error::SearchError;
pub use models::*;
pub use router::search;
