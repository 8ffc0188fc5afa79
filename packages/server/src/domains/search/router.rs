//! Category routing: pick the backend pipeline for an intent.

use tracing::{info, warn};

use super::adapters::{search_listings, search_marketplace_and_social, ListingsQuery};
use super::assembler::assemble;
use super::classifier::classify;
use super::error::SearchError;
use super::models::{HouseQuery, Intent, ItemQuery, PropertyType, ResponseEnvelope, Source};
use crate::kernel::ServerDeps;

/// A resolved backend selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Listings(ListingsQuery),
    MarketplaceAndSocial(ItemQuery),
}

impl Route {
    pub fn source(&self) -> Source {
        match self {
            Self::Listings(_) => Source::Listings,
            Self::MarketplaceAndSocial(_) => Source::MarketplaceAndSocial,
        }
    }
}

/// Resolve an intent to a route. Unknown categories and property types are
/// client errors; nothing falls back to a default.
pub fn route(intent: Intent) -> Result<Route, SearchError> {
    match intent {
        Intent::House(HouseQuery {
            property_type,
            price_min,
            price_max,
        }) => {
            let property_type = PropertyType::from_label(&property_type)
                .ok_or(SearchError::UnknownPropertyType(property_type))?;
            Ok(Route::Listings(ListingsQuery {
                property_type,
                price_min,
                price_max,
            }))
        }
        Intent::Other(query) => Ok(Route::MarketplaceAndSocial(query)),
        Intent::Unrecognized(category) => {
            warn!(%category, "Unrecognized category");
            Err(SearchError::InvalidCategory)
        }
    }
}

/// Run the routed pipeline and wrap its output.
pub async fn dispatch(deps: &ServerDeps, route: Route) -> Result<ResponseEnvelope, SearchError> {
    let source = route.source();
    let data = match &route {
        Route::Listings(query) => search_listings(deps.listings_scraper.as_ref(), query).await?,
        Route::MarketplaceAndSocial(query) => search_marketplace_and_social(deps, query).await?,
    };
    Ok(assemble(source, data))
}

/// Full pipeline: classify, route, scrape, normalize, assemble.
pub async fn search(deps: &ServerDeps, user_input: &str) -> Result<ResponseEnvelope, SearchError> {
    let intent = classify(
        deps.ai.as_ref(),
        &deps.instructions,
        user_input,
        deps.ai_timeout,
    )
    .await?;
    let route = route(intent)?;
    info!(source = route.source().label(), "Dispatching search");
    dispatch(deps, route).await
}
