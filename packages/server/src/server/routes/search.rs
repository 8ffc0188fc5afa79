use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::search::{self, ResponseEnvelope, SearchError};
use crate::server::app::AxumAppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub user_input: String,
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Search failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Search rejected");
        }

        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Search endpoint
///
/// POST /search with `{"user_input": "..."}`. Each request runs the whole
/// pipeline on its own; nothing is shared between requests except the
/// read-only dependencies.
#[tracing::instrument(skip_all)]
pub async fn search_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ResponseEnvelope>, SearchError> {
    let envelope = search::search(&state.deps, &request.user_input).await?;
    tracing::info!(
        source = %envelope.source,
        count = envelope.data.len(),
        "Search completed"
    );
    Ok(Json(envelope))
}
