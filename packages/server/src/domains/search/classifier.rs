//! Intent classification: one LLM completion, parsed into an [`Intent`].

use std::time::Duration;

use openai_client::strip_code_blocks;
use tracing::{debug, warn};

use super::error::SearchError;
use super::literal::parse_mapping;
use super::models::Intent;
use crate::kernel::BaseAI;

/// Classify `user_input` with the shared instruction. No retry.
///
/// The completion must finish within `deadline`; the request-level timeout
/// is longer, so a slow model surfaces as a classification error.
pub async fn classify(
    ai: &dyn BaseAI,
    instructions: &str,
    user_input: &str,
    deadline: Duration,
) -> Result<Intent, SearchError> {
    let text = tokio::time::timeout(deadline, ai.complete(instructions, user_input))
        .await
        .map_err(|_| {
            warn!(?deadline, "Classification call timed out");
            SearchError::Classification(format!("request timed out after {deadline:?}"))
        })?
        .map_err(|e| {
            warn!(error = %e, "Classification call failed");
            SearchError::Classification(format!("{e:#}"))
        })?;

    let intent = parse_intent(&text)?;
    debug!(category = intent.category(), "Classified user input");
    Ok(intent)
}

/// Parse completion text into an intent.
///
/// The text must be a single mapping literal, optionally wrapped in a
/// markdown code fence.
pub fn parse_intent(text: &str) -> Result<Intent, SearchError> {
    let map = parse_mapping(strip_code_blocks(text))
        .map_err(|e| SearchError::Classification(format!("unparsable classification: {e}")))?;

    Intent::from_mapping(map)
        .map_err(|e| SearchError::Classification(format!("invalid classification: {e}")))
}
