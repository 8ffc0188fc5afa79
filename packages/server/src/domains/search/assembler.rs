//! Response assembly.

use super::models::{NormalizedRecord, ResponseEnvelope, Source};

/// Wrap adapter output in the uniform envelope.
pub fn assemble(source: Source, data: Vec<NormalizedRecord>) -> ResponseEnvelope {
    ResponseEnvelope {
        source: source.label().to_string(),
        data,
    }
}
