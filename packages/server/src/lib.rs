// Search Gateway - API Core
//
// Turns a free-text query into a structured intent with an LLM, dispatches it
// to the listings backend or to the marketplace + social search pair, and
// returns the results in one normalized envelope.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
