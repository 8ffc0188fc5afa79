use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApifyError>;

#[derive(Debug, Error)]
pub enum ApifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Apify API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Actor run ended with status {0}")]
    RunFailed(String),

    #[error("Actor run {run_id} still {status} after {polls} polls")]
    PollLimit {
        run_id: String,
        status: String,
        polls: u32,
    },
}
