use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::kernel::GPT_4O_MINI;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_model: String,
    pub serper_api_key: String,
    pub apify_token: String,
    pub bina_actor_id: String,
    pub tapaz_actor_id: String,
    pub instructions_path: PathBuf,
    pub request_timeout: Duration,
    /// Classification deadline; must be shorter than `request_timeout`
    pub openai_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let request_timeout = secs_var("REQUEST_TIMEOUT_SECS", 120)?;
        let openai_timeout = secs_var("OPENAI_TIMEOUT_SECS", 60)?;
        anyhow::ensure!(
            openai_timeout < request_timeout,
            "OPENAI_TIMEOUT_SECS must be shorter than REQUEST_TIMEOUT_SECS"
        );

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| GPT_4O_MINI.to_string()),
            serper_api_key: env::var("SERPER_API_KEY").context("SERPER_API_KEY must be set")?,
            apify_token: env::var("APIFY_TOKEN").context("APIFY_TOKEN must be set")?,
            bina_actor_id: env::var("BINA_ACTOR_ID").context("BINA_ACTOR_ID must be set")?,
            tapaz_actor_id: env::var("TAPAZ_ACTOR_ID").context("TAPAZ_ACTOR_ID must be set")?,
            instructions_path: env::var("INSTRUCTIONS_PATH")
                .unwrap_or_else(|_| "instructions.txt".to_string())
                .into(),
            request_timeout,
            openai_timeout,
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }

    /// Read the classifier instructions. Called once at startup.
    pub fn load_instructions(&self) -> Result<String> {
        let text = std::fs::read_to_string(&self.instructions_path).with_context(|| {
            format!(
                "Failed to read instructions from {}",
                self.instructions_path.display()
            )
        })?;
        anyhow::ensure!(
            !text.trim().is_empty(),
            "Instructions file {} is empty",
            self.instructions_path.display()
        );
        Ok(text)
    }
}

fn secs_var(name: &str, default: u64) -> Result<Duration> {
    let secs = match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} must be a valid number"))?,
        Err(_) => default,
    };
    Ok(Duration::from_secs(secs))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
