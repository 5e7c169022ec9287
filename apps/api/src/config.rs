use anyhow::{Context, Result};
use reqwest::Url;

const DEFAULT_MARKETPLACE_SEARCH_URL: &str = "https://shopee.com/search";

/// Application configuration loaded from environment variables.
/// Fails at startup if a provided value cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means every generation uses the fallback outfit.
    pub anthropic_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    /// Unset means saved outfits live in memory.
    pub database_url: Option<String>,
    pub marketplace_search_url: Url,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            database_url: optional_env("DATABASE_URL"),
            marketplace_search_url: Url::parse(
                &optional_env("MARKETPLACE_SEARCH_URL")
                    .unwrap_or_else(|| DEFAULT_MARKETPLACE_SEARCH_URL.to_string()),
            )
            .context("MARKETPLACE_SEARCH_URL must be an absolute URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
