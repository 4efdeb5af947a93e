use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only `PORT` is validated; every other setting is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables free-text extraction when set.
    pub anthropic_api_key: Option<String>,
    /// Selects the PostgreSQL profile store when set.
    pub database_url: Option<String>,
    /// JSON file replacing the built-in catalog.
    pub catalog_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            database_url: optional_env("DATABASE_URL"),
            catalog_path: optional_env("CATALOG_PATH"),
        })
    }
}

/// Unset and blank variables both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
