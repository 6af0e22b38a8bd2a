use anyhow::{Context, Result};

use crate::tech::validator::DEFAULT_MATCH_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Minimum Jaro-Winkler similarity for a registry name to count as a correction.
    pub tech_match_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let tech_match_threshold = match std::env::var("TECH_MATCH_THRESHOLD") {
            Ok(raw) => raw
                .parse::<f64>()
                .context("TECH_MATCH_THRESHOLD must be a number")?,
            Err(_) => DEFAULT_MATCH_THRESHOLD,
        };
        if !(0.0..=1.0).contains(&tech_match_threshold) {
            anyhow::bail!("TECH_MATCH_THRESHOLD must be between 0.0 and 1.0");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            tech_match_threshold,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
