use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Saved searches live in PostgreSQL when set, in memory otherwise.
    pub database_url: Option<String>,
    pub job_api_url: String,
    pub job_api_key: Option<String>,
    /// Bearer token every `/api` request must present.
    pub api_token: String,
    pub port: u16,
    pub rust_log: String,
    /// Default number of jobs returned by `/api/v1/jobs/search`.
    pub search_result_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()),
            job_api_url: require_env("JOB_API_URL")?,
            job_api_key: std::env::var("JOB_API_KEY").ok().filter(|k| !k.is_empty()),
            api_token: require_env("API_TOKEN")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            search_result_limit: std::env::var("SEARCH_RESULT_LIMIT")
                .unwrap_or_else(|_| "20".to_string())
                .parse::<usize>()
                .context("SEARCH_RESULT_LIMIT must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
