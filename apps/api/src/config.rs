use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub firebase_web_api_key: String,
    /// Cap on simultaneous headless browser instances. Each PDF/image export
    /// launches its own Chrome process; unbounded concurrency exhausts memory
    /// long before CPU.
    pub max_concurrent_renders: usize,
    /// When true, export failure responses include the underlying cause.
    /// Local debugging only — production keeps errors opaque.
    pub expose_error_detail: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            firebase_web_api_key: require_env("FIREBASE_WEB_API_KEY")?,
            max_concurrent_renders: std::env::var("MAX_CONCURRENT_RENDERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse::<usize>()
                .context("MAX_CONCURRENT_RENDERS must be a positive integer")?,
            expose_error_detail: std::env::var("EXPOSE_ERROR_DETAIL")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
