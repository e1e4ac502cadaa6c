use std::path::PathBuf;

use anyhow::{Context, Result};

/// What the controller seeds when no persisted state exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Empty form with one editable row per list.
    Empty,
    /// Illustrative sample data for demo deployments.
    Sample,
}

/// Application configuration loaded from environment variables. Everything
/// has a default except nothing — the service runs with no env at all; the
/// AI assistant is simply disabled without an API key.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_dir: PathBuf,
    pub anthropic_api_key: Option<String>,
    pub seed_mode: SeedMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let seed_mode = match std::env::var("SEED_MODE").as_deref() {
            Ok("sample") => SeedMode::Sample,
            Ok("empty") | Err(_) => SeedMode::Empty,
            Ok(other) => anyhow::bail!("SEED_MODE must be 'empty' or 'sample', got '{other}'"),
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty()),
            seed_mode,
        })
    }
}
