use std::env;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment-only settings; path arguments live on the CLI (which also
/// reads `MUSIC_DIR`/`FIXTURES_FILE` from the environment).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000/Music".to_string()),
        })
    }
}
