// src/config.rs

use dotenvy::dotenv;
use std::env;

use crate::engine::scoring::ScoringMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub scoring_mode: ScoringMode,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        // Historical max-possible accumulation is the default; set
        // SCORING_CORRECTED_MAX=true to count each question once per aptitude.
        let scoring_mode = match env::var("SCORING_CORRECTED_MAX").as_deref() {
            Ok("true") | Ok("1") => ScoringMode::Corrected,
            _ => ScoringMode::Legacy,
        };

        Self {
            database_url,
            rust_log,
            scoring_mode,
        }
    }
}
