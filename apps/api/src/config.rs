use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Credentials are optional here; their absence is reported by the startup
/// credentials stage so that it is logged like every other boot failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub resume_path: PathBuf,
    pub subject_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: optional_env("GOOGLE_API_KEY"),
            resume_path: optional_env("RESUME_PDF")
                .unwrap_or_else(|| "resume.pdf".to_string())
                .into(),
            subject_name: optional_env("RESUME_SUBJECT")
                .unwrap_or_else(|| "the candidate".to_string()),
            port: parse_port(std::env::var("PORT").ok().as_deref())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    raw.unwrap_or("5000")
        .trim()
        .parse::<u16>()
        .context("PORT must be a valid port number")
}
