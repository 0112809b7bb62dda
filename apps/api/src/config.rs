use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::career::documents::TemplateProfile;
use crate::career::ingest::ParserKind;
use crate::glucose::dashboard::DashboardConfig;
use crate::glucose::normalizer::DuplicatePolicy;

/// Application configuration loaded from environment variables.
/// Every value has a default so the demo runs with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub memory_file: PathBuf,
    /// Live job search endpoint. Unset means the static catalog is always used.
    pub job_search_url: Option<String>,
    pub job_search_timeout_secs: u64,
    pub top_k: usize,
    pub embedding_seed: u64,
    pub embedding_dimensions: usize,
    pub cv_parser: ParserKind,
    pub duplicate_policy: DuplicatePolicy,
    pub profile: TemplateProfile,
    pub dashboard: DashboardConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let profile_defaults = TemplateProfile::default();
        let dashboard_defaults = DashboardConfig::default();

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            memory_file: std::env::var("MEMORY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("user_memory.json")),
            job_search_url: std::env::var("JOB_SEARCH_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            job_search_timeout_secs: parse_env("JOB_SEARCH_TIMEOUT_SECS", 5)?,
            top_k: positive(parse_env("TOP_K", 3)?, "TOP_K")?,
            embedding_seed: parse_env("EMBEDDING_SEED", 42)?,
            embedding_dimensions: positive(
                parse_env("EMBEDDING_DIMENSIONS", 384)?,
                "EMBEDDING_DIMENSIONS",
            )?,
            cv_parser: parse_env("CV_PARSER", ParserKind::Stub)?,
            duplicate_policy: parse_env("DUPLICATE_POLICY", DuplicatePolicy::KeepLast)?,
            profile: TemplateProfile {
                institution: env_or("PROFILE_INSTITUTION", profile_defaults.institution),
                club: env_or("PROFILE_CLUB", profile_defaults.club),
                signature: env_or("PROFILE_SIGNATURE", profile_defaults.signature),
            },
            dashboard: DashboardConfig {
                title: env_or("DASHBOARD_TITLE", dashboard_defaults.title),
                caption: env_or("DASHBOARD_CAPTION", dashboard_defaults.caption),
                background_image_url: std::env::var("DASHBOARD_BACKGROUND_URL")
                    .ok()
                    .or(dashboard_defaults.background_image_url),
                ..dashboard_defaults
            },
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Rejects zero for counts that must be at least one.
fn positive(value: usize, key: &str) -> Result<usize> {
    if value == 0 {
        anyhow::bail!("Environment variable '{key}' must be greater than zero");
    }
    Ok(value)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
