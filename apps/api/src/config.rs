use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::extraction::certifications::CaptureMode;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60 * 24;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Optional: the LLM-backed extractor and scorer are only built when a key is present.
    pub anthropic_api_key: Option<String>,
    pub llm_skills_enabled: bool,
    pub llm_scoring_enabled: bool,
    pub session_ttl_secs: u64,
    pub max_upload_bytes: usize,
    /// JSON file `{ "technical": [...], "soft": [...] }` replacing the built-in reference lists.
    pub skill_catalog_path: Option<PathBuf>,
    pub cert_capture: CaptureMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_skills_enabled: parse_flag("ENABLE_LLM_SKILLS", optional_env("ENABLE_LLM_SKILLS"))?,
            llm_scoring_enabled: parse_flag(
                "ENABLE_LLM_SCORING",
                optional_env("ENABLE_LLM_SCORING"),
            )?,
            session_ttl_secs: optional_env("SESSION_TTL_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("SESSION_TTL_SECS must be a number of seconds")?
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            skill_catalog_path: optional_env("SKILL_CATALOG_PATH").map(PathBuf::from),
            cert_capture: optional_env("CERT_CAPTURE")
                .map(|v| v.parse::<CaptureMode>())
                .transpose()?
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The API key to use for LLM collaborators, if any of them is switched on.
    pub fn llm_api_key(&self) -> Option<&str> {
        if self.llm_skills_enabled || self.llm_scoring_enabled {
            self.anthropic_api_key.as_deref()
        } else {
            None
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}
