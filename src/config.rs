// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_AI_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be set ({hint})")]
    Missing { name: &'static str, hint: &'static str },
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Settings for one kind of completion call.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    /// `None` when OPENROUTER_API_KEY is absent; every call then fails pre-flight.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub referer: String,
    pub app_title: String,
    pub extraction: ModelSettings,
    pub enhancement: ModelSettings,
    pub translation: ModelSettings,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_AI_ENDPOINT.to_string(),
            referer: "https://villaeden.replit.app".to_string(),
            app_title: "Villa Eden Admin".to_string(),
            // Structured extraction: low temperature, long timeout (60-90s observed).
            extraction: ModelSettings {
                model: "anthropic/claude-3.5-sonnet".to_string(),
                temperature: 0.3,
                max_tokens: 4000,
                timeout: Duration::from_secs(90),
            },
            enhancement: ModelSettings {
                model: "mistralai/mistral-large-latest".to_string(),
                temperature: 0.7,
                max_tokens: 1000,
                timeout: Duration::from_secs(45),
            },
            translation: ModelSettings {
                model: "anthropic/claude-3.5-sonnet".to_string(),
                temperature: 0.3,
                max_tokens: 4000,
                timeout: Duration::from_secs(90),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub database_path: String,
    pub schema_path: String,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub admin_password: String,
    pub max_upload_bytes: usize,
    pub ai: AiConfig,
}

impl AppConfig {
    /// Read the whole configuration once, at process start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_password = non_empty_var("ADMIN_PASSWORD").ok_or(ConfigError::Missing {
            name: "ADMIN_PASSWORD",
            hint: "password for the admin panel",
        })?;

        let bind_addr = parse_var("BIND_ADDR", "127.0.0.1:3000".parse().ok())?;
        let max_workers = parse_var("MAX_WORKERS", Some(8))?;
        let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", Some(16 * 1024 * 1024))?;

        let static_dir = PathBuf::from(var_or("STATIC_DIR", "static"));
        let upload_dir = non_empty_var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| static_dir.join("uploads"));

        let mut ai = AiConfig {
            api_key: non_empty_var("OPENROUTER_API_KEY"),
            endpoint: var_or("OPENROUTER_URL", DEFAULT_AI_ENDPOINT),
            ..AiConfig::default()
        };
        if let Some(referer) = non_empty_var("OPENROUTER_REFERER") {
            ai.referer = referer;
        }
        if let Some(title) = non_empty_var("OPENROUTER_TITLE") {
            ai.app_title = title;
        }
        if let Some(model) = non_empty_var("AI_EXTRACTION_MODEL") {
            ai.extraction.model = model;
        }
        if let Some(model) = non_empty_var("AI_ENHANCEMENT_MODEL") {
            ai.enhancement.model = model;
        }
        if let Some(model) = non_empty_var("AI_TRANSLATION_MODEL") {
            ai.translation.model = model;
        }

        Ok(Self {
            bind_addr,
            max_workers,
            database_path: var_or("DATABASE_PATH", "villa.sqlite3"),
            schema_path: var_or("SCHEMA_PATH", "sql/schema.sql"),
            static_dir,
            upload_dir,
            admin_password,
            max_upload_bytes,
            ai,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    non_empty_var(name).unwrap_or_else(|| default.to_string())
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => default.ok_or(ConfigError::Missing {
            name,
            hint: "no default available",
        }),
    }
}
