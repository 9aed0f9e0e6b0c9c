//! Configuration loading from disk and environment.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { key: String, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { key, reason } => write!(f, "Invalid {}: {}", key, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Split a comma-separated code list, dropping blanks.
pub fn split_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim() {
        "Y" | "y" | "true" | "1" => Ok(true),
        "N" | "n" | "false" | "0" | "" => Ok(false),
        other => Err(ConfigError::Env {
            key: key.to_string(),
            reason: format!("expected Y/N, got '{}'", other),
        }),
    }
}

/// Overlay environment-style settings on top of a parsed config.
///
/// `lookup` is usually `|key| std::env::var(key).ok()`.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let service = &mut config.service;

    if let Some(code) = lookup("SERVICE_SUCCESS_CODE") {
        service.success_code = code.trim().to_string();
    }
    if let Some(raw) = lookup("SERVICE_LOGOUT_CODES") {
        service.logout_codes = split_codes(&raw);
    }
    if let Some(raw) = lookup("SERVICE_MODAL_LOGOUT_CODES") {
        service.modal_logout_codes = split_codes(&raw);
    }
    if let Some(raw) = lookup("SERVICE_EXPIRED_TOKEN_CODES") {
        service.expired_token_codes = split_codes(&raw);
    }
    if let Some(url) = lookup("SERVICE_BASE_URL") {
        service.base_url = url.trim().to_string();
    }
    if let Some(raw) = lookup("SERVICE_OTHER_BASE_URL") {
        let urls: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Env {
                key: "SERVICE_OTHER_BASE_URL".to_string(),
                reason: e.to_string(),
            })?;
        service.other_base_urls = urls;
    }
    if let Some(raw) = lookup("HTTP_PROXY_ENABLED") {
        service.http_proxy = parse_flag("HTTP_PROXY_ENABLED", &raw)?;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }

    Ok(())
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ClientConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
