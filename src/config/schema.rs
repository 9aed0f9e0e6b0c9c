//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the console client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend endpoints and response-code policies.
    pub service: ServiceConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Session and token refresh behavior.
    pub session: SessionConfig,

    /// Table pagination defaults.
    pub table: TableConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the primary backend (flat envelope).
    pub base_url: String,

    /// Secondary backends keyed by name (e.g. "demo" for the auth service).
    pub other_base_urls: BTreeMap<String, String>,

    /// Route every backend through the local development proxy.
    pub http_proxy: bool,

    /// Origin of the development proxy.
    pub proxy_origin: String,

    /// Backend code meaning success for the flat envelope.
    pub success_code: String,

    /// Codes that end the session silently.
    pub logout_codes: Vec<String>,

    /// Codes that end the session behind a blocking modal.
    pub modal_logout_codes: Vec<String>,

    /// Codes that mean the access token must be refreshed.
    pub expired_token_codes: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let mut other_base_urls = BTreeMap::new();
        other_base_urls.insert("demo".to_string(), "http://localhost:9529".to_string());

        Self {
            base_url: "http://localhost:9528".to_string(),
            other_base_urls,
            http_proxy: false,
            proxy_origin: "http://localhost:9527".to_string(),
            success_code: "0000".to_string(),
            logout_codes: vec!["8888".to_string(), "8889".to_string()],
            modal_logout_codes: vec!["7777".to_string(), "7778".to_string()],
            expired_token_codes: vec!["9999".to_string(), "9998".to_string(), "3333".to_string()],
        }
    }
}

impl ServiceConfig {
    /// Effective base URL of the primary backend.
    pub fn primary_url(&self) -> String {
        if self.http_proxy {
            format!("{}/proxy-default", self.proxy_origin.trim_end_matches('/'))
        } else {
            self.base_url.clone()
        }
    }

    /// Effective base URL of a secondary backend.
    pub fn other_url(&self, key: &str) -> Option<String> {
        let url = self.other_base_urls.get(key)?;
        if self.http_proxy {
            Some(format!("{}/proxy-{}", self.proxy_origin.trim_end_matches('/'), key))
        } else {
            Some(url.clone())
        }
    }
}

/// Timeout configuration for backend calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a resolved refresh outcome is shared with late callers.
    pub refresh_reuse_ms: u64,

    /// Login redirects requested within this window collapse into one.
    pub redirect_delay_ms: u64,

    /// Where the CLI persists tokens between runs.
    pub credential_file: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_reuse_ms: 1000,
            redirect_delay_ms: 200,
            credential_file: None,
        }
    }
}

/// Table pagination configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    /// Page size used on first load and when the backend reports a
    /// non-positive one.
    pub default_page_size: i64,

    /// Sizes offered by the size changer.
    pub page_size_options: Vec<i64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 15, 20, 25, 30],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}
