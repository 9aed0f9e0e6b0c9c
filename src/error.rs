//! Client error taxonomy.

use thiserror::Error;

/// Errors surfaced by the request pipeline.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure from the underlying HTTP client.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured deadline.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The server answered with a non-success HTTP status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Session ended without user-facing feedback.
    #[error("Session ended by backend code {code}")]
    LogoutSilent { code: String },

    /// Session ended behind a blocking modal.
    #[error("Session ended by backend code {code}: {msg}")]
    LogoutModal { code: String, msg: String },

    /// Access token expired and could not be renewed.
    #[error("Access token expired (code {code}): {msg}")]
    TokenExpired { code: String, msg: String },

    /// Any other backend failure code.
    #[error("{msg}")]
    Backend { code: String, msg: String },

    /// The token refresh call itself failed.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Local I/O, e.g. the credential file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Backend status code carried by the error, if any.
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            ClientError::LogoutSilent { code }
            | ClientError::LogoutModal { code, .. }
            | ClientError::TokenExpired { code, .. }
            | ClientError::Backend { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True for the kinds the session layer already handled (navigation,
    /// modal) and which are never shown as a raw error.
    pub fn is_session_handled(&self) -> bool {
        matches!(
            self,
            ClientError::LogoutSilent { .. }
                | ClientError::LogoutModal { .. }
                | ClientError::TokenExpired { .. }
                | ClientError::RefreshFailed(_)
        )
    }

    /// Message suitable for the notification surface.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Backend { msg, .. } => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
