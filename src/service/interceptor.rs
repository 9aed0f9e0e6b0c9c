//! Auth interceptor for the flat-envelope client.
//!
//! # Responsibilities
//! - Attach `Authorization` and `X-Button-Key` to outgoing requests
//! - Classify failing backend codes into session actions
//! - Decide which errors reach the notification surface

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::service::codes::{CodePolicy, CodePolicyTable};
use crate::service::envelope::BackendFailure;
use crate::service::request::{RequestDescriptor, BUTTON_KEY_HEADER};
use crate::session::SessionContext;

/// Headers for one dispatch plus the token they carry.
#[derive(Debug)]
pub struct OutgoingAuth {
    pub headers: HeaderMap,
    pub token: Option<String>,
}

/// What the client does after a backend failure.
#[derive(Debug)]
pub enum FailAction {
    /// Refresh the token and replay the request.
    Refresh(BackendFailure),
    /// Surface the error to the caller.
    Fail(ClientError),
}

#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    table: CodePolicyTable,
    session: Arc<SessionContext>,
}

impl AuthInterceptor {
    pub fn new(table: CodePolicyTable, session: Arc<SessionContext>) -> Self {
        Self { table, session }
    }

    pub fn table(&self) -> &CodePolicyTable {
        &self.table
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Build auth headers from the token current at dispatch time. The
    /// `Authorization` header is omitted when signed out.
    pub fn request_headers(
        &self,
        desc: &RequestDescriptor,
        with_button_key: bool,
    ) -> ClientResult<OutgoingAuth> {
        let mut headers = HeaderMap::new();
        let token = self.session.access_token();

        if let Some(token) = &token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::InvalidHeader(format!("Authorization: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        if with_button_key {
            let key = desc.effective_button_key();
            let value = HeaderValue::from_str(key)
                .map_err(|e| ClientError::InvalidHeader(format!("{}: {}", BUTTON_KEY_HEADER, e)))?;
            headers.insert(BUTTON_KEY_HEADER, value);
        }

        Ok(OutgoingAuth { headers, token })
    }

    /// Apply the code policy for a failing envelope.
    pub fn on_backend_fail(&self, failure: BackendFailure) -> FailAction {
        let policy = self.table.classify(&failure.code);
        metrics::record_backend_failure(
            &failure.code,
            policy.map(|p| p.as_str()).unwrap_or("error"),
        );

        match policy {
            Some(CodePolicy::SilentLogout) => {
                tracing::info!(code = %failure.code, "Backend requested silent logout");
                self.session.end_session("logout_code");
                FailAction::Fail(ClientError::LogoutSilent { code: failure.code })
            }
            Some(CodePolicy::ModalLogout) => {
                tracing::info!(code = %failure.code, msg = %failure.msg, "Backend requested modal logout");
                self.session.show_logout_modal(&failure.msg);
                FailAction::Fail(ClientError::LogoutModal {
                    code: failure.code,
                    msg: failure.msg,
                })
            }
            Some(CodePolicy::RefreshToken) => {
                tracing::debug!(code = %failure.code, "Access token expired");
                FailAction::Refresh(failure)
            }
            None => {
                tracing::debug!(code = %failure.code, msg = %failure.msg, "Backend request failed");
                FailAction::Fail(failure.into_error())
            }
        }
    }

    /// Show an error unless the session layer already gave feedback for it.
    pub fn on_error(&self, err: &ClientError) {
        if err.is_session_handled() {
            return;
        }
        if let Some(code) = err.backend_code() {
            if self.table.suppresses_notification(code) {
                return;
            }
        }
        tracing::warn!(error = %err, "Request failed");
        self.session.notify_error(&err.user_message());
    }
}
