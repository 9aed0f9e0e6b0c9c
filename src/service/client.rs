//! Request clients.
//!
//! # Data Flow
//! ```text
//! RequestDescriptor
//!     → AuthInterceptor (Authorization, X-Button-Key)
//!     → Transport (HTTP, timeouts, X-Request-ID)
//!     → envelope::normalize_flat / normalize_raw
//!     → AuthInterceptor::on_backend_fail (logout, modal, refresh)
//!     → RefreshCoordinator (single flight) → replay once
//!     → payload `data` | ClientError (notified via on_error)
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::auth::LoginRequest;
use crate::observability::metrics;
use crate::service::codes::{CodePolicy, CodePolicyTable};
use crate::service::envelope::{normalize_flat, normalize_raw, BackendFailure, Normalized};
use crate::service::interceptor::{AuthInterceptor, FailAction};
use crate::service::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::service::request::RequestDescriptor;
use crate::service::transport::Transport;
use crate::session::surface::SESSION_EXPIRED_MESSAGE;
use crate::session::{CredentialStore, LoginToken, Navigator, Notifier, SessionContext};

pub const REFRESH_TOKEN_PATH: &str = "/auth/refreshToken";

/// Secondary backend serving the raw-envelope `/auth` endpoints.
pub const AUTH_BACKEND_KEY: &str = "demo";

fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(format!("unexpected payload: {}", e)))
}

struct FlatInner {
    transport: Transport,
    interceptor: AuthInterceptor,
    refresh: RefreshCoordinator,
}

impl FlatInner {
    fn session(&self) -> &Arc<SessionContext> {
        self.interceptor.session()
    }

    /// Dispatch and normalize without any failure policy.
    async fn dispatch_flat(&self, desc: &RequestDescriptor) -> ClientResult<(Normalized, Option<String>)> {
        let auth = self.interceptor.request_headers(desc, true)?;
        let response = self.transport.dispatch(desc, auth.headers).await?;
        let normalized = normalize_flat(&response.body, self.interceptor.table())?;
        Ok((normalized, auth.token))
    }

    async fn execute(self: &Arc<Self>, desc: &RequestDescriptor) -> ClientResult<Value> {
        let mut allow_refresh = true;
        loop {
            let (normalized, sent_token) = self.dispatch_flat(desc).await?;
            let failure = match normalized {
                Normalized::Success(data) => return Ok(data),
                Normalized::Failure(failure) => failure,
            };

            let failure = match self.interceptor.on_backend_fail(failure) {
                FailAction::Fail(err) => return Err(err),
                FailAction::Refresh(failure) => failure,
            };

            if !allow_refresh {
                tracing::warn!(
                    code = %failure.code,
                    path = %desc.path,
                    "Replayed request was rejected with an expired token"
                );
                self.session().end_session("expired_after_refresh");
                return Err(ClientError::TokenExpired {
                    code: failure.code,
                    msg: failure.msg,
                });
            }
            allow_refresh = false;

            let current = self.session().access_token();
            let outcome = if current.is_some() && current != sent_token {
                tracing::debug!(path = %desc.path, "Token already replaced, replaying");
                RefreshOutcome::Refreshed
            } else {
                self.refresh_shared().await
            };

            match outcome {
                RefreshOutcome::Refreshed => {
                    metrics::record_retry();
                    tracing::debug!(path = %desc.path, "Replaying request with refreshed token");
                }
                RefreshOutcome::Failed => {
                    return Err(ClientError::TokenExpired {
                        code: failure.code,
                        msg: failure.msg,
                    })
                }
            }
        }
    }

    async fn refresh_shared(self: &Arc<Self>) -> RefreshOutcome {
        let inner = Arc::clone(self);
        self.refresh
            .refresh(move || async move {
                match inner.refresh_tokens().await {
                    Ok(_) => RefreshOutcome::Refreshed,
                    Err(e) => {
                        tracing::warn!(error = %e, "Token refresh failed");
                        RefreshOutcome::Failed
                    }
                }
            })
            .await
    }

    /// `POST /auth/refreshToken`. Never enters the expired-token branch.
    async fn refresh_tokens(&self) -> ClientResult<LoginToken> {
        let result = self.try_refresh().await;
        metrics::record_token_refresh(result.is_ok());
        match &result {
            Ok(_) => tracing::info!("Access token refreshed"),
            Err(ClientError::LogoutModal { .. }) => {}
            Err(_) => self.session().end_session("refresh_failed"),
        }
        result
    }

    async fn try_refresh(&self) -> ClientResult<LoginToken> {
        let refresh_token = self
            .session()
            .refresh_token()
            .ok_or_else(|| ClientError::RefreshFailed("no refresh token stored".into()))?;

        let desc = RequestDescriptor::post(REFRESH_TOKEN_PATH)
            .json_value(json!({ "refreshToken": refresh_token }));
        let (normalized, _) = self
            .dispatch_flat(&desc)
            .await
            .map_err(|e| ClientError::RefreshFailed(e.to_string()))?;

        match normalized {
            Normalized::Success(data) => {
                let token: LoginToken = decode(data).map_err(|e| ClientError::RefreshFailed(e.to_string()))?;
                if token.token.is_empty() {
                    return Err(ClientError::RefreshFailed("empty access token".into()));
                }
                self.session().replace_tokens(token.clone());
                Ok(token)
            }
            Normalized::Failure(failure) => Err(self.refresh_failure(failure)),
        }
    }

    fn refresh_failure(&self, failure: BackendFailure) -> ClientError {
        if self.interceptor.table().classify(&failure.code) == Some(CodePolicy::RefreshToken) {
            tracing::error!(
                code = %failure.code,
                "Refresh endpoint answered with an expired-token code; it must answer with a logout code"
            );
            return ClientError::RefreshFailed(format!("expired-token code {} from refresh endpoint", failure.code));
        }
        match self.interceptor.on_backend_fail(failure) {
            FailAction::Fail(err @ ClientError::LogoutModal { .. }) => err,
            FailAction::Fail(err) => ClientError::RefreshFailed(err.to_string()),
            FailAction::Refresh(failure) => ClientError::RefreshFailed(failure.msg),
        }
    }
}

/// Client for the primary backend (flat envelope, full auth policy).
#[derive(Clone)]
pub struct FlatClient {
    inner: Arc<FlatInner>,
}

impl FlatClient {
    pub fn new(
        transport: Transport,
        table: CodePolicyTable,
        session: Arc<SessionContext>,
        refresh_reuse: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(FlatInner {
                transport,
                interceptor: AuthInterceptor::new(table, session),
                refresh: RefreshCoordinator::new(refresh_reuse),
            }),
        }
    }

    /// Send a request and return the raw `data` payload.
    pub async fn request_value(&self, desc: RequestDescriptor) -> ClientResult<Value> {
        let result = self.inner.execute(&desc).await;
        if let Err(err) = &result {
            self.inner.interceptor.on_error(err);
        }
        result
    }

    /// Send a request and decode the `data` payload into `T`.
    pub async fn request<T: DeserializeOwned>(&self, desc: RequestDescriptor) -> ClientResult<T> {
        let value = self.request_value(desc).await?;
        decode(value).inspect_err(|err| self.inner.interceptor.on_error(err))
    }

    /// Refresh tokens now, sharing any refresh already in flight.
    pub async fn refresh(&self) -> ClientResult<()> {
        match self.inner.refresh_shared().await {
            RefreshOutcome::Refreshed => Ok(()),
            RefreshOutcome::Failed => Err(ClientError::RefreshFailed("token refresh was rejected".into())),
        }
    }

    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.inner.refresh
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        self.inner.session()
    }

    pub fn base_url(&self) -> &str {
        self.inner.transport.base_url()
    }
}

impl std::fmt::Debug for FlatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatClient")
            .field("base_url", &self.inner.transport.base_url())
            .field("refresh", &self.inner.refresh)
            .finish()
    }
}

/// Client for the raw-envelope backend. Any failure ends the session.
#[derive(Debug, Clone)]
pub struct RawClient {
    transport: Transport,
    interceptor: AuthInterceptor,
}

impl RawClient {
    pub fn new(transport: Transport, table: CodePolicyTable, session: Arc<SessionContext>) -> Self {
        Self {
            transport,
            interceptor: AuthInterceptor::new(table, session),
        }
    }

    async fn execute(&self, desc: &RequestDescriptor) -> ClientResult<Value> {
        let auth = self.interceptor.request_headers(desc, false)?;
        let response = self.transport.dispatch(desc, auth.headers).await?;
        match normalize_raw(&response.body)? {
            Normalized::Success(data) => Ok(data),
            Normalized::Failure(failure) => {
                metrics::record_backend_failure(&failure.code, "raw");
                Err(failure.into_error())
            }
        }
    }

    fn on_error(&self, err: &ClientError) {
        let session = self.interceptor.session();
        if let ClientError::Status { status: 401, .. } = err {
            tracing::info!("Auth backend rejected credentials");
            session.notify_error_raw(SESSION_EXPIRED_MESSAGE);
            session.end_session("unauthorized");
            return;
        }
        tracing::warn!(error = %err, "Auth request failed");
        session.end_session("auth_request_failed");
        session.notify_error_raw(&err.user_message());
    }

    pub async fn request_value(&self, desc: RequestDescriptor) -> ClientResult<Value> {
        let result = self.execute(&desc).await;
        if let Err(err) = &result {
            self.on_error(err);
        }
        result
    }

    pub async fn request<T: DeserializeOwned>(&self, desc: RequestDescriptor) -> ClientResult<T> {
        let value = self.request_value(desc).await?;
        decode(value).inspect_err(|err| self.on_error(err))
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        self.interceptor.session()
    }
}

/// Both backends plus the session they share.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    flat: FlatClient,
    auth: RawClient,
    session: Arc<SessionContext>,
}

impl ConsoleClient {
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let session = SessionContext::new(&config.session, credentials, navigator, notifier);
        let table = CodePolicyTable::from_config(&config.service);

        let primary = config.service.primary_url();
        let auth_url = config
            .service
            .other_url(AUTH_BACKEND_KEY)
            .ok_or_else(|| ClientError::InvalidUrl(format!("no '{}' backend configured", AUTH_BACKEND_KEY)))?;

        tracing::info!(primary = %primary, auth = %auth_url, "Console client configured");

        let flat = FlatClient::new(
            Transport::new(&primary, &config.timeouts)?,
            table.clone(),
            session.clone(),
            Duration::from_millis(config.session.refresh_reuse_ms),
        );
        let auth = RawClient::new(Transport::new(&auth_url, &config.timeouts)?, table, session.clone());

        Ok(Self { flat, auth, session })
    }

    pub fn flat(&self) -> &FlatClient {
        &self.flat
    }

    pub fn auth(&self) -> &RawClient {
        &self.auth
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Sign in against the auth backend and store the returned tokens.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<()> {
        let token = crate::api::auth::fetch_login(&self.auth, request).await?;
        if token.token.is_empty() {
            return Err(ClientError::Decode("login response carried no token".into()));
        }
        self.flat.refresh_coordinator().reset();
        self.session.login(token);
        Ok(())
    }

    /// Drop local credentials and go to the login page.
    pub fn logout(&self) {
        self.flat.refresh_coordinator().reset();
        self.session.end_session("user_logout");
    }

    /// Release session-scoped UI state.
    pub fn teardown(&self) {
        self.flat.refresh_coordinator().reset();
        self.session.teardown();
    }
}
