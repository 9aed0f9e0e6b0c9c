//! Session context shared by every client built for one signed-in user.
//!
//! # Responsibilities
//! - Own tokens through the [`CredentialStore`]
//! - End sessions (clear tokens, redirect to login)
//! - Deduplicate error toasts and logout modals through the message stack
//! - Handle page unload while a logout modal is open

use std::sync::Arc;
use std::time::Duration;

use crate::config::SessionConfig;
use crate::session::credentials::{CredentialStore, LoginToken};
use crate::session::messages::{ErrorMessageStack, MessageKind};
use crate::session::redirect::LoginRedirect;
use crate::session::surface::{LogoutModal, Navigator, Notifier, Toast};

pub struct SessionContext {
    credentials: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    redirect: LoginRedirect,
    messages: ErrorMessageStack,
}

impl SessionContext {
    pub fn new(
        config: &SessionConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self> {
        Arc::new(Self {
            credentials,
            notifier,
            redirect: LoginRedirect::new(
                navigator,
                Duration::from_millis(config.redirect_delay_ms),
            ),
            messages: ErrorMessageStack::new(),
        })
    }

    /// Current access token, if signed in.
    pub fn access_token(&self) -> Option<String> {
        self.credentials
            .get()
            .map(|t| t.token)
            .filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.credentials
            .get()
            .map(|t| t.refresh_token)
            .filter(|t| !t.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// Store tokens after a successful login.
    pub fn login(&self, token: LoginToken) {
        self.redirect.cancel();
        self.credentials.set(token);
        tracing::info!("Session started");
    }

    /// Replace tokens after a refresh.
    pub fn replace_tokens(&self, token: LoginToken) {
        self.credentials.set(token);
        tracing::debug!("Session tokens replaced");
    }

    /// Clear tokens and send the user to the login page.
    pub fn end_session(&self, reason: &'static str) {
        self.credentials.clear();
        tracing::info!(reason, "Session ended");
        self.redirect.schedule();
    }

    /// Show an error toast unless the same text is already displayed.
    pub fn notify_error(&self, message: &str) {
        match self.messages.try_push(message, MessageKind::Toast) {
            Some(guard) => self.notifier.error(Toast::new(message, Some(guard))),
            None => tracing::debug!(message, "Suppressed duplicate error message"),
        }
    }

    /// Show an error toast without deduplication.
    pub fn notify_error_raw(&self, message: &str) {
        self.notifier.error(Toast::new(message, None));
    }

    pub fn notify_success(&self, message: &str) {
        self.notifier.success(message);
    }

    /// Show the logout modal for `message`. Returns `false` when a modal with
    /// the same text is already open.
    pub fn show_logout_modal(self: &Arc<Self>, message: &str) -> bool {
        match self.messages.try_push(message, MessageKind::LogoutModal) {
            Some(guard) => {
                tracing::warn!(message, "Showing logout modal");
                self.notifier
                    .modal(LogoutModal::new(self, message, guard));
                true
            }
            None => {
                tracing::debug!(message, "Logout modal already displayed");
                false
            }
        }
    }

    /// Page-unload hook: while a logout modal is open, leaving the page ends
    /// the session.
    pub fn handle_unload(&self) {
        if self.messages.has_logout_modal() {
            self.end_session("unload_during_modal");
        }
    }

    pub fn messages(&self) -> &ErrorMessageStack {
        &self.messages
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.is_pending()
    }

    /// Release displayed messages and any scheduled redirect.
    pub fn teardown(&self) {
        self.redirect.cancel();
        self.messages.clear();
        tracing::debug!("Session context torn down");
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("logged_in", &self.is_logged_in())
            .field("messages", &self.messages.len())
            .finish()
    }
}
