//! Collaborators owned by the view layer: navigation and notifications.

use std::sync::{Arc, Weak};

use crate::session::context::SessionContext;
use crate::session::messages::MessageGuard;

/// Title used for the blocking logout dialog.
pub const MODAL_TITLE: &str = "Error";
/// Label of the dialog's acknowledge button.
pub const MODAL_CONFIRM_TEXT: &str = "Confirm";
/// Toast shown when the auth backend answers HTTP 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Login has expired, please log in again";

/// Sends the user to the login entry point.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Global notification surface.
pub trait Notifier: Send + Sync {
    /// Show an error toast. The toast counts as displayed until dropped.
    fn error(&self, toast: Toast);

    /// Show a transient success message.
    fn success(&self, message: &str);

    /// Show a blocking logout dialog. The user resolves it through
    /// [`LogoutModal::confirm`] or [`LogoutModal::cancel`]; dropping it counts
    /// as dismissal.
    fn modal(&self, modal: LogoutModal);
}

/// An error toast handed to the [`Notifier`].
#[derive(Debug)]
pub struct Toast {
    message: String,
    _guard: Option<MessageGuard>,
}

impl Toast {
    pub(crate) fn new(message: &str, guard: Option<MessageGuard>) -> Self {
        Self {
            message: message.to_string(),
            _guard: guard,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A pending "you have been logged out" dialog.
///
/// Every way of closing it ends the session and releases the message. The
/// modal only holds a weak handle, so a dialog that outlives its session
/// closes without effect.
pub struct LogoutModal {
    title: String,
    content: String,
    confirm_text: String,
    session: Weak<SessionContext>,
    guard: Option<MessageGuard>,
}

impl LogoutModal {
    pub(crate) fn new(session: &Arc<SessionContext>, content: &str, guard: MessageGuard) -> Self {
        Self {
            title: MODAL_TITLE.to_string(),
            content: content.to_string(),
            confirm_text: MODAL_CONFIRM_TEXT.to_string(),
            session: Arc::downgrade(session),
            guard: Some(guard),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn confirm_text(&self) -> &str {
        &self.confirm_text
    }

    pub fn confirm(mut self) {
        self.resolve("modal_confirm");
    }

    pub fn cancel(mut self) {
        self.resolve("modal_cancel");
    }

    fn resolve(&mut self, reason: &'static str) {
        if let Some(guard) = self.guard.take() {
            if let Some(session) = self.session.upgrade() {
                session.end_session(reason);
            }
            drop(guard);
        }
    }
}

impl Drop for LogoutModal {
    fn drop(&mut self) {
        self.resolve("modal_dismissed");
    }
}

impl std::fmt::Debug for LogoutModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoutModal")
            .field("title", &self.title)
            .field("content", &self.content)
            .field("open", &self.guard.is_some())
            .finish()
    }
}
