//! Terminal collaborators for command-line front ends.
//!
//! Notifications go to stderr. Logout dialogs cannot block a
//! non-interactive shell, so they are printed and confirmed at once.

use crate::session::surface::{LogoutModal, Navigator, Notifier, Toast};

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, toast: Toast) {
        eprintln!("error: {}", toast.message());
    }

    fn success(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn modal(&self, modal: LogoutModal) {
        eprintln!("{}: {} [{}]", modal.title(), modal.content(), modal.confirm_text());
        modal.confirm();
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self) {
        eprintln!("Signed out. Run `admin-console login` to sign in again.");
    }
}
