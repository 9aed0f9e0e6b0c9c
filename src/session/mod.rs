//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! login → SessionContext::login → CredentialStore::set
//! refresh → SessionContext::replace_tokens
//! logout codes / refresh failure / modal close / unload
//!     → SessionContext::end_session → CredentialStore::clear
//!     → LoginRedirect (debounced) → Navigator
//! error toasts, logout modals → ErrorMessageStack (dedup by text) → Notifier
//! ```

pub mod context;
pub mod credentials;
pub mod messages;
pub mod redirect;
pub mod surface;
pub mod terminal;

pub use context::SessionContext;
pub use credentials::{CredentialStore, FileCredentialStore, LoginToken, MemoryCredentialStore};
pub use messages::{ErrorMessageStack, MessageGuard, MessageKind};
pub use surface::{LogoutModal, Navigator, Notifier, Toast};
pub use terminal::{TerminalNavigator, TerminalNotifier};
