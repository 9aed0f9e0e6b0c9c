//! Admin console client library.
//!
//! Headless client for the admin console backends: envelope normalization,
//! credential injection, session-expiry handling with single-flight token
//! refresh, typed endpoint wrappers and a UI-agnostic paginated table
//! controller.
//!
//! # Architecture Overview
//!
//! ```text
//!   view layer ──► table::TableController ──► api::* ──► service::FlatClient
//!                                                          │
//!        ┌─────────────────────────────────────────────────┘
//!        ▼
//!   AuthInterceptor ──► Transport (reqwest) ──► backend
//!        │                                        │
//!        │◄──────── envelope::normalize_flat ◄────┘
//!        │
//!        ├── silent logout ──► SessionContext::end_session ──► Navigator
//!        ├── modal logout  ──► ErrorMessageStack ──► Notifier::modal
//!        ├── expired token ──► RefreshCoordinator ──► replay once
//!        └── other         ──► Notifier::error (deduplicated)
//! ```

// Core pipeline
pub mod config;
pub mod error;
pub mod service;
pub mod session;

// Endpoints and views
pub mod api;
pub mod models;
pub mod table;

// Cross-cutting concerns
pub mod observability;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use service::{ConsoleClient, FlatClient, RawClient};
pub use session::SessionContext;
