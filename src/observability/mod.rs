//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline, session, table controller:
//!     → logging.rs (structured log events, request id on every dispatch)
//!     → metrics.rs (counters through the `metrics` facade)
//! ```

pub mod logging;
pub mod metrics;
