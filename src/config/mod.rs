//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides, comma-separated code lists)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → service::CodePolicyTable (typed code → policy map)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ClientConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServiceConfig;
pub use schema::SessionConfig;
pub use schema::TableConfig;
pub use schema::TimeoutConfig;
