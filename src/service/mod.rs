//! Request pipeline: transport, envelope normalization, auth policy and
//! single-flight token refresh.

pub mod client;
pub mod codes;
pub mod envelope;
pub mod interceptor;
pub mod refresh;
pub mod request;
pub mod transport;

pub use client::{ConsoleClient, FlatClient, RawClient};
pub use codes::{CodePolicy, CodePolicyTable};
pub use envelope::{BackendFailure, Envelope, Normalized};
pub use interceptor::{AuthInterceptor, FailAction};
pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use request::{FormPart, RequestBody, RequestDescriptor};
pub use transport::Transport;
