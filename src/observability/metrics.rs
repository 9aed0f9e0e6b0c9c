//! Metrics collection.
//!
//! # Metrics
//! - `client_requests_total` (counter): dispatched requests by method, outcome
//! - `client_request_duration_seconds` (histogram): round-trip latency
//! - `client_backend_failures_total` (counter): failures by backend code, policy
//! - `client_token_refresh_total` (counter): refresh network calls by result
//! - `client_retries_total` (counter): requests replayed after a refresh
//!
//! No exporter is installed here; the embedding application chooses one.

use std::time::Duration;

pub fn record_request(method: &str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!("client_requests_total", "method" => method.to_string(), "outcome" => outcome)
        .increment(1);
    metrics::histogram!("client_request_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_backend_failure(code: &str, policy: &'static str) {
    metrics::counter!("client_backend_failures_total", "code" => code.to_string(), "policy" => policy)
        .increment(1);
}

pub fn record_token_refresh(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("client_token_refresh_total", "result" => result).increment(1);
}

pub fn record_retry() {
    metrics::counter!("client_retries_total").increment(1);
}
