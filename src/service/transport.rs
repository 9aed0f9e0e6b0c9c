//! HTTP transport.
//!
//! # Responsibilities
//! - Join the base URL with the descriptor path
//! - Serialize JSON and multipart bodies
//! - Tag every dispatch with a fresh `X-Request-ID`
//! - Enforce connect and request timeouts
//! - Map non-2xx statuses to [`ClientError::Status`]

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use crate::config::TimeoutConfig;
use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::service::request::{RequestBody, RequestDescriptor};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Raw successful transport response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub request_id: String,
}

#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    request_timeout_secs: u64,
}

impl Transport {
    pub fn new(base_url: &str, timeouts: &TimeoutConfig) -> ClientResult<Self> {
        url::Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: timeouts.request_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a descriptor path.
    pub fn url_for(&self, path: &str) -> ClientResult<url::Url> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        url::Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", joined, e)))
    }

    fn build_headers(desc: &RequestDescriptor, extra: HeaderMap) -> ClientResult<HeaderMap> {
        let mut headers = extra;
        for (name, value) in &desc.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn build_form(parts: &[crate::service::request::FormPart]) -> ClientResult<Form> {
        let mut form = Form::new();
        for part in parts {
            let mut p = Part::bytes(part.bytes.clone());
            if let Some(file_name) = &part.file_name {
                p = p.file_name(file_name.clone());
            }
            if let Some(mime) = &part.mime {
                p = p.mime_str(mime)?;
            }
            form = form.part(part.name.clone(), p);
        }
        Ok(form)
    }

    /// Send one request. `auth_headers` are computed by the caller's
    /// interceptor right before dispatch.
    pub async fn dispatch(
        &self,
        desc: &RequestDescriptor,
        auth_headers: HeaderMap,
    ) -> ClientResult<TransportResponse> {
        let url = self.url_for(&desc.path)?;
        let request_id = Uuid::new_v4().to_string();
        let headers = Self::build_headers(desc, auth_headers)?;

        let mut builder = self
            .http
            .request(desc.method.clone(), url)
            .headers(headers)
            .header(X_REQUEST_ID, request_id.as_str());
        if !desc.query.is_empty() {
            builder = builder.query(&desc.query);
        }
        builder = match &desc.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_form(parts)?),
        };

        tracing::debug!(
            request_id = %request_id,
            method = %desc.method,
            path = %desc.path,
            "Dispatching request"
        );

        let start = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                metrics::record_request(desc.method.as_str(), "timeout", start.elapsed());
                tracing::warn!(request_id = %request_id, path = %desc.path, "Request timed out");
                return Err(ClientError::Timeout(self.request_timeout_secs));
            }
            Err(e) => {
                metrics::record_request(desc.method.as_str(), "transport_error", start.elapsed());
                tracing::warn!(request_id = %request_id, path = %desc.path, error = %e, "Request failed");
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) if e.is_timeout() => {
                return Err(ClientError::Timeout(self.request_timeout_secs));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            request_id = %request_id,
            status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Response received"
        );

        if !(200..300).contains(&status) {
            metrics::record_request(desc.method.as_str(), "http_error", start.elapsed());
            return Err(ClientError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        metrics::record_request(desc.method.as_str(), "ok", start.elapsed());
        Ok(TransportResponse {
            status,
            body,
            request_id,
        })
    }
}
