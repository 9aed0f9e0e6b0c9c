//! Request descriptors.
//!
//! A descriptor is immutable once dispatched; replays clone it and pick up the
//! refreshed credential at dispatch time.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;

/// Header carrying the UI action that triggered a request.
pub const BUTTON_KEY_HEADER: &str = "X-Button-Key";
/// Value sent when no button key is set.
pub const DEFAULT_BUTTON_KEY: &str = "pass";

/// One part of a multipart upload.
#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
    pub button_key: Option<String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            button_key: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ClientResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn json_value(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn button_key(mut self, key: impl Into<String>) -> Self {
        self.button_key = Some(key.into());
        self
    }

    /// Button key for the permission header: explicit key, else a `buttonKey`
    /// string in the JSON body, else [`DEFAULT_BUTTON_KEY`].
    pub fn effective_button_key(&self) -> &str {
        if let Some(key) = &self.button_key {
            return key;
        }
        if let RequestBody::Json(Value::Object(map)) = &self.body {
            if let Some(Value::String(key)) = map.get("buttonKey") {
                return key;
            }
        }
        DEFAULT_BUTTON_KEY
    }
}
