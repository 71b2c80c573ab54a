//! Transport-neutral HTTP request/response types and the transport seam.
//!
//! The application layer speaks [`ApiRequest`]/[`ApiResponse`]; a concrete
//! [`HttpTransport`] (reqwest in production, a scripted double in tests)
//! performs the actual exchange.

use crate::error::{LikeboardError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path below the base URL, e.g. `/likes/my-likes/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Layers `overrides` on top of `defaults`.
///
/// Names compare case-insensitively; an override replaces the default with
/// the same name, and every other header from either side is kept.
pub fn merge_headers(
    defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .into_iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
        .collect();
    merged.extend(overrides.iter().cloned());
    merged
}

/// Raw response handed back to callers for interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Human-readable error detail from the body, or `fallback`.
    ///
    /// Understands `{"detail": ...}`, `{"message": ...}`, `{"errors": {field: [msgs]}}`
    /// and bare field-error maps such as `{"non_field_errors": [...]}`.
    pub fn error_detail(&self, fallback: &str) -> String {
        serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|value| extract_detail(&value))
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Converts a non-success response into a [`LikeboardError::Server`].
    pub fn into_error(self, fallback: &str) -> LikeboardError {
        let detail = self.error_detail(fallback);
        LikeboardError::server(self.status, detail)
    }
}

fn extract_detail(value: &Value) -> Option<String> {
    let object = value.as_object()?;

    for key in ["detail", "message", "error"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    let field_errors = object.get("errors").unwrap_or(value);
    let messages = flatten_messages(field_errors);
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(", "))
    }
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => vec![text.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        Value::Object(map) => map.values().flat_map(flatten_messages).collect(),
        _ => Vec::new(),
    }
}

/// Performs HTTP exchanges against the backend.
///
/// Implementations return `Err(LikeboardError::Transport)` only when no
/// response was received; every HTTP status, including errors, is an `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
