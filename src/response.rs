//! Raw responses and their classification into success or [`RestError`].

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ErrorRegistry, RestError, Result, TwitterError};

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Read status, headers and body from a transport response.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// HTTP reason phrase, or an empty string for non-standard codes.
    pub fn reason(&self) -> &str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(TwitterError::ParseError)
    }
}

/// Pass 2xx responses through unchanged; turn anything else into a
/// [`RestError`] whose kind comes from `registry`.
///
/// The body's `error` field is attached when the body is a JSON object that
/// has one. A body that is empty or not JSON leaves it unset.
pub fn classify(response: ApiResponse, uri: &str, registry: &ErrorRegistry) -> Result<ApiResponse> {
    if response.status.is_success() {
        return Ok(response);
    }

    let code = response.status.as_u16();
    let error = RestError {
        kind: registry.lookup(code),
        code,
        message: response.reason().to_string(),
        uri: uri.to_string(),
        error: extract_error_field(&response.body),
    };
    tracing::debug!(code, kind = %error.kind, uri, "request failed");
    Err(TwitterError::Rest(error))
}

fn extract_error_field(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
