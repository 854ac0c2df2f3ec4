//! HTTP transport seam
//!
//! The client prepares requests and interprets responses; a transport only
//! moves bytes. Native builds use reqwest, the web UI uses gloo-net.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::endpoint::Method;
use super::error::{ApiError, ApiResult};

/// A fully prepared request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value with this name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse a 2xx body into `T`; surface anything else as an [`ApiError`]
    pub fn into_result<T: DeserializeOwned>(self) -> ApiResult<T> {
        if !self.is_success() {
            return Err(ApiError::from_response(self.status, &self.body));
        }
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

/// Sends prepared requests. Failures to complete the exchange are
/// [`ApiError::Network`]; any status code is a successful send.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}
