//! HTTP API Client
//!
//! gloo-net transport for the shared [`CareerClient`](birjuram::CareerClient)
//! and the API base URL override kept in `localStorage` under
//! `birjuram_api_url`.

use async_trait::async_trait;
use birjuram::api::{
    ApiError, ApiResult, HttpRequest, HttpResponse, HttpTransport, Method, DEFAULT_API_BASE,
};
use gloo_net::http::Request;

/// `localStorage` key overriding the service URL
pub const API_URL_KEY: &str = "birjuram_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Sends requests with the browser's `fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response: {}", e)))?;

        Ok(HttpResponse::new(status, body))
    }
}
