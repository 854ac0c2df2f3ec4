//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::Client;

use super::endpoint::Method;
use super::error::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Sends requests with a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Network(format!("cannot reach {}: {}", request.url, e))
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
