//! Recording transport for tests

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::endpoint::Endpoint;
use super::error::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Replays queued responses per endpoint path and records every request.
/// Unrouted requests fail as network errors.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<&'static str, VecDeque<HttpResponse>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call to `endpoint`
    pub fn respond(&self, endpoint: Endpoint, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint.path())
            .or_default()
            .push_back(HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests sent to `endpoint`
    pub fn requests_to(&self, endpoint: Endpoint) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.ends_with(endpoint.path()))
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let path = Endpoint::all()
            .iter()
            .map(|e| e.path())
            .filter(|p| request.url.ends_with(p))
            .max_by_key(|p| p.len());
        self.requests.lock().unwrap().push(request.clone());

        path.and_then(|p| {
            self.responses
                .lock()
                .unwrap()
                .get_mut(p)
                .and_then(VecDeque::pop_front)
        })
        .ok_or_else(|| ApiError::Network(format!("connection refused: {}", request.url)))
    }
}
