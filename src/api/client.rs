//! Career service client
//!
//! Typed wrappers around every endpoint. The client attaches
//! `Authorization: Bearer <token>` whenever it holds a token and returns the
//! parsed body or an [`ApiError`]. Nothing is retried.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::{
    CounselRequest, CounsellingEnvelope, LoginRequest, LoginResponse, MessageResponse,
    QuizEnvelope, QuizGenerateRequest, QuizSubmission, RegisterRequest, RoadmapEnvelope,
    RoadmapRequest,
};
use super::endpoint::Endpoint;
use super::error::{ApiError, ApiResult};
use super::transport::{HttpRequest, HttpTransport};
use crate::models::{CounsellingReport, Quiz, QuizResult, Roadmap};

/// Default service location
pub const DEFAULT_API_BASE: &str = "https://birjuram-ai.onrender.com";

/// Client for the career-guidance service
#[derive(Debug, Clone)]
pub struct CareerClient<T> {
    transport: T,
    base_url: String,
    token: Option<String>,
}

impl<T: HttpTransport> CareerClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Builder method: authenticate subsequent requests
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request for an endpoint
    pub fn prepare<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> ApiResult<HttpRequest> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Malformed(format!("cannot encode request: {}", e)))?;

        Ok(HttpRequest {
            method: endpoint.method(),
            url: endpoint.url(&self.base_url),
            headers,
            body,
        })
    }

    async fn execute<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> ApiResult<R> {
        let request = self.prepare(endpoint, body)?;
        if endpoint.requires_auth() && self.token.is_none() {
            tracing::debug!(endpoint = %endpoint, "No token for an authenticated endpoint");
        }
        tracing::debug!(
            method = %endpoint.method(),
            path = endpoint.path(),
            authenticated = self.token.is_some(),
            "Sending request"
        );

        let result = match self.transport.send(request).await {
            Ok(response) => response.into_result(),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::warn!(endpoint = %endpoint, error = %e, "Request failed");
        }
        result
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<R> {
        self.execute::<(), R>(endpoint, None).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> ApiResult<R> {
        self.execute(endpoint, Some(body)).await
    }

    // ============ Auth ============

    /// Create an account. Returns the service's confirmation message, if any.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<Option<String>> {
        let response: Option<MessageResponse> = self.post(Endpoint::Register, request).await?;
        Ok(response.and_then(|r| r.message))
    }

    /// Exchange credentials for a token
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let response: Option<LoginResponse> = self.post(Endpoint::Login, request).await?;
        response.ok_or_else(|| ApiError::Malformed("empty login response".to_string()))
    }

    // ============ Roadmap ============

    /// The user's roadmap, or `None` when none has been generated
    pub async fn fetch_roadmap(&self) -> ApiResult<Option<Roadmap>> {
        absent_on_404(self.get::<Option<RoadmapEnvelope>>(Endpoint::Roadmap).await)
            .map(|e| e.flatten().and_then(|e| e.roadmap))
    }

    pub async fn generate_roadmap(&self, request: &RoadmapRequest) -> ApiResult<Roadmap> {
        let envelope: Option<RoadmapEnvelope> =
            self.post(Endpoint::GenerateRoadmap, request).await?;
        envelope
            .and_then(|e| e.roadmap)
            .ok_or_else(|| ApiError::Malformed("response has no roadmap".to_string()))
    }

    // ============ Counselling ============

    /// The user's counselling report, or `None` when none exists
    pub async fn fetch_counselling(&self) -> ApiResult<Option<CounsellingReport>> {
        absent_on_404(self.get::<Option<CounsellingEnvelope>>(Endpoint::Career).await)
            .map(|e| e.flatten().and_then(|e| e.counseling_report))
    }

    pub async fn counsel(&self, request: &CounselRequest) -> ApiResult<CounsellingReport> {
        let envelope: Option<CounsellingEnvelope> = self.post(Endpoint::Counsel, request).await?;
        envelope
            .and_then(|e| e.counseling_report)
            .ok_or_else(|| ApiError::Malformed("response has no counselling report".to_string()))
    }

    // ============ Quiz ============

    /// All quizzes the service holds for the user, ordered by week
    pub async fn fetch_quizzes(&self) -> ApiResult<Vec<Quiz>> {
        absent_on_404(self.get::<Option<QuizEnvelope>>(Endpoint::Quizzes).await)
            .map(|e| e.flatten().map(QuizEnvelope::into_quizzes).unwrap_or_default())
    }

    pub async fn generate_quiz(&self, week: u32) -> ApiResult<Quiz> {
        let envelope: Option<QuizEnvelope> = self
            .post(Endpoint::GenerateQuiz, &QuizGenerateRequest { week })
            .await?;
        envelope
            .and_then(|e| e.quiz)
            .ok_or_else(|| ApiError::Malformed("response has no quiz".to_string()))
    }

    pub async fn submit_quiz(&self, submission: &QuizSubmission) -> ApiResult<QuizResult> {
        let result: Option<QuizResult> = self.post(Endpoint::SubmitQuiz, submission).await?;
        result.ok_or_else(|| ApiError::Malformed("empty submission response".to_string()))
    }
}

/// Fetch endpoints answer 404 when the user has nothing yet
fn absent_on_404<R>(result: ApiResult<Option<R>>) -> ApiResult<Option<Option<R>>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;

    fn client(mock: &MockTransport) -> CareerClient<MockTransport> {
        CareerClient::new(mock.clone(), "http://service.test/")
    }

    #[tokio::test]
    async fn test_bearer_attached_only_with_token() {
        let mock = MockTransport::new();
        mock.respond(Endpoint::Roadmap, 200, r#"{"roadmap": null}"#);
        mock.respond(Endpoint::Roadmap, 200, r#"{"roadmap": null}"#);

        client(&mock).fetch_roadmap().await.unwrap();
        client(&mock)
            .with_token(Some("tok".into()))
            .fetch_roadmap()
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].header("Authorization"), None);
        assert_eq!(requests[1].header("Authorization"), Some("Bearer tok"));
        assert_eq!(requests[1].header("Content-Type"), Some("application/json"));
        assert_eq!(requests[1].url, "http://service.test/roadmap");
        assert_eq!(requests[1].method, Method::Get);
    }

    #[tokio::test]
    async fn test_empty_token_is_ignored() {
        let c = client(&MockTransport::new()).with_token(Some(String::new()));
        assert!(c.token().is_none());
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let mock = MockTransport::new();
        mock.respond(
            Endpoint::Login,
            200,
            r#"{"token": "abc", "user": {"username": "asha", "email": "a@x.io"}}"#,
        );

        let response = client(&mock)
            .login(&LoginRequest {
                username: "asha".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.token.as_deref(), Some("abc"));
        assert_eq!(response.user.unwrap().email, "a@x.io");

        let body: serde_json::Value =
            serde_json::from_str(mock.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"username": "asha", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_server_message_surfaces() {
        let mock = MockTransport::new();
        mock.respond(Endpoint::Register, 400, r#"{"message": "Email already used"}"#);

        let err = client(&mock)
            .register(&RegisterRequest {
                username: "a".into(),
                email: "a@x.io".into(),
                password: "pw".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already used");
    }

    #[tokio::test]
    async fn test_missing_resources_are_none() {
        let mock = MockTransport::new();
        mock.respond(Endpoint::Roadmap, 404, r#"{"message": "No roadmap"}"#);
        mock.respond(Endpoint::Career, 200, r#"{}"#);
        mock.respond(Endpoint::Quizzes, 200, r#"{"quiz": null}"#);

        let c = client(&mock).with_token(Some("t".into()));
        assert!(c.fetch_roadmap().await.unwrap().is_none());
        assert!(c.fetch_counselling().await.unwrap().is_none());
        assert!(c.fetch_quizzes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_without_payload_is_malformed() {
        let mock = MockTransport::new();
        mock.respond(Endpoint::GenerateQuiz, 200, r#"{"status": "queued"}"#);

        let err = client(&mock).generate_quiz(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_network_failure_passes_through() {
        let mock = MockTransport::new();
        let err = client(&mock).fetch_counselling().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
