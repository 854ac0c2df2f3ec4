//! Login / sign-up modal

use crate::api::{
    ApiError, ApiResult, CareerClient, HttpTransport, LoginRequest, LoginResponse,
    RegisterRequest,
};
use crate::models::User;
use crate::session::{user_from_token, KeyValueStorage, Session, SessionStore};

use super::{required, FormError};

/// Shown after a successful registration
pub const SIGNUP_SUCCESS: &str = "Signup successful! Please login now.";
/// Shown after a successful login
pub const LOGIN_SUCCESS: &str = "Login successful!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Request the modal wants sent
#[derive(Debug, Clone, PartialEq)]
pub enum AuthRequest {
    Register(RegisterRequest),
    Login(LoginRequest),
}

/// Result of a completed submission
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Account created; the modal switched to login mode
    Registered,
    /// Session committed; the modal closed
    LoggedIn(Session),
    /// Failure shown inline
    Failed(String),
}

/// Auth modal state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthModal {
    pub open: bool,
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    submitting: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl AuthModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_login(&mut self) {
        self.open_in(AuthMode::Login);
    }

    pub fn open_register(&mut self) {
        self.open_in(AuthMode::Register);
    }

    fn open_in(&mut self, mode: AuthMode) {
        self.open = true;
        self.mode = mode;
        self.error = None;
        self.notice = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
    }

    pub fn is_register(&self) -> bool {
        self.mode == AuthMode::Register
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Confirmation from the last successful action
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Welcome Back",
            AuthMode::Register => "Create an Account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.mode) {
            (true, _) => "Please wait...",
            (false, AuthMode::Login) => "Login",
            (false, AuthMode::Register) => "Sign Up",
        }
    }

    /// Check required fields and build the request
    pub fn validate(&self) -> Result<AuthRequest, FormError> {
        let username = required("Username", &self.username)?;
        if self.password.is_empty() {
            return Err(FormError::MissingField("Password"));
        }
        let password = self.password.clone();

        Ok(match self.mode {
            AuthMode::Register => AuthRequest::Register(RegisterRequest {
                username,
                email: required("Email", &self.email)?,
                password,
            }),
            AuthMode::Login => AuthRequest::Login(LoginRequest { username, password }),
        })
    }

    /// Validate and mark the modal as submitting in one step. Returns `None`
    /// when a submission is already running or validation failed (the error
    /// is then shown inline).
    pub fn begin_submit(&mut self) -> Option<AuthRequest> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.notice = None;
        match self.validate() {
            Ok(request) => {
                self.submitting = true;
                Some(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Apply the registration response
    pub fn finish_register(&mut self, result: ApiResult<Option<String>>) -> AuthOutcome {
        self.submitting = false;
        match result {
            Ok(_) => {
                self.mode = AuthMode::Login;
                self.clear_fields();
                self.notice = Some(SIGNUP_SUCCESS.to_string());
                AuthOutcome::Registered
            }
            Err(e) => self.fail(e),
        }
    }

    /// Apply the login response, committing the session on success
    pub fn finish_login<S: KeyValueStorage>(
        &mut self,
        result: ApiResult<LoginResponse>,
        store: &SessionStore<S>,
    ) -> AuthOutcome {
        self.submitting = false;
        let response = match result {
            Ok(response) => response,
            Err(e) => return self.fail(e),
        };
        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            return self.fail(ApiError::Malformed(
                "login response did not include a token".to_string(),
            ));
        };

        let user = response
            .user
            .or_else(|| user_from_token(&token))
            .unwrap_or_else(|| User::new(self.username.trim()));
        let session = Session::new(token, user);

        if let Err(e) = store.set(&session) {
            self.error = Some(e.to_string());
            return AuthOutcome::Failed(e.to_string());
        }

        self.clear_fields();
        self.notice = Some(LOGIN_SUCCESS.to_string());
        self.open = false;
        AuthOutcome::LoggedIn(session)
    }

    fn fail(&mut self, error: ApiError) -> AuthOutcome {
        let message = error.to_string();
        tracing::warn!(mode = ?self.mode, error = %message, "Authentication failed");
        self.error = Some(message.clone());
        AuthOutcome::Failed(message)
    }

    fn clear_fields(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
    }

    /// Run the whole submission against the service
    pub async fn submit<T, S>(
        &mut self,
        client: &CareerClient<T>,
        store: &SessionStore<S>,
    ) -> Option<AuthOutcome>
    where
        T: HttpTransport,
        S: KeyValueStorage,
    {
        let outcome = match self.begin_submit()? {
            AuthRequest::Register(request) => {
                let result = client.register(&request).await;
                self.finish_register(result)
            }
            AuthRequest::Login(request) => {
                let result = client.login(&request).await;
                self.finish_login(result, store)
            }
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Endpoint;
    use crate::session::MemoryStorage;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    fn setup() -> (MockTransport, CareerClient<MockTransport>, SessionStore<MemoryStorage>) {
        let mock = MockTransport::new();
        let client = CareerClient::new(mock.clone(), "http://service.test");
        (mock, client, SessionStore::new(MemoryStorage::new()))
    }

    fn filled(mode: AuthMode) -> AuthModal {
        let mut modal = AuthModal::new();
        modal.open_in(mode);
        modal.username = "asha".into();
        modal.email = "asha@example.com".into();
        modal.password = "secret".into();
        modal
    }

    #[tokio::test]
    async fn test_registration_switches_to_login_and_clears_form() {
        let (mock, client, store) = setup();
        mock.respond(Endpoint::Register, 201, r#"{"message": "created"}"#);

        let mut modal = filled(AuthMode::Register);
        let outcome = modal.submit(&client, &store).await;

        assert_eq!(outcome, Some(AuthOutcome::Registered));
        assert_eq!(modal.mode, AuthMode::Login);
        assert!(modal.open);
        assert!(modal.username.is_empty() && modal.email.is_empty() && modal.password.is_empty());
        assert_eq!(modal.notice(), Some(SIGNUP_SUCCESS));
        assert!(store.get().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_session_and_closes() {
        let (mock, client, store) = setup();
        mock.respond(
            Endpoint::Login,
            200,
            r#"{"token": "tok", "user": {"username": "asha", "email": "asha@example.com"}}"#,
        );

        let mut modal = filled(AuthMode::Login);
        let outcome = modal.submit(&client, &store).await.unwrap();

        let session = store.get().unwrap();
        assert_eq!(outcome, AuthOutcome::LoggedIn(session.clone()));
        assert_eq!(session.token, "tok");
        assert_eq!(session.user.email, "asha@example.com");
        assert!(!modal.open);

        let body = mock.requests_to(Endpoint::Login)[0].body.clone().unwrap();
        assert!(!body.contains("email"));
    }

    #[tokio::test]
    async fn test_login_without_user_decodes_token() {
        let (mock, client, store) = setup();
        let token = format!(
            "h.{}.s",
            URL_SAFE_NO_PAD.encode(r#"{"username":"from-token","email":"t@x.io"}"#)
        );
        mock.respond(Endpoint::Login, 200, &format!(r#"{{"token": "{}"}}"#, token));

        let mut modal = filled(AuthMode::Login);
        modal.submit(&client, &store).await;

        assert_eq!(store.get().unwrap().user.display_name(), "from-token");
    }

    #[tokio::test]
    async fn test_login_with_opaque_token_uses_typed_username() {
        let (mock, client, store) = setup();
        mock.respond(Endpoint::Login, 200, r#"{"token": "opaque"}"#);

        let mut modal = filled(AuthMode::Login);
        modal.submit(&client, &store).await;

        assert_eq!(store.get().unwrap().user.username, "asha");
    }

    #[tokio::test]
    async fn test_login_failure_shows_server_message() {
        let (mock, client, store) = setup();
        mock.respond(Endpoint::Login, 401, r#"{"message": "Invalid credentials"}"#);

        let mut modal = filled(AuthMode::Login);
        let outcome = modal.submit(&client, &store).await;

        assert_eq!(
            outcome,
            Some(AuthOutcome::Failed("Invalid credentials".to_string()))
        );
        assert_eq!(modal.error(), Some("Invalid credentials"));
        assert!(modal.open);
        assert!(!modal.is_submitting());
        assert_eq!(modal.username, "asha");
    }

    #[tokio::test]
    async fn test_token_missing_is_failure() {
        let (mock, client, store) = setup();
        mock.respond(Endpoint::Login, 200, r#"{"message": "ok"}"#);

        let mut modal = filled(AuthMode::Login);
        let outcome = modal.submit(&client, &store).await;

        assert!(matches!(outcome, Some(AuthOutcome::Failed(_))));
        assert!(store.get().is_none());
    }

    #[test]
    fn test_required_fields() {
        let mut modal = filled(AuthMode::Register);
        modal.email = " ".into();
        assert_eq!(modal.begin_submit(), None);
        assert_eq!(modal.error(), Some("Email is required"));

        // email is not needed to log in
        modal.mode = AuthMode::Login;
        assert!(modal.begin_submit().is_some());
    }

    #[test]
    fn test_begin_submit_is_exclusive() {
        let mut modal = filled(AuthMode::Login);
        assert!(modal.begin_submit().is_some());
        assert_eq!(modal.begin_submit(), None);
        assert_eq!(modal.submit_label(), "Please wait...");
    }

    #[test]
    fn test_toggle_and_titles() {
        let mut modal = AuthModal::new();
        modal.open_register();
        assert_eq!(modal.title(), "Create an Account");
        modal.toggle_mode();
        assert_eq!(modal.title(), "Welcome Back");
        assert_eq!(modal.submit_label(), "Login");
    }
}
