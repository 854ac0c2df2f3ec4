//! Remote service endpoints

use std::fmt;

/// HTTP methods used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every endpoint the client calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Register,
    Login,
    Roadmap,
    GenerateRoadmap,
    Career,
    Counsel,
    Quizzes,
    GenerateQuiz,
    SubmitQuiz,
}

impl Endpoint {
    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Register,
            Endpoint::Login,
            Endpoint::Roadmap,
            Endpoint::GenerateRoadmap,
            Endpoint::Career,
            Endpoint::Counsel,
            Endpoint::Quizzes,
            Endpoint::GenerateQuiz,
            Endpoint::SubmitQuiz,
        ]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Register => "/users/create",
            Endpoint::Login => "/users/login",
            Endpoint::Roadmap => "/roadmap",
            Endpoint::GenerateRoadmap => "/roadmap/generate",
            Endpoint::Career => "/career",
            Endpoint::Counsel => "/career/counsel",
            Endpoint::Quizzes => "/quiz",
            Endpoint::GenerateQuiz => "/quiz/generate",
            Endpoint::SubmitQuiz => "/quiz/submit",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Roadmap | Endpoint::Career | Endpoint::Quizzes => Method::Get,
            _ => Method::Post,
        }
    }

    /// Whether the service expects a bearer token
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::Register | Endpoint::Login)
    }

    /// Absolute URL for this endpoint under `base`
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
