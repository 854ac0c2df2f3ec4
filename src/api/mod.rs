//! Career service API
//!
//! HTTP+JSON client for the remote career-guidance service.
//!
//! # Endpoints
//!
//! ## Users
//! - `POST /users/create` - Register
//! - `POST /users/login` - Obtain a bearer token
//!
//! ## Roadmap
//! - `GET /roadmap` - Existing roadmap
//! - `POST /roadmap/generate` - Generate a roadmap
//!
//! ## Counselling
//! - `GET /career` - Existing counselling report
//! - `POST /career/counsel` - Generate a report
//!
//! ## Quiz
//! - `GET /quiz` - Quizzes so far
//! - `POST /quiz/generate` - Generate a week's quiz
//! - `POST /quiz/submit` - Submit answers for scoring
//!
//! # Example
//!
//! ```rust,no_run
//! use birjuram::api::{CareerClient, ReqwestTransport, DEFAULT_API_BASE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CareerClient::new(ReqwestTransport::new(), DEFAULT_API_BASE)
//!         .with_token(Some("<token>".to_string()));
//!
//!     if let Some(roadmap) = client.fetch_roadmap().await? {
//!         println!("{}", roadmap.introduction());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dto;
pub mod endpoint;
pub mod error;
#[cfg(feature = "native")]
pub mod http;
#[cfg(test)]
pub(crate) mod mock;
pub mod transport;

pub use client::{CareerClient, DEFAULT_API_BASE};
pub use dto::{
    CounselRequest, LoginRequest, LoginResponse, QuizSubmission, RegisterRequest, RoadmapRequest,
};
pub use endpoint::{Endpoint, Method};
pub use error::{ApiError, ApiResult, GENERIC_FAILURE};
#[cfg(feature = "native")]
pub use http::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, HttpTransport};
