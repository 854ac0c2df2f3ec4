//! # Birjuram
//!
//! Client for the Birjuram career-guidance service: authentication,
//! AI-generated learning roadmaps, weekly quizzes and career counselling.
//! The service does all generation and scoring; this crate holds the
//! session, talks HTTP+JSON to it and drives the page state.
//!
//! ## Modules
//!
//! - [`models`]: Roadmap, quiz, counselling report and user types
//! - [`session`]: Token + profile persistence over a key/value backend
//! - [`api`]: Typed client over a pluggable HTTP transport
//! - [`resource`]: Fetch-on-mount / submit-to-create lifecycle shared by every page
//! - [`views`]: Page and modal state used by the web UI and the CLI
//! - `config`: TOML + environment configuration (native builds)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use birjuram::api::{CareerClient, ReqwestTransport};
//! use birjuram::session::{FileStorage, SessionStore};
//! use birjuram::views::RoadmapPage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = birjuram::Config::load_default();
//!     let store = SessionStore::new(FileStorage::new(&config.session.dir));
//!
//!     let client = CareerClient::new(ReqwestTransport::new(), &config.api.base_url)
//!         .with_token(store.token());
//!
//!     let mut page = RoadmapPage::new();
//!     page.load(&client).await;
//!     match page.roadmap() {
//!         Some(roadmap) => println!("{}", roadmap.introduction()),
//!         None => println!("No roadmap yet"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
#[cfg(feature = "native")]
pub mod config;
pub mod models;
pub mod resource;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, CareerClient, HttpTransport};

pub use models::{CounsellingReport, Question, Quiz, QuizResult, Roadmap, User};

pub use resource::{Phase, RemoteResource, ResourceError, Settled, Ticket};

pub use session::{KeyValueStorage, MemoryStorage, Session, SessionError, SessionStore};

pub use views::{FormError, ViewError};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
