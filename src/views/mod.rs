//! Page and modal view models
//!
//! Framework-independent state for every screen. The web UI keeps these in
//! reactive signals and the CLI drives them directly; both go through the
//! same transitions, so the behaviour is tested once here.

pub mod auth;
pub mod counsellor;
pub mod history;
pub mod home;
pub mod profile;
pub mod quiz;
pub mod roadmap;

pub use auth::{AuthModal, AuthMode, AuthOutcome, AuthRequest, LOGIN_SUCCESS, SIGNUP_SUCCESS};
pub use counsellor::{CounselForm, CounsellorPage};
pub use history::{HistoryEntry, HistoryKind, HistoryModal, EMPTY_HISTORY};
pub use home::{FeatureCard, HomeView, PresenceCheck, PresenceOutcome};
pub use profile::{NavState, ProfileDropdown};
pub use quiz::{
    default_quiz_start, week_number, QuizAttempt, QuizBook, QuizPage, WeekEntry, DEFAULT_QUIZ_START,
};
pub use roadmap::{RoadmapForm, RoadmapPage};

use thiserror::Error;

use crate::resource::ResourceError;

/// Client-side form validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Why a page refused to start an operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Trimmed value of a required text field
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
