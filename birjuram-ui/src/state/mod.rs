//! State Management
//!
//! App-wide session context and browser-backed persistence.

pub mod app;
pub mod storage;

pub use app::{provide_app_state, session_store, use_app_state, AppState, Notice, NoticeKind};
pub use storage::BrowserStorage;
