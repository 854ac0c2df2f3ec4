//! Pages
//!
//! Top-level page components for each route.

pub mod counsellor;
pub mod home;
pub mod quiz;
pub mod roadmap;

pub use counsellor::Counsellor;
pub use home::Home;
pub use quiz::QuizView;
pub use roadmap::RoadmapView;

use birjuram::Settled;

/// Send a failed operation to the browser console. `settled` is `None` when
/// the page was already gone.
pub(crate) fn log_failure(action: &str, settled: Option<&Settled>) {
    if let Some(Settled::Failed(message)) = settled {
        web_sys::console::error_1(&format!("Failed to {}: {}", action, message).into());
    }
}
