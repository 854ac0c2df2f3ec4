//! UI Components
//!
//! Navigation, modals and feedback shared by the pages.

pub mod auth_modal;
pub mod history_modal;
pub mod loading;
pub mod nav;
pub mod profile_dropdown;
pub mod toast;

pub use auth_modal::AuthModalView;
pub use history_modal::HistoryModalView;
pub use loading::{Loading, SignInPrompt};
pub use nav::Nav;
pub use profile_dropdown::ProfileMenu;
pub use toast::Toast;
