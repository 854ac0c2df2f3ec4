//! Global Application State
//!
//! Reactive session context shared by every page. Components read and change
//! the session only through [`AppState`]; nothing else touches storage.

use birjuram::session::{Session, SessionStore};
use birjuram::views::AuthModal;
use birjuram::CareerClient;
use leptos::*;

use super::BrowserStorage;
use crate::api::{get_api_base, GlooTransport};

/// Session store over `localStorage`
pub fn session_store() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

/// Kind of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// Milliseconds before the notice clears itself
    fn lifetime(self) -> u32 {
        match self {
            NoticeKind::Success => 3000,
            NoticeKind::Error => 5000,
        }
    }
}

/// One toast. `id` tells a newer notice apart from the one a timer was
/// started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct AppState {
    /// Logged-in user, mirrored from storage
    pub session: RwSignal<Option<Session>>,
    /// Login / sign-up modal
    pub auth: RwSignal<AuthModal>,
    /// Toast currently shown
    pub notice: RwSignal<Option<Notice>>,
    notice_seq: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_app_state() {
    let state = AppState {
        session: create_rw_signal(session_store().get()),
        auth: create_rw_signal(AuthModal::new()),
        notice: create_rw_signal(None),
        notice_seq: store_value(0),
    };

    provide_context(state);
}

/// The state provided by [`provide_app_state`]
pub fn use_app_state() -> AppState {
    use_context::<AppState>().expect("AppState not found")
}

impl AppState {
    pub fn is_signed_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// API client carrying the current token
    pub fn client(&self) -> CareerClient<GlooTransport> {
        let token = self.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        CareerClient::new(GlooTransport, get_api_base()).with_token(token)
    }

    /// Adopt a session the auth modal already persisted
    pub fn signed_in(&self, session: Session) {
        self.session.set(Some(session));
    }

    /// Clear storage and return to the signed-out view
    pub fn logout(&self) {
        if let Err(e) = session_store().clear() {
            web_sys::console::error_1(&format!("Failed to clear session: {}", e).into());
            self.show_error("Could not clear the saved session");
        }
        self.session.set(None);
    }

    pub fn open_login(&self) {
        self.auth.update(AuthModal::open_login);
    }

    pub fn open_register(&self) {
        self.auth.update(AuthModal::open_register);
    }

    pub fn show_success(&self, message: &str) {
        self.notify(NoticeKind::Success, message);
    }

    pub fn show_error(&self, message: &str) {
        self.notify(NoticeKind::Error, message);
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    /// Replace the current toast; it clears itself unless replaced first
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notice_seq.update_value(|seq| *seq += 1);
        let id = self.notice_seq.get_value();
        self.notice.set(Some(Notice {
            id,
            kind,
            message: message.to_string(),
        }));

        let notice = self.notice;
        gloo_timers::callback::Timeout::new(kind.lifetime(), move || {
            if notice.with_untracked(|n| n.as_ref().map(|n| n.id)) == Some(id) {
                notice.set(None);
            }
        })
        .forget();
    }
}
