//! Landing page

use crate::api::{ApiResult, CareerClient, HttpTransport};
use crate::models::{CounsellingReport, Roadmap};
use crate::session::{KeyValueStorage, Session, SessionResult, SessionStore};

use super::NavState;

/// One feature card and where its button leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub route: &'static str,
    pub action: &'static str,
}

/// A presence lookup in flight, tied to the session it started under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceCheck {
    generation: u64,
    token: String,
}

/// How a presence lookup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceOutcome {
    Applied,
    /// The session changed while the lookup was in flight
    Discarded,
    /// The service rejected the token; the caller should log out
    SessionExpired,
}

#[derive(Debug, Clone, Default)]
pub struct HomeView {
    session: Option<Session>,
    pub has_roadmap: bool,
    pub has_counselling: bool,
    generation: u64,
}

impl HomeView {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn nav(&self) -> NavState {
        NavState::from_session(self.session.as_ref())
    }

    /// Switch to another session (or none). Lookups started under the old
    /// one are discarded when they finish.
    pub fn set_session(&mut self, session: Option<Session>) {
        let same_user =
            self.session.as_ref().map(|s| &s.token) == session.as_ref().map(|s| &s.token);
        self.session = session;
        if !same_user {
            self.generation += 1;
            self.reset_presence();
        }
    }

    pub fn feature_cards(&self) -> [FeatureCard; 3] {
        [
            FeatureCard {
                title: "Career Counsellor",
                description: "Get personalized advice on choosing and growing in your career.",
                icon: "/icons/counsellor.png",
                route: "/counsellor",
                action: if self.has_counselling {
                    "View Counselling"
                } else {
                    "Get Started"
                },
            },
            FeatureCard {
                title: "Generate Roadmap",
                description: "AI-generated step-by-step roadmap tailored to your goals.",
                icon: "/icons/roadmap.png",
                route: "/roadmap",
                action: if self.has_roadmap {
                    "View Roadmap"
                } else {
                    "Get Started"
                },
            },
            FeatureCard {
                title: "Quiz",
                description: "Test your knowledge with weekly quizzes and track your improvement.",
                icon: "/icons/streak.png",
                route: "/quiz",
                action: "Get Started",
            },
        ]
    }

    /// Start a presence lookup; `None` for guests
    pub fn begin_presence(&self) -> Option<PresenceCheck> {
        self.session.as_ref().map(|s| PresenceCheck {
            generation: self.generation,
            token: s.token.clone(),
        })
    }

    /// Settle a lookup started by [`begin_presence`](Self::begin_presence)
    pub fn finish_presence(
        &mut self,
        check: PresenceCheck,
        roadmap: ApiResult<Option<Roadmap>>,
        counselling: ApiResult<Option<CounsellingReport>>,
    ) -> PresenceOutcome {
        let current = self.session.as_ref().map(|s| s.token.as_str());
        if check.generation != self.generation || current != Some(check.token.as_str()) {
            tracing::debug!("Discarding presence lookup for a previous session");
            return PresenceOutcome::Discarded;
        }

        let rejected = [roadmap.as_ref().err(), counselling.as_ref().err()]
            .into_iter()
            .flatten()
            .any(|e| e.is_unauthorized());
        if rejected {
            tracing::warn!("Service rejected the saved token");
            self.set_session(None);
            return PresenceOutcome::SessionExpired;
        }

        self.apply_presence(roadmap, counselling);
        PresenceOutcome::Applied
    }

    /// Record which resources exist. Failed lookups leave the flag unchanged.
    fn apply_presence(
        &mut self,
        roadmap: ApiResult<Option<Roadmap>>,
        counselling: ApiResult<Option<CounsellingReport>>,
    ) {
        match roadmap {
            Ok(r) => self.has_roadmap = r.is_some(),
            Err(e) => tracing::warn!(error = %e, "Could not check for a roadmap"),
        }
        match counselling {
            Ok(c) => self.has_counselling = c.is_some(),
            Err(e) => tracing::warn!(error = %e, "Could not check for a counselling report"),
        }
    }

    /// Re-check resource presence for the signed-in user
    pub async fn refresh<T: HttpTransport>(
        &mut self,
        client: &CareerClient<T>,
    ) -> Option<PresenceOutcome> {
        let check = self.begin_presence()?;
        let roadmap = client.fetch_roadmap().await;
        let counselling = client.fetch_counselling().await;
        Some(self.finish_presence(check, roadmap, counselling))
    }

    /// Pick up a session committed by the auth modal
    pub fn sync_session<S: KeyValueStorage>(&mut self, store: &SessionStore<S>) {
        self.set_session(store.get());
    }

    pub fn logout<S: KeyValueStorage>(&mut self, store: &SessionStore<S>) -> SessionResult<()> {
        store.clear()?;
        self.set_session(None);
        Ok(())
    }

    fn reset_presence(&mut self) {
        self.has_roadmap = false;
        self.has_counselling = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiError, Endpoint};
    use crate::models::User;
    use crate::session::MemoryStorage;

    fn roadmap() -> Roadmap {
        serde_json::from_str(r#"{"role": "Dev"}"#).unwrap()
    }

    fn signed_in() -> (SessionStore<MemoryStorage>, HomeView) {
        let store = SessionStore::new(MemoryStorage::new());
        let session = Session::new("tok", User::new("asha"));
        store.set(&session).unwrap();
        (store, HomeView::new(Some(session)))
    }

    #[tokio::test]
    async fn test_card_labels_follow_presence() {
        let mock = MockTransport::new();
        mock.respond(Endpoint::Roadmap, 200, r#"{"roadmap": {"role": "Dev"}}"#);
        mock.respond(Endpoint::Career, 404, r#"{"message": "not found"}"#);
        let client = CareerClient::new(mock.clone(), "http://service.test");

        let (_store, mut home) = signed_in();
        home.refresh(&client).await;

        let cards = home.feature_cards();
        assert_eq!(cards[0].action, "Get Started");
        assert_eq!(cards[1].action, "View Roadmap");
        assert_eq!(cards[2].action, "Get Started");
    }

    #[tokio::test]
    async fn test_guest_does_not_fetch() {
        let mock = MockTransport::new();
        let client = CareerClient::new(mock.clone(), "http://service.test");

        let mut home = HomeView::new(None);
        assert_eq!(home.refresh(&client).await, None);

        assert!(mock.requests().is_empty());
        assert_eq!(home.nav(), NavState::Guest);
    }

    #[test]
    fn test_failed_lookup_keeps_flag() {
        let (_store, mut home) = signed_in();
        home.has_counselling = true;
        let check = home.begin_presence().unwrap();
        let outcome =
            home.finish_presence(check, Ok(None), Err(ApiError::Network("offline".into())));
        assert_eq!(outcome, PresenceOutcome::Applied);
        assert!(!home.has_roadmap);
        assert!(home.has_counselling);
    }

    #[test]
    fn test_lookup_from_previous_session_is_discarded() {
        let (store, mut home) = signed_in();
        let check = home.begin_presence().unwrap();

        home.logout(&store).unwrap();
        let roadmap = Ok(Some(roadmap()));
        let outcome = home.finish_presence(check.clone(), roadmap.clone(), Ok(None));
        assert_eq!(outcome, PresenceOutcome::Discarded);
        assert!(!home.has_roadmap);

        // logging back in as the same user still starts a new generation
        home.set_session(Some(Session::new("tok", User::new("asha"))));
        assert_eq!(
            home.finish_presence(check, roadmap, Ok(None)),
            PresenceOutcome::Discarded
        );
        assert!(!home.has_roadmap);
    }

    #[test]
    fn test_same_session_keeps_lookup_valid() {
        let (_store, mut home) = signed_in();
        let check = home.begin_presence().unwrap();
        home.set_session(Some(Session::new("tok", User::new("asha"))));

        let outcome = home.finish_presence(check, Ok(Some(roadmap())), Ok(None));
        assert_eq!(outcome, PresenceOutcome::Applied);
        assert!(home.has_roadmap);
    }

    #[tokio::test]
    async fn test_rejected_token_expires_session() {
        let mock = MockTransport::new();
        mock.respond(Endpoint::Roadmap, 401, r#"{"message": "Invalid token"}"#);
        mock.respond(Endpoint::Career, 401, r#"{"message": "Invalid token"}"#);
        let client = CareerClient::new(mock, "http://service.test").with_token(Some("tok".into()));

        let (_store, mut home) = signed_in();
        home.has_roadmap = true;
        let outcome = home.refresh(&client).await;

        assert_eq!(outcome, Some(PresenceOutcome::SessionExpired));
        assert_eq!(home.nav(), NavState::Guest);
        assert!(!home.has_roadmap);
    }

    #[test]
    fn test_logout_reverts_to_guest() {
        let (store, mut home) = signed_in();
        home.has_roadmap = true;
        assert!(home.nav().is_signed_in());

        home.logout(&store).unwrap();

        assert_eq!(home.nav(), NavState::Guest);
        assert!(store.get().is_none());
        assert!(store.storage().is_empty());
        assert!(!home.has_roadmap);
    }

    #[test]
    fn test_sync_session_after_login() {
        let store = SessionStore::new(MemoryStorage::new());
        let mut home = HomeView::new(None);

        store.set(&Session::new("tok", User::new("ravi"))).unwrap();
        home.sync_session(&store);

        match home.nav() {
            NavState::SignedIn { display_name, .. } => assert_eq!(display_name, "ravi"),
            NavState::Guest => panic!("expected a signed-in nav"),
        }
    }
}
