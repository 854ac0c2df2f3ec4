//! Persistent session store

use super::{KeyValueStorage, Session, SessionError, SessionResult};
use crate::models::User;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-encoded user profile
pub const USER_KEY: &str = "user";

/// Reads and writes the session through a storage backend
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the session. Absent unless both token and user are stored.
    pub fn load(&self) -> SessionResult<Option<Session>> {
        let token = match self.storage.get_item(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };
        let Some(raw_user) = self.storage.get_item(USER_KEY)? else {
            return Ok(None);
        };
        let user: User = serde_json::from_str(&raw_user)
            .map_err(|e| SessionError::CorruptUser(e.to_string()))?;

        Ok(Some(Session { token, user }))
    }

    /// Like [`load`](Self::load), treating unreadable state as absent
    pub fn get(&self) -> Option<Session> {
        match self.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring stored session: {}", e);
                None
            }
        }
    }

    /// Stored token, even when the profile is missing
    pub fn token(&self) -> Option<String> {
        self.storage
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    /// Persist token and user
    pub fn set(&self, session: &Session) -> SessionResult<()> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage.set_item(USER_KEY, &user)?;
        tracing::info!(user = %session.user.display_name(), "Session stored");
        Ok(())
    }

    /// Remove token and user
    pub fn clear(&self) -> SessionResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    #[test]
    fn test_set_get_clear() {
        let store = store();
        assert!(store.get().is_none());

        let session = Session::new("tok", User::new("asha").email("asha@example.com"));
        store.set(&session).unwrap();
        assert_eq!(store.get(), Some(session));

        store.clear().unwrap();
        assert!(store.get().is_none());
        assert!(store.token().is_none());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_token_without_user_is_not_a_session() {
        let store = store();
        store.storage().set_item(TOKEN_KEY, "tok").unwrap();

        assert!(store.get().is_none());
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_corrupt_user_reported_by_load() {
        let store = store();
        store.storage().set_item(TOKEN_KEY, "tok").unwrap();
        store.storage().set_item(USER_KEY, "{not json").unwrap();

        assert!(matches!(store.load(), Err(SessionError::CorruptUser(_))));
        assert!(store.get().is_none());
    }

    #[test]
    fn test_user_stored_as_json() {
        let store = store();
        store
            .set(&Session::new("tok", User::new("asha")))
            .unwrap();

        let raw = store.storage().get_item(USER_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["username"], "asha");
    }
}
