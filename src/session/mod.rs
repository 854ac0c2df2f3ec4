//! Session handling
//!
//! The session is the authenticated user's token plus profile. It lives in a
//! key/value storage backend under two fixed keys and is read and written
//! only through [`SessionStore`].

pub mod storage;
pub mod store;
pub mod token;

pub use storage::{KeyValueStorage, MemoryStorage};
#[cfg(feature = "native")]
pub use storage::FileStorage;
pub use store::{SessionStore, TOKEN_KEY, USER_KEY};
pub use token::{decode_claims, user_from_token};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;

/// Authenticated user's token and profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// Errors from reading or writing the persisted session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Backend refused or failed the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O failure in a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored user profile is not valid JSON
    #[error("Stored user profile is unreadable: {0}")]
    CorruptUser(String),

    /// Key contains characters the backend cannot store
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::CorruptUser("expected value".to_string());
        assert_eq!(
            err.to_string(),
            "Stored user profile is unreadable: expected value"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SessionError = io_err.into();
        assert!(matches!(err, SessionError::Io(_)));
    }
}
