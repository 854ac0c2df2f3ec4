//! User profile as returned by the login endpoint

use serde::{Deserialize, Serialize};

/// Placeholder shown when the profile carries no avatar
pub const AVATAR_PLACEHOLDER: &str = "/icons/profile-placeholder.png";

/// Authenticated user's profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Create a user with just a username
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Builder method: set email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Builder method: set avatar URL
    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Name shown in the navigation bar
    pub fn display_name(&self) -> &str {
        if self.username.trim().is_empty() {
            if self.email.is_empty() {
                "Guest"
            } else {
                &self.email
            }
        } else {
            &self.username
        }
    }

    /// Avatar URL, falling back to the placeholder image
    pub fn avatar_url(&self) -> &str {
        self.avatar
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(AVATAR_PLACEHOLDER)
    }
}
