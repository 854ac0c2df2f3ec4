//! Navigation bar identity: login buttons or the profile dropdown

use crate::models::User;
use crate::session::Session;

/// What the right side of the navigation bar shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    /// "Login" and "Sign Up" buttons
    Guest,
    SignedIn {
        display_name: String,
        email: String,
        avatar: String,
    },
}

impl NavState {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(session) => Self::from_user(&session.user),
            None => NavState::Guest,
        }
    }

    fn from_user(user: &User) -> Self {
        NavState::SignedIn {
            display_name: user.display_name().to_string(),
            email: user.email.clone(),
            avatar: user.avatar_url().to_string(),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, NavState::SignedIn { .. })
    }
}

/// Avatar button with a panel holding the email and Logout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileDropdown {
    pub open: bool,
}

impl ProfileDropdown {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::AVATAR_PLACEHOLDER;

    #[test]
    fn test_nav_state() {
        assert_eq!(NavState::from_session(None), NavState::Guest);

        let session = Session::new("tok", User::new("asha").email("asha@example.com"));
        let nav = NavState::from_session(Some(&session));
        assert_eq!(
            nav,
            NavState::SignedIn {
                display_name: "asha".into(),
                email: "asha@example.com".into(),
                avatar: AVATAR_PLACEHOLDER.into(),
            }
        );
        assert!(nav.is_signed_in());
    }

    #[test]
    fn test_dropdown_toggle() {
        let mut dropdown = ProfileDropdown::default();
        dropdown.toggle();
        assert!(dropdown.open);
        dropdown.toggle();
        assert!(!dropdown.open);
        dropdown.toggle();
        dropdown.close();
        assert!(!dropdown.open);
    }
}
