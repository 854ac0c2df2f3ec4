//! Bearer token payload decoding
//!
//! Decodes the claims segment of a JWT without verifying its signature. The
//! result is only ever used to label the UI when the login response omits
//! the user object. It must not be used for authorization decisions.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::Value;

use crate::models::User;

/// Decode the (unverified) claims of a JWT
pub fn decode_claims(token: &str) -> Option<Value> {
    let mut parts = token.split('.');
    let _header = parts.next()?;
    let payload = parts.next()?;
    parts.next()?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.is_object().then_some(claims)
}

/// Build a display profile from the token claims
pub fn user_from_token(token: &str) -> Option<User> {
    let claims = decode_claims(token)?;
    let text = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| claims.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };

    let username = text(&["username", "name", "sub"])?;
    Some(User {
        username,
        email: text(&["email"]).unwrap_or_default(),
        avatar: text(&["avatar", "picture"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn test_user_from_token() {
        let token = token_with(r#"{"username":"asha","email":"asha@example.com","iat":1}"#);
        let user = user_from_token(&token).unwrap();
        assert_eq!(user.username, "asha");
        assert_eq!(user.email, "asha@example.com");
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_falls_back_to_sub_claim() {
        let token = token_with(r#"{"sub":"user-42"}"#);
        assert_eq!(user_from_token(&token).unwrap().username, "user-42");
    }

    #[test]
    fn test_padded_payload() {
        let token = format!("h.{}=.s", URL_SAFE_NO_PAD.encode(r#"{"name":"ravi"}"#));
        assert_eq!(user_from_token(&token).unwrap().username, "ravi");
    }

    #[test]
    fn test_garbage_tokens() {
        assert!(decode_claims("not-a-jwt").is_none());
        assert!(decode_claims("a.b").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
        assert!(user_from_token(&token_with(r#"{"iat":1}"#)).is_none());
        assert!(decode_claims(&token_with("[1,2]")).is_none());
    }
}
