//! Wire types for the session endpoints.

use super::User;
use serde::{Deserialize, Serialize};

/// `POST /user/signin` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// `POST /user/signup` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Sign-in / sign-up response: the user, plus an optional session token
/// kept as a bearer fallback for non-browser clients.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
}

/// `GET /user/currentUser` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_with_token() {
        let resp: AuthResponse = serde_json::from_str(
            r#"{"_id":"u1","username":"alice","email":"a@example.com","token":"jwt"}"#,
        )
        .unwrap();
        assert_eq!(resp.user.username, "alice");
        assert_eq!(resp.token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_auth_response_without_token() {
        let resp: AuthResponse =
            serde_json::from_str(r#"{"id":"u1","username":"alice","email":"a@example.com"}"#)
                .unwrap();
        assert_eq!(resp.user.id.as_str(), "u1");
        assert!(resp.token.is_none());
    }
}
