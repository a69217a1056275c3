//! Auth sub-client — sign in, sign up, session hydration and logout.

use serde::Serialize;

use super::wire::{AuthResponse, CurrentUserResponse, SignInRequest, SignUpRequest};
use super::{SessionAction, User};
use crate::client::DashboardClient;
use crate::error::{ErrorSurface, SdkError, GENERIC_MESSAGE};
use crate::http::RetryPolicy;
use crate::shared::Route;

/// Message stored when a sign-in is abandoned mid-flight.
pub const CANCELLED_MESSAGE: &str = "Request cancelled";

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Auth<'a> {
    /// Sign in and move to the dashboard.
    ///
    /// The session goes `Loading` for the duration of the request and lands
    /// in `Authenticated` or `Error`. A 400 comes back as a validation error
    /// carrying the server's message.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, SdkError> {
        let request = SignInRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.authenticate("/user/signin", &request, "Login failed")
            .await
    }

    /// Create an account and sign in with it.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SdkError> {
        let request = SignUpRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.authenticate("/user/signup", &request, "Registration failed")
            .await
    }

    /// Hydrate the session from the server cookie (`GET /user/currentUser`).
    ///
    /// Only valid from `Idle` or `Error`. Any failure is recorded as
    /// "Token got expired".
    pub async fn current_user(&self) -> Result<User, SdkError> {
        let client = self.client;
        client.session.dispatch(SessionAction::AuthRequest).await?;

        let url = client.http.url("/user/currentUser");
        let result = client
            .cancel
            .run(
                client
                    .http
                    .get::<CurrentUserResponse>(&url, client.read_retry.clone()),
            )
            .await;

        match result {
            Ok(resp) => {
                client
                    .session
                    .dispatch(SessionAction::AuthSuccess(resp.user.clone()))
                    .await?;
                Ok(resp.user)
            }
            Err(err) => {
                let message = match err {
                    SdkError::Cancelled => CANCELLED_MESSAGE,
                    _ => "Token got expired",
                };
                client
                    .session
                    .dispatch(SessionAction::AuthFailure(message.to_string()))
                    .await?;
                client.observe(Err(err)).await
            }
        }
    }

    /// Sign out.
    ///
    /// The server call is best-effort. The local token and session are
    /// cleared and the login route shown whatever its outcome.
    pub async fn logout(&self) -> Result<(), SdkError> {
        let client = self.client;
        let url = client.http.url("/user/logout");
        let result = client
            .cancel
            .run(client.http.post::<serde_json::Value, _>(
                &url,
                &serde_json::json!({}),
                RetryPolicy::None,
            ))
            .await;

        if let Err(err) = &result {
            tracing::warn!(error = %err, "Server logout failed, clearing local session anyway");
        }

        client.http.clear_auth_token().await;
        if client.session.is_authenticated().await {
            client.session.dispatch(SessionAction::AuthLogout).await?;
        } else {
            client.session.reset().await;
        }
        client.navigator.navigate(Route::Login);
        Ok(())
    }

    pub async fn user(&self) -> Option<User> {
        self.client.session.user().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.session.is_authenticated().await
    }

    async fn authenticate<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<User, SdkError> {
        let client = self.client;
        client.session.dispatch(SessionAction::AuthRequest).await?;

        let url = client.http.url(path);
        let result = client
            .cancel
            .run(
                client
                    .http
                    .post::<AuthResponse, _>(&url, body, RetryPolicy::None),
            )
            .await;

        match result {
            Ok(resp) => {
                if resp.token.is_some() {
                    client.http.set_auth_token(resp.token).await;
                }
                client
                    .session
                    .dispatch(SessionAction::AuthSuccess(resp.user.clone()))
                    .await?;
                tracing::info!(user = %resp.user.username, "Signed in");
                client.navigator.navigate(Route::Dashboard);
                Ok(resp.user)
            }
            Err(SdkError::Cancelled) => {
                client
                    .session
                    .dispatch(SessionAction::AuthFailure(CANCELLED_MESSAGE.to_string()))
                    .await?;
                Err(SdkError::Cancelled)
            }
            Err(err) => {
                let message = failure_message(&err, fallback);
                client
                    .session
                    .dispatch(SessionAction::AuthFailure(message))
                    .await?;
                client.observe(Err(err)).await
            }
        }
    }
}

/// The server's `message` when it sent one, otherwise `fallback`.
fn failure_message(err: &SdkError, fallback: &str) -> String {
    match err {
        SdkError::Http(http) => match http.surface() {
            ErrorSurface::Validation(m) | ErrorSurface::Notify(m) if m != GENERIC_MESSAGE => m,
            _ => fallback.to_string(),
        },
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;

    #[test]
    fn test_failure_message_prefers_server_message() {
        let err = SdkError::Http(HttpError::BadRequest(r#"{"message":"Bad password"}"#.into()));
        assert_eq!(failure_message(&err, "Login failed"), "Bad password");
    }

    #[test]
    fn test_failure_message_fallback() {
        let err = SdkError::Http(HttpError::ServerError {
            status: 500,
            body: String::new(),
        });
        assert_eq!(failure_message(&err, "Login failed"), "Login failed");
        assert_eq!(
            failure_message(&SdkError::Http(HttpError::Timeout), "Registration failed"),
            "Registration failed"
        );
    }

    #[tokio::test]
    async fn test_cancelled_login_records_failure_without_request() {
        let client = DashboardClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let token = crate::shared::CancelToken::new();
        token.cancel();

        let err = client.scoped(&token).auth().login("a", "b").await.unwrap_err();
        assert!(matches!(err, SdkError::Cancelled));
        let state = client.session().snapshot().await;
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(CANCELLED_MESSAGE));
    }
}
