//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("WebSocket error: {0}")]
    Ws(#[from] WsError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The operation's `CancelToken` fired before it completed.
    #[error("Operation cancelled")]
    Cancelled,
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// WebSocket errors.
#[derive(Error, Debug)]
pub enum WsError {
    #[error("Not connected")]
    NotConnected,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid session transition: {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

// ─── Error surfaces ──────────────────────────────────────────────────────────

/// Generic message for failures where no response was received.
pub const CONNECTIVITY_MESSAGE: &str = "Unable to reach the server. Check your connection.";

/// Generic fallback for server errors that carry no message.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Where an error should be surfaced in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSurface {
    /// No response received. Shown as a generic connectivity error.
    Connectivity,
    /// 401: the session is cleared and the user sent to the login route.
    SessionExpired,
    /// 400: handed back verbatim to the invoking form.
    Validation(String),
    /// 403 / 404 / 5xx and everything else: toast-style notification.
    Notify(String),
    /// Cancelled operations surface nowhere.
    Silent,
}

impl SdkError {
    /// Classify this error into the UI surface it belongs to.
    pub fn surface(&self) -> ErrorSurface {
        match self {
            SdkError::Http(http) => http.surface(),
            SdkError::Ws(_) => ErrorSurface::Connectivity,
            SdkError::Auth(AuthError::NotAuthenticated) => ErrorSurface::SessionExpired,
            SdkError::Auth(e @ AuthError::InvalidTransition { .. }) => {
                ErrorSurface::Notify(e.to_string())
            }
            SdkError::Validation(msg) => ErrorSurface::Validation(msg.clone()),
            SdkError::Cancelled => ErrorSurface::Silent,
            SdkError::Serde(_) => ErrorSurface::Notify(GENERIC_MESSAGE.to_string()),
        }
    }

    /// The message a form or toast should display for this error.
    pub fn user_message(&self) -> String {
        match self.surface() {
            ErrorSurface::Connectivity => CONNECTIVITY_MESSAGE.to_string(),
            ErrorSurface::SessionExpired => "Your session has expired. Please sign in again.".into(),
            ErrorSurface::Validation(msg) | ErrorSurface::Notify(msg) => msg,
            ErrorSurface::Silent => String::new(),
        }
    }
}

impl HttpError {
    pub fn surface(&self) -> ErrorSurface {
        match self {
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) if e.is_decode() => ErrorSurface::Notify(GENERIC_MESSAGE.into()),
            #[cfg(feature = "http")]
            HttpError::Reqwest(_) => ErrorSurface::Connectivity,
            HttpError::Timeout | HttpError::MaxRetriesExceeded { .. } => {
                ErrorSurface::Connectivity
            }
            HttpError::Unauthorized => ErrorSurface::SessionExpired,
            HttpError::BadRequest(body) => ErrorSurface::Validation(server_message(body)),
            HttpError::Forbidden(body) | HttpError::NotFound(body) => {
                ErrorSurface::Notify(server_message(body))
            }
            HttpError::ServerError { body, .. } => ErrorSurface::Notify(server_message(body)),
            HttpError::RateLimited { .. } | HttpError::InvalidBody(_) => {
                ErrorSurface::Notify(GENERIC_MESSAGE.into())
            }
        }
    }
}

/// Extract `message` from a JSON error body, falling back to the raw text
/// or the generic message.
pub fn server_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => m,
        Ok(_) => GENERIC_MESSAGE.to_string(),
        Err(_) if !body.trim().is_empty() && body.len() <= 200 => body.trim().to_string(),
        Err(_) => GENERIC_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_json_message() {
        assert_eq!(server_message(r#"{"message":"Username taken"}"#), "Username taken");
    }

    #[test]
    fn test_server_message_falls_back() {
        assert_eq!(server_message(r#"{"error":true}"#), GENERIC_MESSAGE);
        assert_eq!(server_message(""), GENERIC_MESSAGE);
        assert_eq!(server_message("plain text"), "plain text");
    }

    #[test]
    fn test_unauthorized_is_session_expired() {
        let err = SdkError::Http(HttpError::Unauthorized);
        assert_eq!(err.surface(), ErrorSurface::SessionExpired);
    }

    #[test]
    fn test_bad_request_is_validation_verbatim() {
        let err = SdkError::Http(HttpError::BadRequest(
            r#"{"message":"Email is invalid"}"#.into(),
        ));
        assert_eq!(
            err.surface(),
            ErrorSurface::Validation("Email is invalid".into())
        );
        assert_eq!(err.user_message(), "Email is invalid");
    }

    #[test]
    fn test_server_errors_notify() {
        let err = SdkError::Http(HttpError::ServerError {
            status: 500,
            body: String::new(),
        });
        assert_eq!(err.surface(), ErrorSurface::Notify(GENERIC_MESSAGE.into()));

        let err = SdkError::Http(HttpError::NotFound(r#"{"message":"No such coin"}"#.into()));
        assert_eq!(err.surface(), ErrorSurface::Notify("No such coin".into()));
    }

    #[test]
    fn test_timeout_is_connectivity() {
        let err = SdkError::Http(HttpError::Timeout);
        assert_eq!(err.surface(), ErrorSurface::Connectivity);
        assert_eq!(err.user_message(), CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn test_invalid_body_notifies_generic() {
        let err = SdkError::Http(HttpError::InvalidBody("expected value".into()));
        assert_eq!(err.surface(), ErrorSurface::Notify(GENERIC_MESSAGE.into()));
    }

    #[test]
    fn test_non_http_surfaces() {
        let serde_err = serde_json::from_str::<u32>("x").unwrap_err();
        assert_eq!(
            SdkError::from(serde_err).surface(),
            ErrorSurface::Notify(GENERIC_MESSAGE.into())
        );
        assert_eq!(
            SdkError::from(WsError::NotConnected).surface(),
            ErrorSurface::Connectivity
        );
        assert_eq!(
            SdkError::from(AuthError::NotAuthenticated).surface(),
            ErrorSurface::SessionExpired
        );
        let invalid = SdkError::from(AuthError::InvalidTransition {
            from: "authenticated",
            action: "AUTH_REQUEST",
        });
        assert_eq!(
            invalid.user_message(),
            "Invalid session transition: AUTH_REQUEST while authenticated"
        );
    }

    #[test]
    fn test_cancelled_is_silent() {
        assert_eq!(SdkError::Cancelled.surface(), ErrorSurface::Silent);
    }
}
