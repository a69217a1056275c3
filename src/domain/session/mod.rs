//! Session domain — user profile, auth actions and the session state machine.
//!
//! ## State machine
//!
//! ```text
//!   Idle | Error ──AuthRequest──▶ Loading
//!   Loading ──AuthSuccess(user)──▶ Authenticated
//!   Loading ──AuthFailure(msg)───▶ Error
//!   Authenticated ──AuthLogout───▶ Idle
//! ```
//!
//! Any other pair is rejected and leaves the state untouched. `reset()` is
//! the forced path used by the global 401 handler.

#[cfg(feature = "http")]
pub mod client;
pub mod state;
pub mod wire;

use crate::error::AuthError;
use crate::shared::UserId;
use async_lock::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use state::{SessionPhase, SessionState};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Reducer actions.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    AuthRequest,
    AuthSuccess(User),
    AuthFailure(String),
    AuthLogout,
}

impl SessionAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthRequest => "AUTH_REQUEST",
            Self::AuthSuccess(_) => "AUTH_SUCCESS",
            Self::AuthFailure(_) => "AUTH_FAILURE",
            Self::AuthLogout => "AUTH_LOGOUT",
        }
    }
}

/// Shared handle to the session state. Clones observe the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action through the state machine.
    pub async fn dispatch(&self, action: SessionAction) -> Result<(), AuthError> {
        let mut state = self.inner.write().await;
        let from = state.phase().name();
        let name = action.name();
        state.apply(action)?;
        tracing::debug!(from, action = name, to = state.phase().name(), "Session transition");
        Ok(())
    }

    /// Drop any authenticated user. Used on 401 and forced logout.
    pub async fn reset(&self) {
        self.inner.write().await.reset();
    }

    /// Replace the signed-in user's profile after an update.
    pub async fn update_user(&self, user: User) -> Result<(), AuthError> {
        self.inner.write().await.update_user(user)
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated()
    }
}
