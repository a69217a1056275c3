//! Session state machine — pure reducer over `SessionPhase`.

use super::{SessionAction, User};
use crate::error::AuthError;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Authenticated(User),
    Error(String),
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Authenticated(_) => "authenticated",
            Self::Error(_) => "error",
        }
    }
}

/// `{user, loading, error}` record view over the current phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    phase: SessionPhase,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, SessionPhase::Authenticated(_))
    }

    /// Apply one action. Invalid pairs return an error and change nothing.
    pub fn apply(&mut self, action: SessionAction) -> Result<(), AuthError> {
        let next = match (&self.phase, action) {
            (SessionPhase::Idle | SessionPhase::Error(_), SessionAction::AuthRequest) => {
                SessionPhase::Loading
            }
            (SessionPhase::Loading, SessionAction::AuthSuccess(user)) => {
                SessionPhase::Authenticated(user)
            }
            (SessionPhase::Loading, SessionAction::AuthFailure(message)) => {
                SessionPhase::Error(message)
            }
            (SessionPhase::Authenticated(_), SessionAction::AuthLogout) => SessionPhase::Idle,
            (phase, action) => {
                return Err(AuthError::InvalidTransition {
                    from: phase.name(),
                    action: action.name(),
                })
            }
        };
        self.set_phase(next);
        Ok(())
    }

    /// Forced return to `Idle` from `Loading` or `Authenticated`.
    ///
    /// An `Error` phase holds no user and keeps its message for display.
    pub fn reset(&mut self) {
        if !matches!(self.phase, SessionPhase::Error(_)) {
            self.set_phase(SessionPhase::Idle);
        }
    }

    /// Swap the profile of the authenticated user.
    pub fn update_user(&mut self, user: User) -> Result<(), AuthError> {
        match self.phase {
            SessionPhase::Authenticated(_) => {
                self.set_phase(SessionPhase::Authenticated(user));
                Ok(())
            }
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        self.user = match &phase {
            SessionPhase::Authenticated(user) => Some(user.clone()),
            _ => None,
        };
        self.loading = matches!(phase, SessionPhase::Loading);
        self.error = match &phase {
            SessionPhase::Error(message) => Some(message.clone()),
            _ => None,
        };
        self.phase = phase;
    }
}
