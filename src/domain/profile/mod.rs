//! Profile domain — the edit form over the signed-in user's profile.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::session::User;
use crate::error::SdkError;
use serde::{Deserialize, Serialize};

/// `PUT /user/profile` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
}

impl ProfileUpdate {
    /// Trim fields and reject blanks or an obviously malformed email.
    pub fn validated(&self) -> Result<Self, SdkError> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() {
            return Err(SdkError::Validation("Username is required".into()));
        }
        if email.is_empty() {
            return Err(SdkError::Validation("Email is required".into()));
        }
        if !looks_like_email(email) {
            return Err(SdkError::Validation("Email is invalid".into()));
        }
        Ok(Self {
            username: username.to_string(),
            email: email.to_string(),
        })
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Editable copy of the profile.
///
/// `begin` snapshots the user, edits touch only the draft, `cancel` restores
/// the snapshot.
#[derive(Debug, Clone, Default)]
pub struct ProfileEditor {
    original: Option<ProfileUpdate>,
    draft: Option<ProfileUpdate>,
}

impl ProfileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, user: &User) {
        let current = ProfileUpdate {
            username: user.username.clone(),
            email: user.email.clone(),
        };
        self.original = Some(current.clone());
        self.draft = Some(current);
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&ProfileUpdate> {
        self.draft.as_ref()
    }

    pub fn set_username(&mut self, username: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.username = username.to_string();
        }
    }

    pub fn set_email(&mut self, email: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.email = email.to_string();
        }
    }

    /// Whether the draft differs from the profile it was opened on.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Discard edits and leave edit mode.
    pub fn cancel(&mut self) {
        self.original = None;
        self.draft = None;
    }

    /// Validated draft ready to submit. Stays in edit mode until `finish`.
    pub fn submission(&self) -> Result<ProfileUpdate, SdkError> {
        match &self.draft {
            Some(draft) => draft.validated(),
            None => Err(SdkError::Validation("Not editing".into())),
        }
    }

    /// Leave edit mode after a successful save.
    pub fn finish(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::UserId;

    fn alice() -> User {
        User {
            id: UserId::from("u1"),
            username: "alice".into(),
            email: "alice@example.com".into(),
        }
    }

    #[test]
    fn test_edit_then_cancel_restores() {
        let mut editor = ProfileEditor::new();
        assert!(!editor.is_editing());
        editor.set_username("ignored");
        assert!(editor.draft().is_none());

        editor.begin(&alice());
        editor.set_username("alice2");
        assert!(editor.is_dirty());
        editor.cancel();
        assert!(!editor.is_editing());

        editor.begin(&alice());
        assert_eq!(editor.draft().unwrap().username, "alice");
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_submission_trims_and_validates() {
        let mut editor = ProfileEditor::new();
        editor.begin(&alice());
        editor.set_username("  alice2 ");
        let update = editor.submission().unwrap();
        assert_eq!(update.username, "alice2");

        editor.set_email("not-an-email");
        let err = editor.submission().unwrap_err();
        assert_eq!(err.user_message(), "Email is invalid");

        editor.set_email("a@b.co");
        editor.set_username("   ");
        assert_eq!(editor.submission().unwrap_err().user_message(), "Username is required");
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.io"));
        assert!(!looks_like_email("@b.io"));
        assert!(!looks_like_email("a@bio"));
        assert!(!looks_like_email("a@.io"));
    }
}
