//! Profiles sub-client — save the signed-in user's profile.

use super::ProfileUpdate;
use crate::client::DashboardClient;
use crate::domain::session::User;
use crate::error::{AuthError, SdkError};
use crate::http::RetryPolicy;

pub struct Profiles<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Profiles<'a> {
    /// `PUT /user/profile`, then swap the session user for the server's copy.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<User, SdkError> {
        let client = self.client;
        if !client.session.is_authenticated().await {
            return Err(AuthError::NotAuthenticated.into());
        }
        let update = update.validated()?;

        let url = client.http.url("/user/profile");
        let result = client
            .cancel
            .run(client.http.put::<User, _>(&url, &update, RetryPolicy::None))
            .await;
        let user = client.observe(result).await?;

        client.session.update_user(user.clone()).await?;
        client.notifier.success("Profile updated successfully");
        Ok(user)
    }
}
