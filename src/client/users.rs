//! User endpoints.

use super::{PendingRequest, TasklineClient};
use crate::auth::UserProfile;
use crate::error::Result;
use crate::types::UpdateUserRequest;

impl TasklineClient {
    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>> {
        self.send(PendingRequest::get("/users")).await
    }

    /// Fetch a user by id.
    pub async fn get_user(&self, id: &str) -> Result<UserProfile> {
        self.send(PendingRequest::get(format!("/users/{id}"))).await
    }

    /// Update the signed-in user's profile. The stored user snapshot is
    /// refreshed so it survives a restart with a file-backed store.
    pub async fn update_profile(&self, body: UpdateUserRequest) -> Result<UserProfile> {
        let updated: UserProfile = self
            .send(PendingRequest::patch("/users").json(&body)?)
            .await?;
        let mut credentials = self.store.load();
        if credentials.is_authenticated() {
            credentials.user = Some(updated.clone());
            self.store.save(&credentials);
        }
        Ok(updated)
    }

    /// Delete a user account.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.send_unit(PendingRequest::delete(format!("/users/{id}")))
            .await
    }
}
