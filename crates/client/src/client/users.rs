//! User API operations.

use serde::Deserialize;
use timelines_core::calendar::Profile;

use super::GoodreadsClient;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct UserShowResponse {
    user: Profile,
}

impl GoodreadsClient {
    /// Get a user's profile by ID.
    pub async fn user_show(&self, user_id: &str) -> Result<Profile> {
        tracing::debug!(user_id = %user_id, "Requesting user profile");

        let response = self
            .client
            .get(self.url(&format!("/user/show/{user_id}.json")))
            .query(&[("key", self.key.as_str())])
            .send()
            .await?;
        let body: UserShowResponse = self.handle_response(response, "User", user_id).await?;
        Ok(body.user)
    }
}
