use async_trait::async_trait;
use timelines_core::calendar::{Profile, Review};
use timelines_core::remote::{ReadingApi, RemoteError, ReviewListQuery};

use super::GoodreadsClient;

#[async_trait]
impl ReadingApi for GoodreadsClient {
    async fn get_profile(&self, user_id: &str) -> Result<Profile, RemoteError> {
        self.user_show(user_id).await.map_err(RemoteError::from)
    }

    async fn list_reviews(
        &self,
        user_id: &str,
        query: &ReviewListQuery,
    ) -> Result<Vec<Review>, RemoteError> {
        self.review_list(user_id, query)
            .await
            .map_err(RemoteError::from)
    }
}
