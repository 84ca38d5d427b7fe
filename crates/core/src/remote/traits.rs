use async_trait::async_trait;

use crate::calendar::{Profile, Review};

use super::{Result, ReviewListQuery};

/// The remote reading API the timeline is built from.
#[async_trait]
pub trait ReadingApi: Send + Sync {
    /// Fetches a user's profile.
    async fn get_profile(&self, user_id: &str) -> Result<Profile>;

    /// Fetches one page of a user's reviews.
    ///
    /// An empty page means there are no more reviews.
    async fn list_reviews(&self, user_id: &str, query: &ReviewListQuery) -> Result<Vec<Review>>;
}
