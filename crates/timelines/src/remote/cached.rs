//! Cached reading API decorator.
//!
//! Wraps a `ReadingApi` implementation with the cache-aside pattern.

use std::sync::Arc;

use async_trait::async_trait;

use timelines_core::cache::{
    deserialize_profile, deserialize_reviews, profile_key, reviews_page_key, serialize_profile,
    serialize_reviews, Cache, Ttl,
};
use timelines_core::calendar::{Profile, Review};
use timelines_core::remote::{ReadingApi, Result, ReviewListQuery};

/// Cached reading API decorator.
///
/// - **Reads**: check the cache first, on miss call the API and populate
///   the cache with the raw response.
/// - **Errors**: API errors are returned untouched and nothing is cached.
///
/// Review pages are keyed by user and page number only, so every listing
/// that goes through this decorator must use the same shelf, sort and page
/// size (`ReviewListQuery::read_by_date`).
///
/// # Type Parameters
///
/// * `R` - The underlying API implementation
/// * `C` - The cache implementation
pub struct CachedReadingApi<R, C>
where
    R: ReadingApi + ?Sized,
    C: Cache + ?Sized,
{
    api: Arc<R>,
    cache: Arc<C>,
    ttl: Ttl,
}

impl<R, C> CachedReadingApi<R, C>
where
    R: ReadingApi + ?Sized,
    C: Cache + ?Sized,
{
    /// Creates a new cached API.
    ///
    /// # Arguments
    ///
    /// * `api` - The API to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Lifetime of cached responses
    pub fn new(api: Arc<R>, cache: Arc<C>, ttl: Ttl) -> Self {
        Self { api, cache, ttl }
    }
}

#[async_trait]
impl<R, C> ReadingApi for CachedReadingApi<R, C>
where
    R: ReadingApi + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        let cache_key = profile_key(user_id);

        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_profile(&bytes) {
                Ok(profile) => {
                    tracing::trace!(user_id = %user_id, "Cache hit for profile");
                    return Ok(profile);
                }
                Err(err) => {
                    tracing::warn!(user_id = %user_id, error = %err, "Cached profile could not be decoded");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "Failed to read cached profile");
            }
        }

        tracing::trace!(user_id = %user_id, "Cache miss for profile");
        let profile = self.api.get_profile(user_id).await?;

        match serialize_profile(&profile) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&cache_key, &bytes, self.ttl).await {
                    tracing::warn!(user_id = %user_id, error = %err, "Failed to cache profile");
                }
            }
            Err(err) => tracing::warn!(user_id = %user_id, error = %err, "Failed to encode profile"),
        }

        Ok(profile)
    }

    async fn list_reviews(&self, user_id: &str, query: &ReviewListQuery) -> Result<Vec<Review>> {
        let cache_key = reviews_page_key(user_id, query.page);

        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_reviews(&bytes) {
                Ok(reviews) => {
                    tracing::trace!(
                        user_id = %user_id,
                        page = query.page,
                        count = reviews.len(),
                        "Cache hit for review page"
                    );
                    return Ok(reviews);
                }
                Err(err) => {
                    tracing::warn!(
                        user_id = %user_id,
                        page = query.page,
                        error = %err,
                        "Cached review page could not be decoded"
                    );
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    page = query.page,
                    error = %err,
                    "Failed to read cached review page"
                );
            }
        }

        tracing::trace!(user_id = %user_id, page = query.page, "Cache miss for review page");
        let reviews = self.api.list_reviews(user_id, query).await?;

        match serialize_reviews(&reviews) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&cache_key, &bytes, self.ttl).await {
                    tracing::warn!(
                        user_id = %user_id,
                        page = query.page,
                        error = %err,
                        "Failed to cache review page"
                    );
                }
            }
            Err(err) => tracing::warn!(
                user_id = %user_id,
                page = query.page,
                error = %err,
                "Failed to encode review page"
            ),
        }

        Ok(reviews)
    }
}
