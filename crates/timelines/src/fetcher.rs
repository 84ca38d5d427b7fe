//! Event fetcher: pulls a user's profile and full reading history.
//!
//! The fetcher talks to whatever [`ReadingApi`] it is given; in the server
//! that is a [`CachedReadingApi`](crate::remote::CachedReadingApi), so every
//! call here is a cache read first.

use std::sync::Arc;

use timelines_core::calendar::{Profile, Review};
use timelines_core::remote::{ReadingApi, Result, ReviewListQuery, MAX_PAGES};

/// Fetches profiles and paginated reviews through a reading API.
#[derive(Clone)]
pub struct EventFetcher {
    api: Arc<dyn ReadingApi>,
}

impl EventFetcher {
    pub fn new(api: Arc<dyn ReadingApi>) -> Self {
        Self { api }
    }

    /// Fetches a user's profile.
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        self.api.get_profile(user_id).await
    }

    /// Fetches one page of the user's "read" shelf, oldest first.
    pub async fn fetch_review_page(&self, user_id: &str, page: u32) -> Result<Vec<Review>> {
        self.api
            .list_reviews(user_id, &ReviewListQuery::read_by_date(page))
            .await
    }

    /// Fetches every finished review of a user, in API order.
    ///
    /// Walks pages `1..=MAX_PAGES` and stops at the first empty page.
    /// Reviews without a read date are dropped. Any page error aborts the
    /// whole fetch and discards what was collected.
    pub async fn fetch_all_reviews(&self, user_id: &str) -> Result<Vec<Review>> {
        let mut reviews = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch = self.fetch_review_page(user_id, page).await?;
            if batch.is_empty() {
                break;
            }
            reviews.extend(batch.into_iter().filter(Review::is_read));
        }

        tracing::debug!(user_id = %user_id, count = reviews.len(), "Fetched reviews");
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::NaiveDate;
    use timelines_core::calendar::{generate_demo_reviews, Book};
    use timelines_core::cache::Ttl;
    use timelines_core::remote::RemoteError;

    use crate::cache::MemoryCache;
    use crate::remote::{CachedReadingApi, InMemoryReadingApi};

    fn read_reviews(count: usize) -> Vec<Review> {
        (0..count)
            .map(|i| {
                Review::new(
                    Book::new(format!("Book {i}"), "Author"),
                    "Tue Mar 02 14:05:00 -0800 2021",
                )
                .with_id(i as u64)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_pagination_stops_at_first_empty_page() {
        let api = Arc::new(InMemoryReadingApi::new());
        api.insert_user(Profile::new("1", "Ada"), read_reviews(447));
        let fetcher = EventFetcher::new(api.clone());

        let reviews = fetcher.fetch_all_reviews("1").await.unwrap();

        assert_eq!(reviews.len(), 447);
        assert_eq!(api.page_calls(), 4);
    }

    #[tokio::test]
    async fn test_preserves_api_order() {
        let api = Arc::new(InMemoryReadingApi::new());
        api.insert_user(Profile::new("1", "Ada"), read_reviews(450));
        let fetcher = EventFetcher::new(api);

        let ids: Vec<u64> = fetcher
            .fetch_all_reviews("1")
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, (0..450).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_drops_reviews_without_read_date() {
        let api = Arc::new(InMemoryReadingApi::new());
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        // Every seventh generated review has no read date.
        api.insert_user(Profile::new("1", "Ada"), generate_demo_reviews(start, 14));
        let fetcher = EventFetcher::new(api);

        let reviews = fetcher.fetch_all_reviews("1").await.unwrap();

        assert_eq!(reviews.len(), 12);
        assert!(reviews.iter().all(Review::is_read));
    }

    #[tokio::test]
    async fn test_empty_history_makes_one_call() {
        let api = Arc::new(InMemoryReadingApi::new());
        api.insert_user(Profile::new("1", "Ada"), Vec::new());
        let fetcher = EventFetcher::new(api.clone());

        let reviews = fetcher.fetch_all_reviews("1").await.unwrap();

        assert!(reviews.is_empty());
        assert_eq!(api.page_calls(), 1);
    }

    #[tokio::test]
    async fn test_page_error_aborts_fetch() {
        let api = Arc::new(InMemoryReadingApi::new());
        api.insert_user(Profile::new("1", "Ada"), read_reviews(447));
        api.fail_page("1", 2, RemoteError::RateLimited);
        let fetcher = EventFetcher::new(api.clone());

        let result = fetcher.fetch_all_reviews("1").await;

        assert_eq!(result, Err(RemoteError::RateLimited));
        assert_eq!(api.page_calls(), 2);
    }

    #[tokio::test]
    async fn test_stops_after_max_pages() {
        let api = Arc::new(InMemoryReadingApi::new());
        api.insert_user(Profile::new("1", "Ada"), read_reviews(200 * 100));
        let fetcher = EventFetcher::new(api.clone());

        let reviews = fetcher.fetch_all_reviews("1").await.unwrap();

        assert_eq!(reviews.len(), 200 * 99);
        assert_eq!(api.page_calls(), 99);
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let api = Arc::new(InMemoryReadingApi::new());
        api.insert_user(Profile::new("1", "Ada"), read_reviews(447));
        let cache = Arc::new(MemoryCache::new(Duration::from_secs(60)));
        let fetcher = EventFetcher::new(Arc::new(CachedReadingApi::new(
            api.clone(),
            cache,
            Ttl::Default,
        )));

        let first = fetcher.fetch_all_reviews("1").await.unwrap();
        let second = fetcher.fetch_all_reviews("1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(api.page_calls(), 4);
    }
}
