//! In-memory reading API implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use timelines_core::calendar::{demo_profile, generate_demo_reviews, Profile, Review};
use timelines_core::remote::{ReadingApi, RemoteError, Result, ReviewListQuery};

/// Number of reviews served in demo mode.
const DEMO_REVIEW_COUNT: u32 = 240;

#[derive(Debug, Clone)]
struct UserData {
    profile: Profile,
    reviews: Vec<Review>,
}

/// In-memory reading API for demos and testing.
///
/// Reviews are stored flat and served in `per_page` slices, so a user with
/// 447 reviews yields pages of 200, 200, 47 and then an empty page. Call
/// counters let tests assert how often the API was actually hit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReadingApi {
    users: Arc<RwLock<HashMap<String, UserData>>>,
    /// Answer for any unknown user with this data.
    demo: Option<Arc<Vec<Review>>>,
    /// Pages that fail with the stored error.
    failures: Arc<RwLock<HashMap<(String, u32), RemoteError>>>,
    /// Delay added to every review page request.
    latency: Option<Duration>,
    profile_calls: Arc<AtomicUsize>,
    page_calls: Arc<AtomicUsize>,
}

impl InMemoryReadingApi {
    /// Creates an empty API that knows no users.
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an API that serves a generated reading history for any user.
    pub fn with_demo_data() -> Self {
        let start = NaiveDate::from_ymd_opt(2020, 11, 3).unwrap_or_default();
        Self {
            demo: Some(Arc::new(generate_demo_reviews(start, DEMO_REVIEW_COUNT))),
            ..Self::default()
        }
    }

    /// Delays every review page request by `latency`.
    #[cfg(test)]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Registers a user and their reviews, in read order.
    #[cfg(test)]
    pub fn insert_user(&self, profile: Profile, reviews: Vec<Review>) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(profile.id.clone(), UserData { profile, reviews });
    }

    /// Makes every request for `page` of `user_id` fail with `error`.
    #[cfg(test)]
    pub fn fail_page(&self, user_id: &str, page: u32, error: RemoteError) {
        let mut failures = self.failures.write().unwrap_or_else(|e| e.into_inner());
        failures.insert((user_id.to_string(), page), error);
    }

    /// How many times `get_profile` was called.
    #[cfg(test)]
    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    /// How many times `list_reviews` was called.
    #[cfg(test)]
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    fn user(&self, user_id: &str) -> Result<UserData> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        if let Some(data) = users.get(user_id) {
            return Ok(data.clone());
        }

        match &self.demo {
            Some(reviews) => Ok(UserData {
                profile: demo_profile(user_id),
                reviews: reviews.as_ref().clone(),
            }),
            None => Err(RemoteError::NotFound {
                resource: "User",
                id: user_id.to_string(),
            }),
        }
    }
}

#[async_trait]
impl ReadingApi for InMemoryReadingApi {
    async fn get_profile(&self, user_id: &str) -> Result<Profile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let data = self.user(user_id)?;
        let mut profile = data.profile;
        if profile.reviews_count == 0 {
            profile.reviews_count = data.reviews.len() as u64;
        }
        Ok(profile)
    }

    async fn list_reviews(&self, user_id: &str, query: &ReviewListQuery) -> Result<Vec<Review>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self
            .failures
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(user_id.to_string(), query.page))
            .cloned();
        if let Some(error) = failure {
            return Err(error);
        }

        let reviews = self.user(user_id)?.reviews;
        if query.page == 0 || query.per_page == 0 {
            return Ok(Vec::new());
        }

        let per_page = query.per_page as usize;
        let start = (query.page as usize - 1).saturating_mul(per_page);
        Ok(reviews.into_iter().skip(start).take(per_page).collect())
    }
}
