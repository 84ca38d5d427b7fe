use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use timelines_core::cache::is_user_key;
use timelines_core::calendar::{per_week, thousands, Profile, Timeline};
use timelines_core::remote::profile_link;

use crate::{
    handlers::{AppError, RequestError},
    state::AppState,
};

/// Human-readable totals for the page header.
#[derive(Debug, Serialize)]
pub struct TimelineSummary {
    /// e.g. `"1,234"`
    pub books: String,
    pub pages: String,
    /// Books per week over the covered months, one decimal.
    pub books_per_week: String,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub profile: Profile,
    pub link: String,
    pub summary: TimelineSummary,
    pub timeline: Timeline,
}

/// Accepts `1234` as well as `1234-ada-lovelace`.
fn user_id_from_path(raw: &str) -> Result<String, RequestError> {
    let id: String = raw.chars().take_while(char::is_ascii_digit).collect();
    if id.is_empty() {
        return Err(RequestError::InvalidUserId(raw.to_string()));
    }
    Ok(id)
}

fn summarize(timeline: &Timeline) -> TimelineSummary {
    let days = timeline.span.map(|span| span.days).unwrap_or(0);
    TimelineSummary {
        books: thousands(timeline.review_count as u64),
        pages: thousands(timeline.total_pages),
        books_per_week: format!("{:.1}", per_week(timeline.review_count, days)),
    }
}

/// Handler for a user's reading timeline (GET /timeline/{user_id}).
///
/// Fetches the profile and every review page (through the cache) under the
/// configured fetch timeout, then builds the calendar.
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(raw_user_id): Path<String>,
) -> Result<Json<TimelineResponse>, AppError> {
    let user_id = user_id_from_path(&raw_user_id)?;
    let timeout = state.config.fetch_timeout();

    let fetch = async {
        let profile = state.fetcher.get_profile(&user_id).await?;
        let reviews = state.fetcher.fetch_all_reviews(&user_id).await?;
        Ok::<_, AppError>((profile, reviews))
    };

    let (profile, reviews) = match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::warn!(user_id = %user_id, timeout_secs = timeout.as_secs(), "Timeline fetch timed out");
            return Err(RequestError::FetchTimeout(timeout).into());
        }
    };

    let timeline = Timeline::build(reviews, state.timeline_options())?;
    tracing::debug!(
        user_id = %user_id,
        reviews = timeline.review_count,
        months = timeline.grid.months.len(),
        "Built timeline"
    );

    Ok(Json(TimelineResponse {
        link: profile_link(&profile),
        summary: summarize(&timeline),
        profile,
        timeline,
    }))
}

/// Handler for dropping a user's cached data (DELETE /timeline/{user_id}/cache).
///
/// The next timeline request for the user fetches everything again.
pub async fn refresh_cache(
    State(state): State<AppState>,
    Path(raw_user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user_id = user_id_from_path(&raw_user_id)?;

    let keys: Vec<String> = state
        .cache
        .keys()
        .await?
        .into_iter()
        .filter(|key| is_user_key(key, &user_id))
        .collect();

    for key in &keys {
        state.cache.delete(key).await?;
    }

    tracing::info!(user_id = %user_id, removed = keys.len(), "Dropped cached timeline data");
    Ok(StatusCode::NO_CONTENT)
}
