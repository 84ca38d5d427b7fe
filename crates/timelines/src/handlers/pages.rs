use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;

use timelines_core::remote::parse_profile_uri;

use crate::{
    handlers::{AppError, RequestError},
    state::AppState,
};

/// Handler for the index page (GET /).
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Goodreads timelines</title>
</head>
<body>
  <h1>Goodreads timelines</h1>
  <p>See everything you have read, one calendar day at a time.</p>
  <form method="post" action="{action}">
    <label for="goodreads-uri">Your Goodreads profile URL</label>
    <input id="goodreads-uri" name="goodreads-uri" type="url"
           placeholder="https://www.goodreads.com/user/show/1234-your-name" required>
    <button type="submit">Show my timeline</button>
  </form>
</body>
</html>
"#,
        action = state.config.url("/go-to-timeline")
    ))
}

#[derive(Debug, Deserialize)]
pub struct GoToTimelineForm {
    #[serde(rename = "goodreads-uri", default)]
    pub goodreads_uri: String,
}

/// Handler for the profile form (POST /go-to-timeline).
///
/// Redirects (303) to the timeline of the user the submitted profile URL
/// points at.
pub async fn go_to_timeline(
    State(state): State<AppState>,
    Form(form): Form<GoToTimelineForm>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_profile_uri(&form.goodreads_uri)
        .ok_or_else(|| RequestError::InvalidUserId(form.goodreads_uri.clone()))?;

    tracing::debug!(user_id = %user_id, "Redirecting to timeline");
    Ok(Redirect::to(&state.config.url(&format!("/timeline/{user_id}"))))
}
