use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez},
        pages::{go_to_timeline, index},
        timeline::{get_timeline, refresh_cache},
    },
    state::AppState,
};

/// Headroom on top of the fetch timeout before the whole request is cut.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Create the application router with all routes and middleware.
///
/// Routes are mounted under the configured root prefix, if any.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let routes = Router::new()
        .route("/", get(index))
        .route("/go-to-timeline", post(go_to_timeline))
        .route("/timeline/{user_id}", get(get_timeline))
        .route("/timeline/{user_id}/cache", delete(refresh_cache))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz));

    let root = state.config.root_url.clone();
    let router = if root.is_empty() {
        routes
    } else {
        Router::new().nest(&root, routes)
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.fetch_timeout() + REQUEST_TIMEOUT_SLACK,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use timelines_core::cache::{Cache, FullCache, Ttl};
    use timelines_core::calendar::{generate_demo_reviews, Book, Profile, Review};
    use timelines_core::remote::RemoteError;
    use tower::ServiceExt;

    use crate::cache::MemoryCache;
    use crate::config::Config;
    use crate::remote::InMemoryReadingApi;

    fn test_state(config: Config) -> (AppState, Arc<InMemoryReadingApi>, Arc<MemoryCache>) {
        test_state_with_api(config, InMemoryReadingApi::new())
    }

    fn test_state_with_api(
        config: Config,
        api: InMemoryReadingApi,
    ) -> (AppState, Arc<InMemoryReadingApi>, Arc<MemoryCache>) {
        let api = Arc::new(api);
        let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        api.insert_user(
            Profile::new("1234", "Ada Lovelace"),
            generate_demo_reviews(start, 30),
        );
        let cache = Arc::new(MemoryCache::new(config.cache_ttl()));
        let state = AppState::new(config, api.clone(), cache.clone() as Arc<dyn FullCache>);
        (state, api, cache)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_index_page() {
        let (state, _, _) = test_state(Config::default());

        let (status, body) = send(create_app(state), get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains(r#"action="/go-to-timeline""#));
        assert!(html.contains(r#"name="goodreads-uri""#));
    }

    #[tokio::test]
    async fn test_go_to_timeline_redirects() {
        let (state, _, _) = test_state(Config::default());

        let response = create_app(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/go-to-timeline")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "goodreads-uri=https%3A%2F%2Fwww.goodreads.com%2Fuser%2Fshow%2F1234-ada",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/timeline/1234");
    }

    #[tokio::test]
    async fn test_go_to_timeline_without_id_is_bad_request() {
        let (state, _, _) = test_state(Config::default());

        let (status, _) = send(
            create_app(state),
            Request::builder()
                .method("POST")
                .uri("/go-to-timeline")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("goodreads-uri=https%3A%2F%2Fexample.com%2F"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_timeline_json() {
        let (state, _, _) = test_state(Config::default());

        let (status, body) = send(create_app(state), get_request("/timeline/1234")).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["profile"]["name"], "Ada Lovelace");
        assert_eq!(
            json["link"],
            "https://www.goodreads.com/user/show/1234-ada%20lovelace"
        );
        // 30 generated reviews, four without a read date.
        assert_eq!(json["timeline"]["review_count"], 26);
        assert_eq!(json["summary"]["books"], "26");
        assert_eq!(json["timeline"]["span"]["month_start"], "2021-03-01");
        assert!(json["timeline"]["grid"]["months"].as_array().unwrap().len() >= 2);
    }

    #[tokio::test]
    async fn test_timeline_is_served_from_cache() {
        let (state, api, cache) = test_state(Config::default());
        let app = create_app(state);

        send(app.clone(), get_request("/timeline/1234")).await;
        let calls_after_first = api.page_calls();
        let (status, _) = send(app, get_request("/timeline/1234")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(api.page_calls(), calls_after_first);
        assert_eq!(api.profile_calls(), 1);
        assert!(cache.get("Profile:1234").await.unwrap().is_some());
        assert!(cache.get("Events:1234:1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_timeline_for_user_without_reads() {
        let (state, api, _) = test_state(Config::default());
        api.insert_user(Profile::new("5", "Nobody"), Vec::new());

        let (status, body) = send(create_app(state), get_request("/timeline/5")).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["timeline"]["span"], serde_json::Value::Null);
        assert_eq!(json["timeline"]["grid"]["months"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_timeline_unknown_user_is_not_found() {
        let (state, _, _) = test_state(Config::default());

        let (status, _) = send(create_app(state), get_request("/timeline/999")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_timeline_rate_limited() {
        let (state, api, _) = test_state(Config::default());
        api.fail_page("1234", 1, RemoteError::RateLimited);

        let (status, _) = send(create_app(state), get_request("/timeline/1234")).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_timeline_malformed_date_is_unprocessable() {
        let (state, api, _) = test_state(Config::default());
        api.insert_user(
            Profile::new("8", "Broken"),
            vec![Review::new(Book::new("Dune", "Frank Herbert"), "last tuesday")],
        );

        let (status, _) = send(create_app(state), get_request("/timeline/8")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_timeline_invalid_user_id() {
        let (state, _, _) = test_state(Config::default());

        let (status, _) = send(create_app(state), get_request("/timeline/ada")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_timeline_fetch_timeout() {
        let config = Config {
            fetch_timeout_seconds: 0,
            ..Config::default()
        };
        let api = InMemoryReadingApi::new().with_latency(Duration::from_millis(200));
        let (state, _, _) = test_state_with_api(config, api);

        let (status, _) = send(create_app(state), get_request("/timeline/1234")).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_refresh_cache_drops_only_that_user() {
        let (state, api, cache) = test_state(Config::default());
        cache.set("Profile:12345", b"{}", Ttl::Default).await.unwrap();
        let app = create_app(state);

        send(app.clone(), get_request("/timeline/1234")).await;
        let (status, _) = send(
            app.clone(),
            Request::builder()
                .method("DELETE")
                .uri("/timeline/1234/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(cache.keys().await.unwrap(), vec!["Profile:12345".to_string()]);

        send(app, get_request("/timeline/1234")).await;
        assert_eq!(api.profile_calls(), 2);
    }

    #[tokio::test]
    async fn test_routes_under_root_prefix() {
        let config = Config {
            root_url: "/timelines".to_string(),
            ..Config::default()
        };
        let (state, _, _) = test_state(config);
        let app = create_app(state);

        let (status, body) = send(app.clone(), get_request("/timelines/timeline/1234")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.is_empty());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/timelines/go-to-timeline")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("goodreads-uri=1234"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["location"], "/timelines/timeline/1234");

        let (status, _) = send(app, get_request("/timeline/1234")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (state, _, cache) = test_state(Config::default());
        cache.set("Profile:1", b"{}", Ttl::Default).await.unwrap();
        let app = create_app(state);

        let (status, _) = send(app.clone(), get_request("/livez")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, get_request("/healthz")).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["healthy"], true);
        assert_eq!(json["cache_entries"], 1);
    }
}
