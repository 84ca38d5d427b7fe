//! Review list API operations.

use serde::Deserialize;
use timelines_core::calendar::Review;
use timelines_core::remote::ReviewListQuery;

use super::GoodreadsClient;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct ReviewListResponse {
    #[serde(default)]
    reviews: Vec<Review>,
}

impl GoodreadsClient {
    /// Get one page of a user's shelf.
    pub async fn review_list(&self, user_id: &str, query: &ReviewListQuery) -> Result<Vec<Review>> {
        tracing::debug!(
            user_id = %user_id,
            shelf = %query.shelf,
            page = query.page,
            "Requesting review list page"
        );

        let page = query.page.to_string();
        let per_page = query.per_page.to_string();
        let response = self
            .client
            .get(self.url(&format!("/review/list/{user_id}.json")))
            .query(&[
                ("key", self.key.as_str()),
                ("v", "2"),
                ("shelf", query.shelf.as_str()),
                ("sort", query.sort.as_str()),
                ("order", query.order.as_param()),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;
        let body: ReviewListResponse = self.handle_response(response, "User", user_id).await?;
        Ok(body.reviews)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ClientError;
    use crate::GoodreadsClient;
    use timelines_core::remote::ReviewListQuery;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_review_list_sends_query_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/review/list/1234.json"))
            .and(query_param("key", "secret"))
            .and(query_param("v", "2"))
            .and(query_param("shelf", "read"))
            .and(query_param("sort", "date_read"))
            .and(query_param("order", "a"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "200"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reviews": [
                    {
                        "id": "3770592837",
                        "rating": "5",
                        "read_count": "1",
                        "read_at": "Sat Jan 16 21:14:03 -0800 2021",
                        "book": {
                            "id": 50202953,
                            "title": "Piranesi",
                            "author": "Susanna Clarke",
                            "num_pages": "272"
                        }
                    },
                    {
                        "id": 1,
                        "read_at": "",
                        "book": { "title": "Unfinished", "author": null }
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoodreadsClient::new(server.uri(), "secret");
        let reviews = client
            .review_list("1234", &ReviewListQuery::read_by_date(2))
            .await
            .expect("reviews");

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, 3770592837);
        assert_eq!(reviews[0].book.title, "Piranesi");
        assert_eq!(reviews[0].pages(), 272);
        assert!(!reviews[1].is_read());
    }

    #[tokio::test]
    async fn test_review_list_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/review/list/1234.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reviews": []
            })))
            .mount(&server)
            .await;

        let client = GoodreadsClient::new(server.uri(), "secret");
        let reviews = client
            .review_list("1234", &ReviewListQuery::read_by_date(5))
            .await
            .expect("reviews");

        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_review_list_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoodreadsClient::new(server.uri(), "secret");
        let result = client
            .review_list("1234", &ReviewListQuery::read_by_date(1))
            .await;

        assert!(matches!(result, Err(ClientError::RateLimited)));
    }

    #[tokio::test]
    async fn test_review_list_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GoodreadsClient::new(server.uri(), "secret");
        let result = client
            .review_list("1234", &ReviewListQuery::read_by_date(1))
            .await;

        assert!(matches!(
            result,
            Err(ClientError::ServerError { status: 500, ref message }) if message == "boom"
        ));
    }
}
