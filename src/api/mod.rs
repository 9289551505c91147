//! The HTTP client for the finance REST API.
//!
//! [ApiClient] sends JSON requests and decodes JSON responses. The resource
//! clients ([crate::UserClient], [crate::CategoryClient] and
//! [crate::TransactionClient]) build on it, one method per endpoint. Each
//! method is a single round trip: there are no retries and nothing is cached.

pub(crate) mod date_format;
mod envelope;

use reqwest::{RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

use envelope::Envelope;

/// A connection to the finance REST API.
///
/// Cloning is cheap and clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`, e.g. "http://localhost:3000".
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the HTTP client
    /// could not be initialised.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        reqwest::Url::parse(base_url).map_err(|_| Error::InvalidApiUrl(base_url.to_owned()))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        tracing::debug!("GET {path}");
        decode_response(self.http.get(self.url(path))).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        tracing::debug!("GET {path}");
        decode_response(self.http.get(self.url(path)).query(query)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {path}");
        decode_response(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("PATCH {path}");
        decode_response(self.http.patch(self.url(path)).json(body)).await
    }

    /// Send a DELETE request. The response body, if any, is ignored.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        tracing::debug!("DELETE {path}");
        let response = self.http.delete(self.url(path)).send().await?;
        check_status(response).await.map(|_| ())
    }
}

async fn decode_response<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
    let response = check_status(request.send().await?).await?;
    let body = response.bytes().await?;

    serde_json::from_slice::<Envelope<T>>(&body)
        .map(Envelope::into_inner)
        .map_err(|error| {
            tracing::error!("could not decode API response: {error}");
            Error::Decode(error.to_string())
        })
}

/// Convert a non-2xx response into an [Error].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        tracing::warn!("API responded with 404 for {}", response.url().path());
        return Err(Error::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_owned()
    });

    tracing::error!("API responded with {status}: {message}");

    Err(Error::ApiStatus {
        status: status.as_u16(),
        message,
    })
}

/// Extract the `message` field of an error body.
///
/// Validation errors may send a list of messages, which are joined with "; ".
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    match value.get("message")? {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Array(messages) => Some(
            messages
                .iter()
                .filter_map(serde_json::Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde::Deserialize;
    use serde_json::json;

    use crate::{Error, test_utils::serve_router};

    use super::{ApiClient, error_message};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pong {
        pong: bool,
    }

    #[test]
    fn error_message_reads_string_and_list() {
        assert_eq!(
            error_message(r#"{"message": "Category not found"}"#),
            Some("Category not found".to_owned())
        );
        assert_eq!(
            error_message(r#"{"message": ["email must be an email", "password too short"]}"#),
            Some("email must be an email; password too short".to_owned())
        );
        assert_eq!(error_message("<html></html>"), None);
    }

    #[test]
    fn new_rejects_relative_url() {
        assert_eq!(
            ApiClient::new("localhost").unwrap_err(),
            Error::InvalidApiUrl("localhost".to_owned())
        );
    }

    #[test]
    fn new_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();

        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn decodes_wrapped_and_bare_responses() {
        let router = Router::new()
            .route("/wrapped", get(|| async { Json(json!({"data": {"pong": true}})) }))
            .route("/bare", get(|| async { Json(json!({"pong": true})) }));
        let base_url = serve_router(router).await;
        let client = ApiClient::new(&base_url).unwrap();

        let wrapped: Pong = client.get("/wrapped").await.unwrap();
        let bare: Pong = client.get("/bare").await.unwrap();

        assert_eq!(wrapped, Pong { pong: true });
        assert_eq!(bare, Pong { pong: true });
    }

    #[tokio::test]
    async fn maps_error_statuses() {
        let router = Router::new()
            .route(
                "/bad",
                get(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"message": "Invalid category"})),
                    )
                }),
            )
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let base_url = serve_router(router).await;
        let client = ApiClient::new(&base_url).unwrap();

        let missing = client.get::<Pong>("/missing").await;
        let bad = client.get::<Pong>("/bad").await;
        let broken = client.get::<Pong>("/broken").await;

        assert_eq!(missing, Err(Error::NotFound));
        assert_eq!(
            bad,
            Err(Error::ApiStatus {
                status: 400,
                message: "Invalid category".to_owned()
            })
        );
        assert_eq!(
            broken,
            Err(Error::ApiStatus {
                status: 500,
                message: "Internal Server Error".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let router = Router::new().route("/text", get(|| async { "not json" }));
        let base_url = serve_router(router).await;
        let client = ApiClient::new(&base_url).unwrap();

        let result = client.get::<Pong>("/text").await;

        assert!(matches!(result, Err(Error::Decode(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn delete_ignores_response_body() {
        let router = Router::new().route(
            "/things/1",
            axum::routing::delete(|| async { Json(json!({"deleted": true, "affected": 1})) }),
        );
        let base_url = serve_router(router).await;
        let client = ApiClient::new(&base_url).unwrap();

        assert_eq!(client.delete("/things/1").await, Ok(()));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();

        let result = client.get::<Pong>("/anything").await;

        assert!(matches!(result, Err(Error::Transport(_))), "got {result:?}");
    }
}
