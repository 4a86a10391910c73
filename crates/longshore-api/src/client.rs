//! HTTP client for the Longshore platform API.
//!
//! # Example
//!
//! ```rust,no_run
//! use longshore_api::PlatformClient;
//!
//! # async fn example() -> Result<(), longshore_api::ApiError> {
//! let client = PlatformClient::new("https://api.longshore.dev", None)?;
//! let containers = client.containers().list_all().await?;
//! println!("{} containers", containers.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ApiError;
use crate::resources::{Containers, NodeClusters, Nodes, Services};

/// Default request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the platform's REST API.
///
/// Cheap to share by reference; every request is independent.
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl PlatformClient {
    /// Create a client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not start with `http://` or
    /// `https://`, or if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, token, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not start with `http://` or
    /// `https://`, or if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "must start with http:// or https://".into(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Setup)?;

        debug!(url = %base_url, "Platform client ready");

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// The base URL this client talks to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The container collection.
    #[must_use]
    pub fn containers(&self) -> Containers<'_> {
        Containers::new(self)
    }

    /// The service collection.
    #[must_use]
    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }

    /// The node collection.
    #[must_use]
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(self)
    }

    /// The node cluster collection.
    #[must_use]
    pub fn node_clusters(&self) -> NodeClusters<'_> {
        NodeClusters::new(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn check(
        &self,
        response: reqwest::Response,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            message: extract_error_message(&body),
        })
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, ApiError> {
        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// GET a JSON document.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        trace!(url, ?query, "GET");
        let response = self.send(self.http.get(url).query(query), url).await?;
        let response = self.check(response, url).await?;
        self.decode(response, url).await
    }

    /// GET a JSON document, treating 404 as absence rather than an error.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Option<T>, ApiError> {
        trace!(url, "GET (optional)");
        let response = self.send(self.http.get(url), url).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = self.check(response, url).await?;
        self.decode(response, url).await.map(Some)
    }

    /// POST a JSON body and decode the JSON response.
    pub(crate) async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        trace!(url, "POST");
        let response = self.send(self.http.post(url).json(body), url).await?;
        let response = self.check(response, url).await?;
        self.decode(response, url).await
    }

    /// POST a JSON body, ignoring the response body.
    pub(crate) async fn post_action<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        trace!(url, "POST (action)");
        let response = self.send(self.http.post(url).json(body), url).await?;
        self.check(response, url).await?;
        Ok(())
    }

    /// DELETE, ignoring the response body.
    pub(crate) async fn delete(&self, url: &str) -> Result<(), ApiError> {
        trace!(url, "DELETE");
        let response = self.send(self.http.delete(url), url).await?;
        self.check(response, url).await?;
        Ok(())
    }
}

/// Pull the message out of the platform's `{"error": "..."}` body; fall
/// back to the raw body when it is not in that shape.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rejects_non_http_scheme() {
        let err = PlatformClient::new("ws://api.longshore.dev", None)
            .expect_err("scheme should be rejected");
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client =
            PlatformClient::new("https://api.longshore.dev/", None).expect("should build");
        assert_eq!(
            client.endpoint("container/"),
            "https://api.longshore.dev/api/v1/container/"
        );
    }

    #[test]
    fn extract_error_message_prefers_structured_body() {
        assert_eq!(extract_error_message(r#"{"error": "no capacity"}"#), "no capacity");
        assert_eq!(extract_error_message("gateway exploded\n"), "gateway exploded");
    }

    #[tokio::test]
    async fn bearer_token_is_attached_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/container/"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            PlatformClient::new(&server.uri(), Some("sekrit".into())).expect("should build");
        let containers = client.containers().list_all().await.expect("should list");
        assert!(containers.is_empty());
    }

    #[tokio::test]
    async fn error_status_carries_extracted_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/container/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": "database is on fire",
            })))
            .mount(&server)
            .await;

        let client = PlatformClient::new(&server.uri(), None).expect("should build");
        let err = client
            .containers()
            .list_all()
            .await
            .expect_err("should fail");
        match err {
            ApiError::Status { status, message, .. } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database is on fire");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/container/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = PlatformClient::new(&server.uri(), None).expect("should build");
        let err = client
            .containers()
            .list_all()
            .await
            .expect_err("should fail");
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
