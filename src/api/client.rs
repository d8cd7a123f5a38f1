//! HTTP client for survey server requests.
//!
//! Low-level wrapper around `reqwest` handling the CSRF token exchange,
//! cookie persistence and response parsing. Every mutating request
//! carries the token in the `X-CSRFToken` header; the `csrftoken` cookie
//! set by the server rides along through the cookie store.

use super::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Path serving the CSRF token.
const CSRF_TOKEN_PATH: &str = "/get-csrf-token/";

#[derive(Deserialize)]
struct CsrfTokenResponse {
    csrftoken: String,
}

/// Makes requests to the survey server and parses JSON responses.
///
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) csrf_token: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never
    /// happen in practice as the builder only fails on invalid
    /// configuration, which we don't use.
    pub fn new(base_url: &str) -> Client {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            csrf_token: None,
            http_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Fetch the CSRF token from the server and remember it for every
    /// later mutating request.
    ///
    pub async fn fetch_csrf_token(&mut self) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, CSRF_TOKEN_PATH);
        let response = self.http_client.get(&url).send().await?;
        let parsed: CsrfTokenResponse = Client::parse(response).await?;
        self.csrf_token = Some(parsed.csrftoken);
        Ok(())
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// POST a JSON body and parse the JSON response.
    ///
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.csrf_token.as_deref().ok_or(ApiError::CsrfTokenMissing)?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .post(&url)
            .header(CSRF_HEADER, token)
            .json(body)
            .send()
            .await?;
        Client::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn fetch_csrf_token_stores_the_token() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/get-csrf-token/");
                then.status(200).json_body(json!({ "csrftoken": "token-123" }));
            })
            .await;

        let mut client = Client::new(&server.base_url());
        client.fetch_csrf_token().await.unwrap();
        assert_eq!(client.csrf_token(), Some("token-123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn post_without_a_token_fails_before_the_network() {
        let client = Client::new("http://localhost:1");
        let result: Result<serde_json::Value, _> =
            client.post("/save-fingerprint/", &json!({})).await;
        assert!(matches!(result, Err(ApiError::CsrfTokenMissing)));
    }

    #[tokio::test]
    async fn post_surfaces_non_success_statuses() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/update-overview/");
                then.status(405).json_body(json!({ "error": "Method Not Allowed" }));
            })
            .await;

        let mut client = Client::new(&server.base_url());
        client.csrf_token = Some("token".to_owned());
        let result: Result<serde_json::Value, _> =
            client.post("/update-overview/", &json!({})).await;
        assert!(matches!(result, Err(ApiError::Status { .. })));
    }

    #[tokio::test]
    async fn post_surfaces_decode_failures() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/save-fingerprint/");
                then.status(200).body("not json");
            })
            .await;

        let mut client = Client::new(&server.base_url());
        client.csrf_token = Some("token".to_owned());
        let result: Result<serde_json::Value, _> =
            client.post("/save-fingerprint/", &json!({})).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
