//! Survey server API.
//!
//! One operation per server endpoint, all POST with JSON bodies except
//! the CSRF token fetch. Failures (transport, non-2xx, malformed JSON)
//! are logged and swallowed: every operation uniformly resolves to
//! `None` instead of propagating the error, so a broken network never
//! crashes the form flow.

mod client;
mod error;
pub mod fingerprint;

pub use error::ApiError;

use crate::session::{DimensionPayload, OverviewPayload};
use client::Client;
use fake::Dummy;
use log::*;
use serde::Deserialize;
use serde_json::json;

/// Response of `/save-fingerprint/`.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq)]
pub struct RegisterOutcome {
    pub message: String,
    pub new: bool,
}

/// Response of `/check-fingerprint/`: registration status plus any
/// previously stored form answers.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FingerprintStatus {
    pub message: String,
    pub registered: bool,
    #[serde(default)]
    pub form: Option<serde_json::Value>,
}

/// Response of the dimension and overview update endpoints.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq)]
pub struct ServerMessage {
    pub message: String,
}

/// Responsible for asynchronous interaction with the survey server.
///
pub struct SurveyApi {
    client: Client,
}

impl SurveyApi {
    /// Returns a new instance for the given server base URL.
    ///
    pub fn new(base_url: &str) -> SurveyApi {
        debug!("Initializing survey client for {}...", base_url);
        SurveyApi {
            client: Client::new(base_url),
        }
    }

    /// Fetch and store the CSRF token. Returns whether the token was
    /// acquired.
    ///
    pub async fn acquire_csrf_token(&mut self) -> bool {
        match self.client.fetch_csrf_token().await {
            Ok(()) => {
                debug!("CSRF token acquired.");
                true
            }
            Err(e) => {
                error!("Failed to acquire CSRF token: {}", e);
                false
            }
        }
    }

    /// Register the fingerprint with the server.
    ///
    pub async fn save_fingerprint(&self, fingerprint_id: &str) -> Option<RegisterOutcome> {
        debug!("Registering fingerprint...");
        swallow(
            "register fingerprint",
            self.client
                .post("/save-fingerprint/", &json!({ "fingerprint_id": fingerprint_id }))
                .await,
        )
    }

    /// Ask whether the fingerprint is registered and retrieve any stored
    /// form answers.
    ///
    pub async fn check_fingerprint(&self, fingerprint_id: &str) -> Option<FingerprintStatus> {
        debug!("Checking fingerprint registration...");
        swallow(
            "check fingerprint",
            self.client
                .post("/check-fingerprint/", &json!({ "fingerprint_id": fingerprint_id }))
                .await,
        )
    }

    /// Persist the overview answers.
    ///
    pub async fn update_overview(&self, payload: &OverviewPayload) -> Option<ServerMessage> {
        debug!("Updating overview answers...");
        swallow(
            "update overview",
            self.client.post("/update-overview/", payload).await,
        )
    }

    /// Persist the socioeconomic dimension answers.
    ///
    pub async fn update_socioeconomic_dimension(
        &self,
        payload: &DimensionPayload,
    ) -> Option<ServerMessage> {
        debug!("Updating socioeconomic dimension answers...");
        swallow(
            "update socioeconomic dimension",
            self.client
                .post("/update-socioeconomic-dimension/", payload)
                .await,
        )
    }

    /// Persist the environment dimension answers.
    ///
    pub async fn update_environment_dimension(
        &self,
        payload: &DimensionPayload,
    ) -> Option<ServerMessage> {
        debug!("Updating environment dimension answers...");
        swallow(
            "update environment dimension",
            self.client
                .post("/update-environment-dimension/", payload)
                .await,
        )
    }
}

/// Log a failed operation and resolve it to the uniform `None` sentinel.
///
fn swallow<T>(operation: &str, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Failed to {}: {}", operation, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FormAnswers, MineLocation};
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use uuid::Uuid;

    fn api_with_token(base_url: &str) -> SurveyApi {
        let mut client = Client::new(base_url);
        client.csrf_token = Some("test-token".to_owned());
        SurveyApi { client }
    }

    #[tokio::test]
    async fn save_fingerprint_posts_the_identifier_with_the_csrf_header() {
        let fingerprint = Uuid::new_v4().to_string();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/save-fingerprint/")
                    .header("X-CSRFToken", "test-token")
                    .json_body(json!({ "fingerprint_id": fingerprint }));
                then.status(200)
                    .json_body(json!({ "message": "Fingerprint saved", "new": true }));
            })
            .await;

        let api = api_with_token(&server.base_url());
        let outcome = api.save_fingerprint(&fingerprint).await.unwrap();
        assert!(outcome.new);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn check_fingerprint_returns_stored_form_answers() {
        let fingerprint = Uuid::new_v4().to_string();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/check-fingerprint/");
                then.status(200).json_body(json!({
                    "message": "Searched if fingerprint is registered",
                    "registered": true,
                    "form": { "Water": { "water_reuse_rating": "7" } }
                }));
            })
            .await;

        let api = api_with_token(&server.base_url());
        let status = api.check_fingerprint(&fingerprint).await.unwrap();
        assert!(status.registered);
        assert!(status.form.is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn check_fingerprint_on_transport_failure_returns_none() {
        // Nothing listens here; the connection is refused
        let api = api_with_token("http://127.0.0.1:1");
        assert!(api.check_fingerprint("abc").await.is_none());
    }

    #[tokio::test]
    async fn check_fingerprint_on_malformed_json_returns_none() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/check-fingerprint/");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let api = api_with_token(&server.base_url());
        assert!(api.check_fingerprint("abc").await.is_none());
    }

    #[tokio::test]
    async fn update_overview_sends_the_flat_payload() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/update-overview/")
                    .json_body_partial(
                        r#"{ "project_name": "Mina Nord", "phase": "Exploració" }"#,
                    );
                then.status(200)
                    .json_body(json!({ "message": "Overview updated successfully" }));
            })
            .await;

        let payload = OverviewPayload {
            fingerprint: Uuid::new_v4().to_string(),
            project_name: "Mina Nord".to_owned(),
            company_name: Faker.fake(),
            mine_ubication: MineLocation {
                latitude: "41.6".to_owned(),
                longitude: "1.8".to_owned(),
            },
            phase: "Exploració".to_owned(),
        };
        let api = api_with_token(&server.base_url());
        let message = api.update_overview(&payload).await.unwrap();
        assert_eq!(message.message, "Overview updated successfully");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_dimension_nests_sections_next_to_the_fingerprint() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/update-environment-dimension/")
                    .json_body_partial(r#"{ "Water": { "water_reuse_rating": "7" } }"#);
                then.status(200)
                    .json_body(json!({ "message": "Environment Dimension updated" }));
            })
            .await;

        let mut sections = FormAnswers::new();
        sections.insert("Water".to_owned(), {
            let mut section = crate::session::SectionAnswers::new();
            section.insert(
                "water_reuse_rating".to_owned(),
                crate::session::Answer::text("7"),
            );
            section
        });
        let payload = DimensionPayload {
            fingerprint: Uuid::new_v4().to_string(),
            sections,
        };
        let api = api_with_token(&server.base_url());
        assert!(api.update_environment_dimension(&payload).await.is_some());
        mock.assert_async().await;
    }
}
