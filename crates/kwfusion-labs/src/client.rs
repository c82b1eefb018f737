//! HTTP client for the DataForSEO Labs REST API.
//!
//! Wraps `reqwest` with basic-auth credential handling and DataForSEO-specific
//! error handling. All endpoints check the payload-level `status_code` field
//! and surface API-level failures as [`LabsError::Api`]; transport failures
//! and non-2xx HTTP statuses surface as [`LabsError::Http`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::LabsError;
use crate::menu::{self, MenuOptions, MenuResponse};
use crate::types::RelatedKeywordsRequest;

const DEFAULT_BASE_URL: &str = "https://api.dataforseo.com";
const RELATED_KEYWORDS_PATH: &str = "v3/dataforseo_labs/google/related_keywords/live";
const LOCATIONS_AND_LANGUAGES_PATH: &str = "v3/dataforseo_labs/locations_and_languages";
const SERP_ORGANIC_LIVE_PATH: &str = "v3/serp/google/organic/live/advanced";

/// Payload `status_code` value signalling success.
const STATUS_OK: i64 = 20_000;

const LOGIN_VAR: &str = "DATAFORSEO_LOGIN";
const PASSWORD_VAR: &str = "DATAFORSEO_PASSWORD";

/// Basic-auth credential pair for the DataForSEO API.
#[derive(Clone)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Reads `DATAFORSEO_LOGIN` and `DATAFORSEO_PASSWORD` from the process
    /// environment. Empty values count as unset.
    ///
    /// Called at request time so a missing credential surfaces before any
    /// network attempt.
    ///
    /// # Errors
    ///
    /// Returns [`LabsError::MissingCredentials`] naming the first unset
    /// variable.
    pub fn from_env() -> Result<Self, LabsError> {
        let read = |var: &'static str| -> Result<String, LabsError> {
            std::env::var(var)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .ok_or(LabsError::MissingCredentials(var))
        };

        Ok(Self {
            login: read(LOGIN_VAR)?,
            password: read(PASSWORD_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Client for the DataForSEO Labs REST API.
///
/// Manages the HTTP client, credentials, and base URL. Use [`LabsClient::new`]
/// for production or [`LabsClient::with_base_url`] to point at a mock server
/// in tests.
pub struct LabsClient {
    client: Client,
    credentials: Credentials,
    base_url: Url,
}

impl LabsClient {
    /// Creates a new client pointed at the production DataForSEO API.
    ///
    /// # Errors
    ///
    /// Returns [`LabsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: Credentials, timeout_secs: u64) -> Result<Self, LabsError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LabsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LabsError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        credentials: Credentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LabsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("kwfusion/0.1 (keyword-research)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| LabsError::Api {
            code: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            credentials,
            base_url,
        })
    }

    /// Fetches related-keyword metrics for a seed keyword.
    ///
    /// Posts the request as a one-element array (upstream convention) and
    /// returns the payload exactly as the API produced it; normalization is
    /// the caller's concern via [`crate::normalize`].
    ///
    /// # Errors
    ///
    /// - [`LabsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`LabsError::Api`] if the payload `status_code` is not 20000.
    /// - [`LabsError::Deserialize`] if the body is not valid JSON.
    pub async fn related_keywords(
        &self,
        request: &RelatedKeywordsRequest,
    ) -> Result<serde_json::Value, LabsError> {
        let url = self.endpoint(RELATED_KEYWORDS_PATH);
        let body = self
            .post_json(&url, std::slice::from_ref(request))
            .await?;
        Self::check_api_error(&body)?;
        Ok(body)
    }

    /// Fetches the location/language catalogue and reduces it to dropdown
    /// options.
    ///
    /// # Errors
    ///
    /// - [`LabsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`LabsError::Api`] if the payload `status_code` is not 20000.
    /// - [`LabsError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn locations_and_languages(&self) -> Result<MenuOptions, LabsError> {
        let url = self.endpoint(LOCATIONS_AND_LANGUAGES_PATH);
        let body = self.get_json(&url).await?;
        Self::check_api_error(&body)?;

        let response: MenuResponse =
            serde_json::from_value(body).map_err(|e| LabsError::Deserialize {
                context: "locations_and_languages".to_string(),
                source: e,
            })?;

        Ok(menu::build_menu_options(&response))
    }

    /// Proxies a SERP organic live task, passing the caller's task object
    /// through untouched apart from the one-element array wrapping.
    ///
    /// # Errors
    ///
    /// - [`LabsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`LabsError::Api`] if the payload `status_code` is not 20000.
    /// - [`LabsError::Deserialize`] if the body is not valid JSON.
    pub async fn serp_organic_live(
        &self,
        task: &serde_json::Value,
    ) -> Result<serde_json::Value, LabsError> {
        let url = self.endpoint(SERP_ORGANIC_LIVE_PATH);
        let body = self.post_json(&url, std::slice::from_ref(task)).await?;
        Self::check_api_error(&body)?;
        Ok(body)
    }

    /// Resolves an endpoint path against the normalised base URL.
    fn endpoint(&self, path: &str) -> Url {
        self.base_url.join(path).expect("static endpoint path")
    }

    /// Sends a basic-authed POST with a JSON body, asserts a 2xx HTTP status,
    /// and parses the response body as JSON.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &Url,
        payload: &T,
    ) -> Result<serde_json::Value, LabsError> {
        tracing::debug!(url = %url, "POST to DataForSEO");
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&self.credentials.login, Some(&self.credentials.password))
            .json(payload)
            .send()
            .await?;
        Self::parse_body(url, response).await
    }

    /// Sends a basic-authed GET, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, LabsError> {
        tracing::debug!(url = %url, "GET from DataForSEO");
        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.credentials.login, Some(&self.credentials.password))
            .send()
            .await?;
        Self::parse_body(url, response).await
    }

    async fn parse_body(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, LabsError> {
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| LabsError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the payload-level `status_code` field and returns an error if
    /// it signals failure. An absent field is not a failure; the envelope
    /// resolution in [`crate::normalize`] handles that as "no results".
    fn check_api_error(body: &serde_json::Value) -> Result<(), LabsError> {
        let code = body
            .get("status_code")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(STATUS_OK);
        if code != STATUS_OK {
            let message = body
                .get("status_message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(LabsError::Api { code, message });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> LabsClient {
        LabsClient::with_base_url(Credentials::new("login", "password"), 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_path_onto_base() {
        let client = test_client("https://api.dataforseo.com");
        let url = client.endpoint(RELATED_KEYWORDS_PATH);
        assert_eq!(
            url.as_str(),
            "https://api.dataforseo.com/v3/dataforseo_labs/google/related_keywords/live"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_on_base() {
        let client = test_client("http://localhost:9999/");
        let url = client.endpoint(SERP_ORGANIC_LIVE_PATH);
        assert_eq!(
            url.as_str(),
            "http://localhost:9999/v3/serp/google/organic/live/advanced"
        );
    }

    #[test]
    fn check_api_error_accepts_ok_and_absent_status() {
        let ok = serde_json::json!({ "status_code": 20000 });
        assert!(LabsClient::check_api_error(&ok).is_ok());

        let absent = serde_json::json!({});
        assert!(LabsClient::check_api_error(&absent).is_ok());
    }

    #[test]
    fn check_api_error_surfaces_upstream_message() {
        let body = serde_json::json!({
            "status_code": 40101,
            "status_message": "Authentication failed."
        });
        let err = LabsClient::check_api_error(&body).expect_err("should be an error");
        assert!(
            matches!(err, LabsError::Api { code: 40101, ref message } if message == "Authentication failed."),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn credentials_from_env_fails_fast_naming_the_variable() {
        std::env::remove_var(LOGIN_VAR);
        std::env::remove_var(PASSWORD_VAR);
        let err = Credentials::from_env().expect_err("missing login should fail");
        assert!(matches!(err, LabsError::MissingCredentials(LOGIN_VAR)));

        std::env::set_var(LOGIN_VAR, "login");
        std::env::set_var(PASSWORD_VAR, "  ");
        let err = Credentials::from_env().expect_err("blank password should fail");
        assert!(matches!(err, LabsError::MissingCredentials(PASSWORD_VAR)));

        std::env::set_var(PASSWORD_VAR, "password");
        assert!(Credentials::from_env().is_ok());
        std::env::remove_var(LOGIN_VAR);
        std::env::remove_var(PASSWORD_VAR);
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("login", "hunter2"));
        assert!(debug.contains("login"));
        assert!(!debug.contains("hunter2"));
    }
}
