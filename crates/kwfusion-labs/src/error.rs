use thiserror::Error;

/// Errors returned by the DataForSEO Labs API client.
#[derive(Debug, Error)]
pub enum LabsError {
    /// A credential env var is unset or empty. Raised before any network call.
    #[error("missing credential: {0} is not set")]
    MissingCredentials(&'static str),

    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status from the upstream API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 2xx but the payload `status_code` signals failure.
    #[error("DataForSEO API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The response body could not be parsed into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
