use thiserror::Error;

/// All errors that can occur when using the DM Cloud client.
#[derive(Error, Debug)]
pub enum DmCloudError {
    /// A required identifier was absent or blank. Raised before any request is built.
    #[error("missing :{0} in params")]
    MissingParam(&'static str),

    /// The response did not contain the expected value at `path`.
    #[error("response has no value at {path}")]
    MissingField { path: String },

    /// The download URL answered without a `Location` header.
    #[error("no redirect location returned for {url}")]
    MissingRedirect { url: String },

    /// The API key is missing or invalid (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The authenticated user does not have access to the requested resource (HTTP 403).
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// An error reported by the API, either via HTTP status or an `error` payload.
    /// `status_code` is always the HTTP status; `code` is the API's own error
    /// code when the payload carries one.
    #[error("API error {status_code}: {message}")]
    Api {
        status_code: u16,
        code: Option<i64>,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// A transport-level HTTP error from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body that was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured API key cannot be sent as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// A convenience alias for `Result<T, DmCloudError>`.
pub type Result<T> = std::result::Result<T, DmCloudError>;
