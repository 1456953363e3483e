//! Error types for the audit.
//!
//! Every fallible operation in the library returns [`Result`]. Only a few
//! variants are recovered from: a `404` on the protection endpoint is turned
//! into an unprotected [`ProtectionRule`](crate::protection::ProtectionRule)
//! and a `403` carrying a reset header is waited out by the request helper.
//! Everything else reaches the binary, which decides the exit status.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while auditing an organization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Token or organization could not be resolved from flags or environment.
    #[error("missing required parameter: {0}")]
    MissingCredentials(&'static str),

    /// The configuration file is missing, unreadable, or malformed.
    #[error("{0}")]
    Config(String),

    /// The API answered with a non-success status.
    #[error("GitHub API returned {status} for {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A response body did not match the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured bound on rate-limit waits was reached.
    #[error("rate limit still exhausted for {url} after {waits} waits")]
    RateLimitExhausted { url: String, waits: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Returns the HTTP status when this error came from an API response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for a `404 Not Found` API response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
