use thiserror::Error;

/// Top-level error type for the `wakedeck-api` crate.
///
/// Covers every way a backend call can fail: the request never completing,
/// a non-2xx status, an unreadable body, or a well-formed failure envelope.
/// `wakedeck-core` folds these into its transport/operation taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-2xx response without a readable `error` message.
    #[error("Backend returned HTTP {status}")]
    Http { status: u16 },

    // ── Envelope ────────────────────────────────────────────────────
    /// Failure envelope from the backend (`success: false` or an `error`
    /// field). `status` is the HTTP status it arrived with.
    #[error("{message}")]
    Api { message: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status the failure arrived with, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Http { status } | Self::Api { status, .. } => Some(*status),
            Self::InvalidUrl(_) | Self::Deserialization { .. } => None,
        }
    }
}
