// ── Core error types ──
//
// User-facing errors from wakedeck-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<wakedeck_api::Error>`
// impl folds transport-layer errors into the three-way taxonomy below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Pre-dispatch ─────────────────────────────────────────────────
    /// Input rejected client-side. No request was sent.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Device not found: {id}")]
    DeviceNotFound { id: String },

    // ── Dispatch failures ────────────────────────────────────────────
    /// The call did not produce a usable response: network failure,
    /// non-2xx without a message, or a malformed body.
    #[error("Backend unreachable: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// The backend answered with a well-formed failure envelope.
    /// `message` is the backend's text, unchanged.
    #[error("{message}")]
    Operation {
        message: String,
        status: Option<u16>,
    },
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wakedeck_api::Error> for CoreError {
    fn from(err: wakedeck_api::Error) -> Self {
        let status = err.status();
        match err {
            wakedeck_api::Error::Api { message, .. } => CoreError::Operation { message, status },
            wakedeck_api::Error::Http { status: code } => CoreError::Transport {
                message: format!("HTTP {code}"),
                status,
            },
            wakedeck_api::Error::Transport(ref e) => CoreError::Transport {
                message: if e.is_connect() {
                    "connection failed".into()
                } else {
                    e.to_string()
                },
                status,
            },
            wakedeck_api::Error::InvalidUrl(e) => CoreError::Transport {
                message: format!("invalid URL: {e}"),
                status: None,
            },
            wakedeck_api::Error::Deserialization { message, body: _ } => CoreError::Transport {
                message: format!("malformed response: {message}"),
                status: None,
            },
        }
    }
}
