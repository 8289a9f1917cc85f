// ── Core error types ──
//
// User-facing errors from enoman-core. Callers never match on reqwest or
// serde failures directly; the `From<enoman_api::Error>` impl folds them
// into the variants below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to add-on at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the add-on timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    /// A form field or device attribute is malformed. Nothing was sent.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Device not found: {key}")]
    NotFound { key: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// The add-on refused an operation. `detail` is its response body, verbatim.
    #[error(
        "{operation} failed{}: {detail}",
        .status.map_or_else(String::new, |s| format!(" (HTTP {s})"))
    )]
    RemoteFailure {
        operation: String,
        status: Option<u16>,
        detail: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Attribute an API failure to a named operation.
    ///
    /// Non-success statuses become `RemoteFailure` carrying the server's
    /// body; transport and parse failures keep their generic mapping.
    pub(crate) fn remote(operation: &str, err: enoman_api::Error) -> Self {
        match err {
            enoman_api::Error::Api { status, body } => Self::RemoteFailure {
                operation: operation.to_owned(),
                status: Some(status),
                detail: body,
            },
            other => other.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<enoman_api::Error> for CoreError {
    fn from(err: enoman_api::Error) -> Self {
        match err {
            enoman_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::RemoteFailure {
                        operation: "request".into(),
                        status: e.status().map(|s| s.as_u16()),
                        detail: e.to_string(),
                    }
                }
            }
            enoman_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            enoman_api::Error::InvalidBaseUrl { url, reason } => CoreError::Config {
                message: format!("Invalid add-on URL {url}: {reason}"),
            },
            enoman_api::Error::InvalidToken(reason) => CoreError::Config {
                message: format!("Invalid access token: {reason}"),
            },
            enoman_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            enoman_api::Error::Api { status, body } => CoreError::RemoteFailure {
                operation: "request".into(),
                status: Some(status),
                detail: body,
            },
            enoman_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response from add-on: {message}"))
            }
        }
    }
}
