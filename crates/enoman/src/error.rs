//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use enoman_config::ConfigError;
use enoman_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const VALIDATION: i32 = 9;
    pub const REMOTE: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the add-on at {url}")]
    #[diagnostic(
        code(enoman::connection_failed),
        help(
            "Check that the add-on is running and reachable.\n\
             Reason: {reason}\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to the add-on timed out")]
    #[diagnostic(
        code(enoman::timeout),
        help("Increase the timeout with --timeout or check the add-on's responsiveness.")
    )]
    Timeout,

    // ── Registry ─────────────────────────────────────────────────────

    #[error("Device '{key}' not found")]
    #[diagnostic(
        code(enoman::not_found),
        help("Run: enoman devices list to see registered devices")
    )]
    NotFound { key: String },

    #[error(
        "{operation} failed{}: {detail}",
        .status.map_or_else(String::new, |s| format!(" (HTTP {s})"))
    )]
    #[diagnostic(code(enoman::remote))]
    Remote {
        operation: String,
        status: Option<u16>,
        detail: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(enoman::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(enoman::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: enoman config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No add-on configured")]
    #[diagnostic(
        code(enoman::no_config),
        help(
            "Create a profile with: enoman config init\n\
             Or pass --url / set ENOMAN_URL.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(enoman::config))]
    Config(Box<figment::Error>),

    #[error("Configuration error: {message}")]
    #[diagnostic(code(enoman::config))]
    Configuration { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(enoman::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal / IO ────────────────────────────────────────────────

    #[error("Internal error: {message}")]
    #[diagnostic(code(enoman::internal))]
    Internal { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(enoman::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Remote { .. } => exit_code::REMOTE,
            Self::Validation { .. } => exit_code::VALIDATION,
            Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            CoreError::NotFound { key } => CliError::NotFound { key },
            CoreError::RemoteFailure {
                operation,
                status,
                detail,
            } => CliError::Remote {
                operation,
                status,
                detail,
            },
            CoreError::Config { message } => CliError::Configuration { message },
            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Keyring(_)) => {
                CliError::Configuration {
                    message: other.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let cases = [
            (CoreError::Timeout, exit_code::TIMEOUT),
            (
                CoreError::NotFound { key: "AA".into() },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::Validation {
                    field: "id_hex".into(),
                    reason: "empty".into(),
                },
                exit_code::VALIDATION,
            ),
            (
                CoreError::RemoteFailure {
                    operation: "save".into(),
                    status: Some(422),
                    detail: "bad".into(),
                },
                exit_code::REMOTE,
            ),
            (
                CoreError::ConnectionFailed {
                    url: "http://x".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (CoreError::Internal("boom".into()), exit_code::GENERAL),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn remote_message_keeps_status_and_body() {
        let err = CliError::from(CoreError::RemoteFailure {
            operation: "save".into(),
            status: Some(422),
            detail: r#"{"detail":"bad id"}"#.into(),
        });
        assert_eq!(err.to_string(), r#"save failed (HTTP 422): {"detail":"bad id"}"#);
    }
}
