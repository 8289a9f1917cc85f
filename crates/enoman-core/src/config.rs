// ── Runtime connection configuration ──
//
// Describes how to reach the add-on. Carries the optional bearer token and
// transport tuning but never touches disk; the CLI builds a `ClientConfig`
// from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use enoman_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed Home Assistant installs).
    DangerAcceptInvalid,
}

/// Configuration for connecting to one add-on instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Add-on address. May carry a reverse-proxy prefix or point at the
    /// UI's `index.html`; the base path is derived from it.
    pub url: Url,
    /// Bearer token for proxied access (Home Assistant long-lived token).
    pub token: Option<SecretString>,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Translate into the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            token: self.token.clone(),
        }
    }
}
