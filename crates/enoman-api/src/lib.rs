// enoman-api: Async Rust client for the EnOcean YAML manager add-on API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ManagerClient, resolve_base_url};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
