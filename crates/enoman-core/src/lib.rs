//! Domain layer between `enoman-api` and the CLI.
//!
//! - **Model** ([`model`]) -- [`Device`] and its channel, emitter, sensor
//!   and light substructures, plus the [`Registry`] snapshot type and the
//!   EEP [`ProfileCatalog`].
//!
//! - **Form codec** ([`form`]) -- maps a flat `key.path = value` field set
//!   to a [`Device`] and back. [`EditorState`] wraps it with the
//!   row-oriented operations an editor needs.
//!
//! - **Suggestions** ([`suggest`]) -- proposes channel rows from a profile's
//!   declared channel range.
//!
//! - **[`RegistryClient`]** -- CRUD and import/export over the add-on API.
//!   Owns the [`RegistryCache`], which is replaced wholesale on every
//!   successful refresh and never patched in place.

pub mod config;
pub mod convert;
pub mod editor;
pub mod error;
pub mod form;
pub mod model;
pub mod registry;
pub mod store;
pub mod suggest;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use editor::EditorState;
pub use error::CoreError;
pub use form::{FieldPath, FormFields, decode, encode};
pub use registry::{ExportOutcome, ImportOutcome, RegistryClient};
pub use store::RegistryCache;
pub use suggest::{ChannelSuggestion, SuggestedChannel, suggest_channels};

pub use model::{
    Channel, Device, DeviceKey, Emitter, EmitterKind, HaType, LightSender, OutputPaths, Profile,
    ProfileCatalog, Registry, SensorOptions,
};
