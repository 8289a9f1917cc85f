// Wire types for the add-on HTTP API.
//
// These mirror the JSON the add-on emits and accepts. They are lenient on
// the way in (every optional field defaults) and carry no business rules;
// `enoman-core` converts them into its domain model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── Devices ─────────────────────────────────────────────────────────

/// `GET /api/devices` body. Key order is the store's insertion order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: IndexMap<String, DeviceRecord>,
}

/// A device as stored by the add-on. Also the body of `POST /api/devices`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DeviceRecord {
    #[serde(default)]
    pub id_hex: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub ha_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eep: Option<String>,
    #[serde(default)]
    pub channels: Vec<ChannelRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_sender: Option<LightSenderRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_options: Option<SensorOptionsRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChannelRecord {
    #[serde(default)]
    pub channel: u32,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitter: Option<EmitterRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EmitterRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LightSenderRecord {
    #[serde(default)]
    pub sender_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SensorOptionsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_to: Option<f64>,
}

// ── Paths ───────────────────────────────────────────────────────────

/// `GET /api/paths` body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsResponse {
    pub auto_output_path: String,
    pub config_output_path: String,
    #[serde(default)]
    pub auto_backup_path: Option<String>,
    #[serde(default)]
    pub config_backup_path: Option<String>,
}

// ── EEP profiles ────────────────────────────────────────────────────

/// `GET /api/eep` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfilesResponse {
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileRecord {
    pub eep: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel_min: Option<i64>,
    #[serde(default)]
    pub channel_max: Option<i64>,
}

/// `GET /api/suggest/channels?eep=...` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub eep: Option<String>,
    #[serde(default)]
    pub channels: Vec<i64>,
}

// ── Import / export ─────────────────────────────────────────────────

/// `POST /api/export` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub auto_output: Option<String>,
    #[serde(default)]
    pub config_output: Option<String>,
}

/// `POST /api/import` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub imported: Option<u64>,
}
