// ── Device domain types ──

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use super::key::DeviceKey;
use crate::error::CoreError;

/// How the device is exposed in Home Assistant. Selects which of the
/// kind-specific substructures on [`Device`] are meaningful.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HaType {
    #[default]
    Switch,
    Light,
    Sensor,
}

/// Entity type an emitter is exposed as.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EmitterKind {
    #[default]
    BinarySensor,
    Switch,
}

/// One registry entry: a physical EnOcean unit and how Home Assistant
/// sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id_hex: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub ha_type: HaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eep: Option<String>,
    /// Meaningful for switches.
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_options: Option<SensorOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_sender: Option<LightSender>,
}

/// One addressable output of a switch actuator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub channel: u32,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emitter: Option<Emitter>,
}

/// The transmitter that drives a channel, reported back to Home Assistant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub id: String,
    #[serde(default)]
    pub kind: EmitterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorOptions {
    pub device_class: String,
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSender {
    pub sender_id: String,
}

impl Device {
    /// The key the add-on files this device under.
    pub fn key(&self) -> DeviceKey {
        if self.id_hex.trim().is_empty() {
            DeviceKey::new(format!("LIGHT::{}", self.label))
        } else {
            DeviceKey::new(&self.id_hex)
        }
    }

    /// Check the invariants a device must hold before it is persisted.
    ///
    /// Data fetched from the add-on is displayed as-is and never run
    /// through this.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id_hex.is_empty() {
            return Err(CoreError::validation("id_hex", "must not be empty"));
        }
        if !self
            .id_hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        {
            return Err(CoreError::validation(
                "id_hex",
                format!("'{}' is not uppercase hexadecimal", self.id_hex),
            ));
        }

        let mut seen = HashSet::with_capacity(self.channels.len());
        for (idx, channel) in self.channels.iter().enumerate() {
            if !seen.insert(channel.channel) {
                return Err(CoreError::validation(
                    format!("channels.{idx}.channel"),
                    format!("channel {} is declared more than once", channel.channel),
                ));
            }
            if let Some(emitter) = &channel.emitter {
                if emitter.id.trim().is_empty() {
                    return Err(CoreError::validation(
                        format!("channels.{idx}.emitter.id"),
                        "required when an emitter kind is set",
                    ));
                }
            }
        }

        if let Some(opts) = &self.sensor_options {
            if self.ha_type != HaType::Sensor {
                return Err(CoreError::validation(
                    "sensor_options",
                    format!("only allowed on a sensor, not a {}", self.ha_type),
                ));
            }
            if opts.device_class.trim().is_empty() {
                return Err(CoreError::validation(
                    "sensor_options.device_class",
                    "must not be empty",
                ));
            }
        }
        if let Some(sender) = &self.light_sender {
            if self.ha_type != HaType::Light {
                return Err(CoreError::validation(
                    "light_sender",
                    format!("only allowed on a light, not a {}", self.ha_type),
                ));
            }
            if sender.sender_id.trim().is_empty() {
                return Err(CoreError::validation(
                    "light_sender.sender_id",
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }
}
