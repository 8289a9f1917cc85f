// ── Wire ↔ domain conversions ──
//
// Inbound data is trusted for display: unknown enum values fall back to
// their defaults with a warning instead of failing the whole fetch.

use enoman_api::types::{
    ChannelRecord, DeviceRecord, EmitterRecord, LightSenderRecord, PathsResponse, ProfileRecord,
    SensorOptionsRecord,
};
use tracing::warn;

use crate::model::{
    Channel, Device, Emitter, EmitterKind, HaType, LightSender, OutputPaths, Profile,
    SensorOptions,
};

// ── Inbound ─────────────────────────────────────────────────────────

impl From<DeviceRecord> for Device {
    fn from(r: DeviceRecord) -> Self {
        let ha_type = r.ha_type.parse().unwrap_or_else(|_| {
            warn!(id_hex = %r.id_hex, ha_type = %r.ha_type, "unknown ha_type, treating as switch");
            HaType::default()
        });
        Self {
            ha_type,
            eep: r.eep.filter(|eep| !eep.is_empty()),
            channels: r.channels.into_iter().map(Channel::from).collect(),
            sensor_options: r.sensor_options.and_then(sensor_options_from_record),
            light_sender: r
                .light_sender
                .filter(|s| !s.sender_id.is_empty())
                .map(|s| LightSender {
                    sender_id: s.sender_id,
                }),
            id_hex: r.id_hex,
            label: r.label,
        }
    }
}

impl From<ChannelRecord> for Channel {
    fn from(r: ChannelRecord) -> Self {
        Self {
            channel: r.channel,
            label: r.label,
            emitter: r.emitter.map(Emitter::from),
        }
    }
}

impl From<EmitterRecord> for Emitter {
    fn from(r: EmitterRecord) -> Self {
        let kind = match r.kind.as_deref() {
            None | Some("") => EmitterKind::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(emitter = %r.id, kind = raw, "unknown emitter kind, treating as binary_sensor");
                EmitterKind::default()
            }),
        };
        Self {
            id: r.id,
            kind,
            label: r.label,
        }
    }
}

/// Options without a device class are dropped, as the add-on never
/// persists them.
fn sensor_options_from_record(r: SensorOptionsRecord) -> Option<SensorOptions> {
    let device_class = r.device_class.filter(|c| !c.is_empty())?;
    Some(SensorOptions {
        device_class,
        unit_of_measurement: r.unit_of_measurement,
        min_temp: r.min_temp,
        max_temp: r.max_temp,
        range_from: r.range_from,
        range_to: r.range_to,
    })
}

impl From<ProfileRecord> for Profile {
    fn from(r: ProfileRecord) -> Self {
        Self {
            title: r
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| r.eep.clone()),
            eep: r.eep,
            channel_min: r.channel_min,
            channel_max: r.channel_max,
        }
    }
}

impl From<PathsResponse> for OutputPaths {
    fn from(r: PathsResponse) -> Self {
        Self {
            auto_output_path: r.auto_output_path,
            config_output_path: r.config_output_path,
            auto_backup_path: r.auto_backup_path,
            config_backup_path: r.config_backup_path,
        }
    }
}

// ── Outbound ────────────────────────────────────────────────────────

impl From<&Device> for DeviceRecord {
    fn from(d: &Device) -> Self {
        Self {
            id_hex: d.id_hex.clone(),
            label: d.label.clone(),
            ha_type: d.ha_type.to_string(),
            eep: d.eep.clone(),
            channels: d
                .channels
                .iter()
                .map(|c| ChannelRecord {
                    channel: c.channel,
                    label: c.label.clone(),
                    emitter: c.emitter.as_ref().map(|e| EmitterRecord {
                        id: e.id.clone(),
                        kind: Some(e.kind.to_string()),
                        label: e.label.clone(),
                    }),
                })
                .collect(),
            light_sender: d.light_sender.as_ref().map(|s| LightSenderRecord {
                sender_id: s.sender_id.clone(),
            }),
            sensor_options: d.sensor_options.as_ref().map(|o| SensorOptionsRecord {
                device_class: Some(o.device_class.clone()),
                unit_of_measurement: o.unit_of_measurement.clone(),
                min_temp: o.min_temp,
                max_temp: o.max_temp,
                range_from: o.range_from,
                range_to: o.range_to,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_kinds_fall_back_to_defaults() {
        let record = DeviceRecord {
            id_hex: "01020304".into(),
            ha_type: "cover".into(),
            channels: vec![ChannelRecord {
                channel: 0,
                label: "A".into(),
                emitter: Some(EmitterRecord {
                    id: "0A0B0C0D".into(),
                    kind: Some("button".into()),
                    label: None,
                }),
            }],
            ..DeviceRecord::default()
        };
        let device = Device::from(record);
        assert_eq!(device.ha_type, HaType::Switch);
        assert_eq!(
            device.channels[0].emitter.as_ref().map(|e| e.kind),
            Some(EmitterKind::BinarySensor)
        );
    }

    #[test]
    fn classless_sensor_options_and_empty_eep_are_dropped() {
        let record = DeviceRecord {
            id_hex: "01020304".into(),
            ha_type: "sensor".into(),
            eep: Some(String::new()),
            sensor_options: Some(SensorOptionsRecord {
                min_temp: Some(0.0),
                ..SensorOptionsRecord::default()
            }),
            ..DeviceRecord::default()
        };
        let device = Device::from(record);
        assert_eq!(device.eep, None);
        assert_eq!(device.sensor_options, None);
    }

    #[test]
    fn outbound_record_survives_the_way_back() {
        let device = Device {
            id_hex: "FFAABBCC".into(),
            label: "Thermo".into(),
            ha_type: HaType::Sensor,
            eep: Some("A5-02-05".into()),
            sensor_options: Some(SensorOptions {
                device_class: "temperature".into(),
                min_temp: Some(0.0),
                max_temp: Some(40.0),
                ..SensorOptions::default()
            }),
            ..Device::default()
        };
        let record = DeviceRecord::from(&device);
        assert_eq!(record.ha_type, "sensor");
        assert_eq!(Device::from(record), device);
    }

    #[test]
    fn profile_title_falls_back_to_code() {
        let profile = Profile::from(ProfileRecord {
            eep: "D2-01-12".into(),
            title: None,
            channel_min: Some(0),
            channel_max: Some(1),
        });
        assert_eq!(profile.title, "D2-01-12");
    }
}
