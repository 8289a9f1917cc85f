// Form ↔ Device codec.
//
// `encode` runs in two passes: every key is parsed into a `FieldPath` and
// sorted into a draft (channel rows grouped by index), then the draft is
// built into a `Device`, applying defaults and collapse rules.

use std::collections::BTreeMap;

use strum::VariantNames;
use tracing::debug;

use super::FormFields;
use super::path::{ChannelField, FieldPath, SensorField, TopField};
use crate::error::CoreError;
use crate::model::{Channel, Device, Emitter, EmitterKind, HaType, LightSender, SensorOptions};

// ── Encode ──────────────────────────────────────────────────────────

/// Build a [`Device`] from flat form fields.
///
/// Unrecognized keys are ignored. Fails with `Validation` on a malformed
/// channel number, enum value or sensor bound.
pub fn encode(fields: &FormFields) -> Result<Device, CoreError> {
    let mut draft = DeviceDraft::default();
    for (key, value) in fields.iter() {
        match FieldPath::parse(key)? {
            Some(path) => draft.set(path, value),
            None => debug!(key, "ignoring unrecognized form field"),
        }
    }
    draft.build()
}

#[derive(Default)]
struct DeviceDraft<'a> {
    id_hex: Option<&'a str>,
    label: Option<&'a str>,
    ha_type: Option<&'a str>,
    eep: Option<&'a str>,
    channels: BTreeMap<usize, ChannelDraft<'a>>,
    sensor: BTreeMap<SensorField, &'a str>,
    sender_id: Option<&'a str>,
}

#[derive(Default)]
struct ChannelDraft<'a> {
    channel: Option<&'a str>,
    label: Option<&'a str>,
    emitter_id: Option<&'a str>,
    emitter_kind: Option<&'a str>,
    emitter_label: Option<&'a str>,
}

impl<'a> DeviceDraft<'a> {
    fn set(&mut self, path: FieldPath, value: &'a str) {
        match path {
            FieldPath::Top(TopField::IdHex) => self.id_hex = Some(value),
            FieldPath::Top(TopField::Label) => self.label = Some(value),
            FieldPath::Top(TopField::HaType) => self.ha_type = Some(value),
            FieldPath::Top(TopField::Eep) => self.eep = Some(value),
            FieldPath::Channel { index, field } => {
                let row = self.channels.entry(index).or_default();
                let slot = match field {
                    ChannelField::Channel => &mut row.channel,
                    ChannelField::Label => &mut row.label,
                    ChannelField::EmitterId => &mut row.emitter_id,
                    ChannelField::EmitterKind => &mut row.emitter_kind,
                    ChannelField::EmitterLabel => &mut row.emitter_label,
                };
                *slot = Some(value);
            }
            FieldPath::Sensor(field) => {
                self.sensor.insert(field, value);
            }
            FieldPath::LightSenderId => self.sender_id = Some(value),
        }
    }

    fn build(self) -> Result<Device, CoreError> {
        let ha_type = match non_empty(self.ha_type) {
            None => HaType::default(),
            Some(raw) => raw.parse().map_err(|_| {
                CoreError::validation(
                    "ha_type",
                    format!("'{raw}' is not one of {}", HaType::VARIANTS.join(", ")),
                )
            })?,
        };

        let channels = self
            .channels
            .into_iter()
            .map(|(index, row)| row.build(index))
            .collect::<Result<Vec<_>, _>>()?;

        // Kind-specific fields left over from another `ha_type` are dropped.
        let device_class = self.sensor.get(&SensorField::DeviceClass).copied();
        let sensor_options = match non_blank(device_class) {
            Some(device_class) if ha_type == HaType::Sensor => {
                Some(build_sensor_options(device_class, &self.sensor)?)
            }
            _ => None,
        };

        let light_sender = non_blank(self.sender_id)
            .filter(|_| ha_type == HaType::Light)
            .map(|id| LightSender {
                sender_id: id.to_owned(),
            });

        Ok(Device {
            id_hex: self.id_hex.unwrap_or_default().trim().to_uppercase(),
            label: self.label.unwrap_or_default().to_owned(),
            ha_type,
            eep: non_blank(self.eep).map(str::to_owned),
            channels,
            sensor_options,
            light_sender,
        })
    }
}

impl ChannelDraft<'_> {
    fn build(self, index: usize) -> Result<Channel, CoreError> {
        let field = || FieldPath::channel(index, ChannelField::Channel).to_string();
        // A row without a number takes its row index, as the editor does.
        let channel = match self.channel {
            None => u32::try_from(index)
                .map_err(|_| CoreError::validation(field(), "row index out of range"))?,
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                CoreError::validation(field(), format!("'{raw}' is not a channel number"))
            })?,
        };

        let id = non_blank(self.emitter_id);
        let kind = non_empty(self.emitter_kind);
        let emitter = if id.is_none() && kind.is_none() {
            None
        } else {
            let kind = match kind {
                None => EmitterKind::default(),
                Some(kind) => kind.parse().map_err(|_| {
                    CoreError::validation(
                        FieldPath::channel(index, ChannelField::EmitterKind).to_string(),
                        format!("'{kind}' is not one of {}", EmitterKind::VARIANTS.join(", ")),
                    )
                })?,
            };
            Some(Emitter {
                id: id.unwrap_or_default().to_owned(),
                kind,
                label: non_blank(self.emitter_label).map(str::to_owned),
            })
        };

        Ok(Channel {
            channel,
            label: self.label.unwrap_or_default().to_owned(),
            emitter,
        })
    }
}

fn build_sensor_options(
    device_class: &str,
    fields: &BTreeMap<SensorField, &str>,
) -> Result<SensorOptions, CoreError> {
    let number = |field: SensorField| -> Result<Option<f64>, CoreError> {
        let Some(raw) = non_empty(fields.get(&field).copied()) else {
            return Ok(None);
        };
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(CoreError::validation(
                FieldPath::Sensor(field).to_string(),
                format!("'{raw}' is not a number"),
            )),
        }
    };

    Ok(SensorOptions {
        device_class: device_class.to_owned(),
        unit_of_measurement: non_blank(fields.get(&SensorField::UnitOfMeasurement).copied())
            .map(str::to_owned),
        min_temp: number(SensorField::MinTemp)?,
        max_temp: number(SensorField::MaxTemp)?,
        range_from: number(SensorField::RangeFrom)?,
        range_to: number(SensorField::RangeTo)?,
    })
}

/// Trimmed value, for fields that are parsed.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The value as typed, unless it is blank. Free-text fields keep their
/// spelling so a decode reproduces them.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Decode ──────────────────────────────────────────────────────────

/// Project a [`Device`] into form fields.
///
/// Only attributes present on the device are emitted; the editor supplies
/// defaults for the rest. A substructure that does not match `ha_type` is
/// left out.
pub fn decode(device: &Device) -> FormFields {
    let mut fields = FormFields::new();
    let mut put = |path: FieldPath, value: String| fields.set(path.to_string(), value);

    put(FieldPath::Top(TopField::IdHex), device.id_hex.clone());
    put(FieldPath::Top(TopField::Label), device.label.clone());
    put(FieldPath::Top(TopField::HaType), device.ha_type.to_string());
    if let Some(eep) = &device.eep {
        put(FieldPath::Top(TopField::Eep), eep.clone());
    }

    for (index, channel) in device.channels.iter().enumerate() {
        let at = |field| FieldPath::channel(index, field);
        put(at(ChannelField::Channel), channel.channel.to_string());
        put(at(ChannelField::Label), channel.label.clone());
        if let Some(emitter) = &channel.emitter {
            put(at(ChannelField::EmitterId), emitter.id.clone());
            put(at(ChannelField::EmitterKind), emitter.kind.to_string());
            if let Some(label) = &emitter.label {
                put(at(ChannelField::EmitterLabel), label.clone());
            }
        }
    }

    if let Some(opts) = device
        .sensor_options
        .as_ref()
        .filter(|_| device.ha_type == HaType::Sensor)
    {
        put(
            FieldPath::Sensor(SensorField::DeviceClass),
            opts.device_class.clone(),
        );
        if let Some(unit) = &opts.unit_of_measurement {
            put(FieldPath::Sensor(SensorField::UnitOfMeasurement), unit.clone());
        }
        for (field, value) in [
            (SensorField::MinTemp, opts.min_temp),
            (SensorField::MaxTemp, opts.max_temp),
            (SensorField::RangeFrom, opts.range_from),
            (SensorField::RangeTo, opts.range_to),
        ] {
            if let Some(value) = value {
                put(FieldPath::Sensor(field), value.to_string());
            }
        }
    }

    if let Some(sender) = device
        .light_sender
        .as_ref()
        .filter(|_| device.ha_type == HaType::Light)
    {
        put(FieldPath::LightSenderId, sender.sender_id.clone());
    }

    fields
}
