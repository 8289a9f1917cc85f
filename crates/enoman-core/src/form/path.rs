// ── Typed form key paths ──
//
// Grammar:
//   <top>                          id_hex | label | ha_type | eep
//   channels.<i>.<field>           channel | label
//   channels.<i>.emitter.<field>   id | kind | label
//   channels.<i>.emitter_<field>   legacy spelling of the above
//   sensor_options.<field>
//   light_sender.sender_id

use std::fmt;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopField {
    IdHex,
    Label,
    HaType,
    Eep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelField {
    Channel,
    Label,
    EmitterId,
    EmitterKind,
    EmitterLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SensorField {
    DeviceClass,
    UnitOfMeasurement,
    MinTemp,
    MaxTemp,
    RangeFrom,
    RangeTo,
}

impl SensorField {
    /// Bounds are numbers on the wire; everything else stays a string.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::MinTemp | Self::MaxTemp | Self::RangeFrom | Self::RangeTo
        )
    }
}

/// A parsed form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Top(TopField),
    Channel { index: usize, field: ChannelField },
    Sensor(SensorField),
    LightSenderId,
}

impl FieldPath {
    /// Parse a dotted key.
    ///
    /// Returns `Ok(None)` for keys outside the grammar; those are ignored by
    /// the codec. A channel row index that is not a non-negative integer is
    /// a validation error.
    pub fn parse(key: &str) -> Result<Option<Self>, CoreError> {
        let segments: Vec<&str> = key.split('.').collect();
        let path = match segments.as_slice() {
            ["id_hex"] => Self::Top(TopField::IdHex),
            ["label"] => Self::Top(TopField::Label),
            ["ha_type"] => Self::Top(TopField::HaType),
            ["eep"] => Self::Top(TopField::Eep),
            ["channels", index, rest @ ..] => {
                let index = index.parse::<usize>().map_err(|_| {
                    CoreError::validation(key, "channel row index must be a non-negative integer")
                })?;
                let field = match rest {
                    ["channel"] => ChannelField::Channel,
                    ["label"] => ChannelField::Label,
                    ["emitter", "id"] | ["emitter_id"] => ChannelField::EmitterId,
                    ["emitter", "kind"] | ["emitter_kind"] => ChannelField::EmitterKind,
                    ["emitter", "label"] | ["emitter_label"] => ChannelField::EmitterLabel,
                    _ => return Ok(None),
                };
                Self::Channel { index, field }
            }
            ["sensor_options", field] => Self::Sensor(match *field {
                "device_class" => SensorField::DeviceClass,
                "unit_of_measurement" => SensorField::UnitOfMeasurement,
                "min_temp" => SensorField::MinTemp,
                "max_temp" => SensorField::MaxTemp,
                "range_from" => SensorField::RangeFrom,
                "range_to" => SensorField::RangeTo,
                _ => return Ok(None),
            }),
            ["light_sender", "sender_id"] => Self::LightSenderId,
            _ => return Ok(None),
        };
        Ok(Some(path))
    }

    pub fn channel(index: usize, field: ChannelField) -> Self {
        Self::Channel { index, field }
    }
}

/// Canonical spelling; the legacy emitter keys are never produced.
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top(field) => f.write_str(match field {
                TopField::IdHex => "id_hex",
                TopField::Label => "label",
                TopField::HaType => "ha_type",
                TopField::Eep => "eep",
            }),
            Self::Channel { index, field } => {
                let field = match field {
                    ChannelField::Channel => "channel",
                    ChannelField::Label => "label",
                    ChannelField::EmitterId => "emitter.id",
                    ChannelField::EmitterKind => "emitter.kind",
                    ChannelField::EmitterLabel => "emitter.label",
                };
                write!(f, "channels.{index}.{field}")
            }
            Self::Sensor(field) => {
                let field = match field {
                    SensorField::DeviceClass => "device_class",
                    SensorField::UnitOfMeasurement => "unit_of_measurement",
                    SensorField::MinTemp => "min_temp",
                    SensorField::MaxTemp => "max_temp",
                    SensorField::RangeFrom => "range_from",
                    SensorField::RangeTo => "range_to",
                };
                write!(f, "sensor_options.{field}")
            }
            Self::LightSenderId => f.write_str("light_sender.sender_id"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_and_legacy_emitter_keys() {
        let nested = FieldPath::parse("channels.2.emitter.kind").unwrap();
        let legacy = FieldPath::parse("channels.2.emitter_kind").unwrap();
        assert_eq!(nested, legacy);
        assert_eq!(
            nested,
            Some(FieldPath::channel(2, ChannelField::EmitterKind))
        );
    }

    #[test]
    fn unknown_keys_are_skipped() {
        for key in ["submit", "channels.0.colour", "sensor_options", "light_sender.id"] {
            assert_eq!(FieldPath::parse(key).unwrap(), None, "{key}");
        }
    }

    #[test]
    fn bad_row_index_is_a_validation_error() {
        assert!(matches!(
            FieldPath::parse("channels.x.label"),
            Err(CoreError::Validation { .. })
        ));
    }

    #[test]
    fn display_is_canonical() {
        let path = FieldPath::parse("channels.1.emitter_id").unwrap().unwrap();
        assert_eq!(path.to_string(), "channels.1.emitter.id");
        let path = FieldPath::parse("sensor_options.range_to").unwrap().unwrap();
        assert_eq!(path.to_string(), "sensor_options.range_to");
    }
}
