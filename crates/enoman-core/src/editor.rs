// ── Editor state ──
//
// Form fields plus the explicit "currently editing" target. The target is
// set by `load` and never inferred from the field values.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::form::{self, ChannelField, FieldPath, FormFields, TopField};
use crate::model::{Device, DeviceKey, HaType};
use crate::suggest::{ChannelSuggestion, default_label};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    target: Option<DeviceKey>,
    fields: FormFields,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// A blank editor for a new device.
    pub fn new() -> Self {
        let mut fields = FormFields::new();
        fields.set(FieldPath::Top(TopField::IdHex).to_string(), "");
        fields.set(FieldPath::Top(TopField::Label).to_string(), "");
        fields.set(
            FieldPath::Top(TopField::HaType).to_string(),
            HaType::default().to_string(),
        );
        Self {
            target: None,
            fields,
        }
    }

    /// Populate the editor from a stored device and make it the target.
    ///
    /// Channel rows with an empty label get the placeholder label.
    pub fn load(device: &Device) -> Self {
        let mut fields = Self::new().fields;
        fields.overlay(&form::decode(device));
        for (index, channel) in device.channels.iter().enumerate() {
            if channel.label.is_empty() {
                fields.set(
                    FieldPath::channel(index, ChannelField::Label).to_string(),
                    default_label(channel.channel),
                );
            }
        }
        Self {
            target: Some(device.key()),
            fields,
        }
    }

    /// Key of the device being edited, `None` when creating.
    pub fn target(&self) -> Option<&DeviceKey> {
        self.target.as_ref()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.set(key, value);
    }

    pub fn overlay(&mut self, fields: &FormFields) {
        self.fields.overlay(fields);
    }

    /// Row indices currently holding at least one channel field.
    pub fn channel_rows(&self) -> BTreeSet<usize> {
        self.fields
            .iter()
            .filter_map(|(key, _)| match FieldPath::parse(key) {
                Ok(Some(FieldPath::Channel { index, .. })) => Some(index),
                _ => None,
            })
            .collect()
    }

    /// Append a channel row after the last one, numbered and labelled
    /// after its index. Returns the new row's index.
    pub fn add_channel_row(&mut self) -> usize {
        let index = self.channel_rows().last().map_or(0, |last| last + 1);
        self.fields.set(
            FieldPath::channel(index, ChannelField::Channel).to_string(),
            index.to_string(),
        );
        self.fields.set(
            FieldPath::channel(index, ChannelField::Label).to_string(),
            default_label(index),
        );
        index
    }

    /// Drop every field of one channel row. Returns `false` if the row did
    /// not exist.
    pub fn remove_channel_row(&mut self, index: usize) -> bool {
        let before = self.fields.len();
        self.fields.retain(|key, _| {
            !matches!(
                FieldPath::parse(key),
                Ok(Some(FieldPath::Channel { index: i, .. })) if i == index
            )
        });
        self.fields.len() != before
    }

    pub fn clear_channels(&mut self) {
        self.fields.retain(|key, _| {
            !matches!(FieldPath::parse(key), Ok(Some(FieldPath::Channel { .. })))
        });
    }

    /// Replace all channel rows with the suggested ones.
    pub fn apply_suggestion(&mut self, suggestion: &ChannelSuggestion) {
        self.clear_channels();
        for (index, suggested) in suggestion.channels.iter().enumerate() {
            self.fields.set(
                FieldPath::channel(index, ChannelField::Channel).to_string(),
                suggested.channel.to_string(),
            );
            self.fields.set(
                FieldPath::channel(index, ChannelField::Label).to_string(),
                suggested.label.clone(),
            );
        }
    }

    /// Encode the current fields into a device.
    pub fn submit(&self) -> Result<Device, CoreError> {
        form::encode(&self.fields)
    }

    /// Back to a blank editor with no target.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
