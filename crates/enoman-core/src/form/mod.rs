// ── Flat form representation ──
//
// An editor works on `key.path = value` string pairs. `encode` turns a
// field set into a `Device`; `decode` projects a `Device` back into one.

mod codec;
pub mod path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use codec::{decode, encode};
pub use path::{ChannelField, FieldPath, SensorField, TopField};

/// Ordered `key -> value` form state. Setting a key that is already present
/// overwrites it, so the last assignment wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(IndexMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.0.retain(|k, v| keep(k, v));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply every field of `other` on top of this set.
    pub fn overlay(&mut self, other: &FormFields) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    /// Split a `key=value` assignment. The key is trimmed; the value is kept
    /// as written.
    pub fn parse_assignment(raw: &str) -> Result<(String, String), CoreError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| CoreError::validation(raw, "expected key=value"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CoreError::validation(raw, "field name must not be empty"));
        }
        Ok((key.to_owned(), value.to_owned()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FormFields {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
