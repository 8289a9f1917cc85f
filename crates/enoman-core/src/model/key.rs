// ── Registry key ──

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registry key of a device, normalized the way the add-on's store
/// normalizes it: surrounding whitespace trimmed, upper-cased.
///
/// Usually the device's `id_hex`. The store files lights saved without an
/// id under `LIGHT::<LABEL>`, and those keys pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DeviceKey(String);

impl DeviceKey {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for DeviceKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DeviceKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for DeviceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DeviceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(DeviceKey::new("  ffaabbcc\n").as_str(), "FFAABBCC");
    }

    #[test]
    fn parses_infallibly() {
        let key: DeviceKey = "light::salon".parse().unwrap();
        assert_eq!(key.to_string(), "LIGHT::SALON");
    }

    #[test]
    fn deserialize_normalizes() {
        let key: DeviceKey = serde_json::from_str(r#"" 0a0b0c0d ""#).unwrap();
        assert_eq!(key, DeviceKey::new("0A0B0C0D"));
    }
}
