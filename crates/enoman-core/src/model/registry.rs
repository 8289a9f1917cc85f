// ── Registry snapshot ──

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use super::device::Device;
use super::key::DeviceKey;

/// The full `key -> Device` mapping as last fetched from the add-on.
///
/// Immutable once built. Keeps the store's order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Registry {
    devices: IndexMap<DeviceKey, Arc<Device>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, key: &DeviceKey) -> Option<&Arc<Device>> {
        self.devices.get(key)
    }

    pub fn contains(&self, key: &DeviceKey) -> bool {
        self.devices.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &DeviceKey> {
        self.devices.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DeviceKey, &Arc<Device>)> {
        self.devices.iter()
    }
}

impl FromIterator<(DeviceKey, Device)> for Registry {
    fn from_iter<I: IntoIterator<Item = (DeviceKey, Device)>>(iter: I) -> Self {
        Self {
            devices: iter
                .into_iter()
                .map(|(key, device)| (key, Arc::new(device)))
                .collect(),
        }
    }
}
