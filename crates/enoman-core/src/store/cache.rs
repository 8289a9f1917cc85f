// Owned registry cache.
//
// The current registry lives behind a `watch` channel as an immutable
// `Arc<Registry>`. A refresh swaps in a whole new snapshot; readers hold a
// snapshot and never see a half-applied update.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Registry;

pub struct RegistryCache {
    /// Current snapshot.
    snapshot: watch::Sender<Arc<Registry>>,

    /// Bumped on every replacement.
    version: watch::Sender<u64>,
}

impl Default for RegistryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryCache {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Registry::new()));
        let (version, _) = watch::channel(0u64);
        Self { snapshot, version }
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Registry> {
        self.snapshot.borrow().clone()
    }

    /// Number of replacements so far. `0` means never refreshed.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Swap in a freshly fetched registry.
    pub(crate) fn replace(&self, registry: Registry) {
        self.snapshot.send_replace(Arc::new(registry));
        self.version.send_modify(|v| *v += 1);
    }
}
