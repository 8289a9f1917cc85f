// ── Registry client ──
//
// CRUD and import/export over the add-on API. Every mutation awaits its
// remote call, then refreshes the cache with a full `list()`. Failed calls
// leave the cache as it was. A mutation the add-on accepted is reported as
// a success even if the refresh after it fails; the caller then gets the
// previous snapshot.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use enoman_api::ManagerClient;
use enoman_api::types::DeviceRecord;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{Device, DeviceKey, OutputPaths, Profile, ProfileCatalog, Registry};
use crate::store::RegistryCache;
use crate::suggest::ChannelSuggestion;

/// Files written by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    pub auto_output_path: String,
    pub config_output_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub imported_count: usize,
}

pub struct RegistryClient {
    api: ManagerClient,
    cache: RegistryCache,
}

impl RegistryClient {
    /// Build a client from connection settings. No request is made.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let api = ManagerClient::new(config.url.as_str(), &config.transport())?;
        debug!(base = %api.base_url(), "registry client ready");
        Ok(Self::with_api(api))
    }

    /// Wrap an already-built API client.
    pub fn with_api(api: ManagerClient) -> Self {
        Self {
            api,
            cache: RegistryCache::new(),
        }
    }

    pub fn api(&self) -> &ManagerClient {
        &self.api
    }

    pub fn cache(&self) -> &RegistryCache {
        &self.cache
    }

    /// The last fetched registry.
    pub fn snapshot(&self) -> Arc<Registry> {
        self.cache.snapshot()
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// Fetch the whole registry and replace the cache with it.
    pub async fn list(&self) -> Result<Arc<Registry>, CoreError> {
        let resp = self.api.list_devices().await?;
        let registry: Registry = resp
            .devices
            .into_iter()
            .map(|(key, record)| (DeviceKey::new(key), Device::from(record)))
            .collect();
        let count = registry.len();
        self.cache.replace(registry);
        info!(count, version = self.cache.version(), "registry refreshed");
        Ok(self.cache.snapshot())
    }

    /// Fetch one device. Any non-success answer is reported as `NotFound`.
    pub async fn get(&self, key: &DeviceKey) -> Result<Device, CoreError> {
        match self.api.get_device(key.as_str()).await {
            Ok(record) => Ok(Device::from(record)),
            Err(enoman_api::Error::Api { status, .. }) => {
                debug!(%key, status, "device lookup failed");
                Err(CoreError::NotFound {
                    key: key.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Validate, save (create or overwrite by `id_hex`), then refresh.
    pub async fn upsert(&self, device: &Device) -> Result<Arc<Registry>, CoreError> {
        device.validate()?;
        self.api
            .upsert_device(&DeviceRecord::from(device))
            .await
            .map_err(|e| CoreError::remote("save", e))?;
        info!(key = %device.key(), "device saved");
        Ok(self.refresh("save").await)
    }

    /// Delete a device, then refresh. Deleting an absent key succeeds.
    pub async fn delete(&self, key: &DeviceKey) -> Result<Arc<Registry>, CoreError> {
        match self.api.delete_device(key.as_str()).await {
            Ok(()) => info!(%key, "device deleted"),
            Err(e) if e.is_not_found() => debug!(%key, "device already absent"),
            Err(e) => return Err(CoreError::remote("delete", e)),
        }
        Ok(self.refresh("delete").await)
    }

    /// Re-fetch after a persisted mutation. A failure is logged and the
    /// cached snapshot returned.
    async fn refresh(&self, operation: &str) -> Arc<Registry> {
        match self.list().await {
            Ok(registry) => registry,
            Err(e) => {
                warn!(operation, error = %e, "registry refresh failed, keeping previous snapshot");
                self.cache.snapshot()
            }
        }
    }

    // ── Import / export ──────────────────────────────────────────────

    /// Ask the add-on to write both YAML files.
    pub async fn export_all(&self) -> Result<ExportOutcome, CoreError> {
        let resp = self
            .api
            .export()
            .await
            .map_err(|e| CoreError::remote("export", e))?;
        if !resp.ok {
            return Err(rejected("export"));
        }
        let defaults = OutputPaths::default();
        let outcome = ExportOutcome {
            auto_output_path: resp.auto_output.unwrap_or(defaults.auto_output_path),
            config_output_path: resp.config_output.unwrap_or(defaults.config_output_path),
        };
        info!(
            auto = %outcome.auto_output_path,
            config = %outcome.config_output_path,
            "registry exported"
        );
        Ok(outcome)
    }

    /// Ask the add-on to rebuild its registry from the YAML files, then
    /// refresh the cache from it.
    pub async fn import_all(&self) -> Result<ImportOutcome, CoreError> {
        let resp = self
            .api
            .import()
            .await
            .map_err(|e| CoreError::remote("import", e))?;
        if !resp.ok {
            return Err(rejected("import"));
        }
        let registry = self.refresh("import").await;
        let imported_count = resp
            .imported
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(registry.len());
        info!(imported_count, "registry imported");
        Ok(ImportOutcome { imported_count })
    }

    // ── Display-only lookups ─────────────────────────────────────────

    /// Output file locations. Falls back to the add-on defaults on any
    /// failure.
    pub async fn paths(&self) -> OutputPaths {
        match self.api.paths().await {
            Ok(resp) => resp.into(),
            Err(e) => {
                warn!(error = %e, "could not fetch output paths, using defaults");
                OutputPaths::default()
            }
        }
    }

    /// The add-on's EEP catalog. Empty on any failure.
    pub async fn profiles(&self) -> ProfileCatalog {
        match self.api.list_profiles().await {
            Ok(resp) => resp.profiles.into_iter().map(Profile::from).collect(),
            Err(e) => {
                warn!(error = %e, "could not fetch EEP profiles");
                ProfileCatalog::default()
            }
        }
    }

    /// Channel suggestion computed by the add-on itself.
    pub async fn suggest_channels_remote(&self, eep: &str) -> Result<ChannelSuggestion, CoreError> {
        let resp = self.api.suggest_channels(eep).await?;
        let suggestion =
            ChannelSuggestion::from_numbers(resp.eep.unwrap_or_else(|| eep.to_owned()), resp.channels);
        info!(eep, count = suggestion.len(), "remote channel suggestion");
        Ok(suggestion)
    }
}

fn rejected(operation: &str) -> CoreError {
    CoreError::RemoteFailure {
        operation: operation.to_owned(),
        status: None,
        detail: "the add-on reported ok: false".into(),
    }
}
