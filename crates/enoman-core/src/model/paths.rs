// ── Output file locations ──

use serde::Serialize;

pub const DEFAULT_AUTO_OUTPUT_PATH: &str = "/config/packages/enocean_auto.yaml";
pub const DEFAULT_CONFIG_OUTPUT_PATH: &str = "/config/enocean_yaml_config.yaml";
pub const DEFAULT_AUTO_BACKUP_PATH: &str = "/config/enocean_manager/backups/enocean_auto.yaml.bak";
pub const DEFAULT_CONFIG_BACKUP_PATH: &str =
    "/config/enocean_manager/backups/enocean_yaml_config.yaml.bak";

/// Where the add-on writes the Home Assistant package and its own config
/// file, and where it keeps the previous copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub auto_output_path: String,
    pub config_output_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_backup_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_backup_path: Option<String>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            auto_output_path: DEFAULT_AUTO_OUTPUT_PATH.into(),
            config_output_path: DEFAULT_CONFIG_OUTPUT_PATH.into(),
            auto_backup_path: Some(DEFAULT_AUTO_BACKUP_PATH.into()),
            config_backup_path: Some(DEFAULT_CONFIG_BACKUP_PATH.into()),
        }
    }
}
