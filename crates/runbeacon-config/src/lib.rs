//! Slack delivery configuration for the runbeacon notifier.
//!
//! Configuration lives in a single `slack.yaml` file under the Puppet
//! confdir. It is read once per run, validated, and never written back.

pub mod error;
pub mod types;

use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
pub use types::DeliveryConfig;

use types::RawConfig;

/// Fixed file name within the confdir.
const CONFIG_FILE: &str = "slack.yaml";

/// Path of the config file for a given confdir.
pub fn config_path(confdir: &Path) -> PathBuf {
    confdir.join(CONFIG_FILE)
}

/// Load and validate `slack.yaml` from the given confdir.
pub fn load_config(confdir: &Path) -> Result<DeliveryConfig> {
    load_config_file(&config_path(confdir))
}

/// Load and validate a config file at an explicit path (no discovery).
pub fn load_config_file(path: &Path) -> Result<DeliveryConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        source: e,
    })?;
    let raw: RawConfig = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    DeliveryConfig::from_raw(raw, path)
}
