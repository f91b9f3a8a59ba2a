//! Configuration types mapping to the `slack.yaml` schema.
//!
//! ```yaml
//! slack_url: https://hooks.slack.com/services/T0000/B0000/XXXX
//! slack_channel: "#ops"
//! slack_botname: puppet
//! slack_iconurl: https://example.com/puppet.png
//! slack_puppetboard_url: https://puppetboard.example.com/node/:fqdn
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};

/// Raw deserialization target for `slack.yaml`.
///
/// Every field is optional here so that validation can distinguish a missing
/// `slack_url` from a file that does not parse at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawConfig {
    pub slack_url: Option<String>,
    pub slack_channel: Option<String>,
    pub slack_botname: Option<String>,
    pub slack_iconurl: Option<String>,
    pub slack_puppetboard_url: Option<String>,
}

/// Validated delivery configuration, immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Webhook endpoint. Guaranteed absolute with a scheme and host.
    pub webhook_url: Url,
    /// Target channel override.
    pub channel: Option<String>,
    /// Display name for the posted message.
    pub botname: Option<String>,
    /// Display icon for the posted message.
    pub icon_url: Option<String>,
    /// Dashboard URL template; every `:fqdn` token is replaced with the
    /// node's host name when composing the headline link.
    pub puppetboard_url: Option<String>,
}

impl DeliveryConfig {
    pub(crate) fn from_raw(raw: RawConfig, path: &Path) -> Result<Self> {
        let slack_url = raw.slack_url.ok_or_else(|| ConfigError::MissingField {
            field: "slack_url".to_string(),
            path: path.display().to_string(),
        })?;

        let webhook_url = Url::parse(&slack_url).map_err(|e| ConfigError::InvalidUrl {
            url: slack_url.clone(),
            reason: e.to_string(),
        })?;
        if webhook_url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl {
                url: slack_url,
                reason: "URL has no host".to_string(),
            });
        }

        Ok(Self {
            webhook_url,
            channel: raw.slack_channel,
            botname: raw.slack_botname,
            icon_url: raw.slack_iconurl,
            puppetboard_url: raw.slack_puppetboard_url,
        })
    }
}
