//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading and validating `slack.yaml`.
///
/// `Unreadable` means the file could not be read at all; the remaining
/// variants mean the file was read but does not describe a usable delivery
/// target. All of them abort the run before any network activity.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file missing or not readable.
    #[error("slack report config file '{path}' is not readable: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    /// Config file did not deserialize as the expected YAML document.
    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    /// Required field absent.
    #[error("missing required field '{field}' in '{path}'")]
    MissingField { field: String, path: String },

    /// Webhook URL is not an absolute URI with a scheme and host.
    #[error("invalid webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
