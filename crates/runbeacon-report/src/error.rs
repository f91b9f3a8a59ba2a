//! Pipeline error type.

use crate::facts::FactError;
use crate::notify::DeliveryError;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Anything that can abort one notification run.
///
/// Every variant is fatal to the attempt; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Config(#[from] runbeacon_config::ConfigError),

    #[error(transparent)]
    Facts(#[from] FactError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
