use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpiryError>;

#[derive(Error, Debug)]
pub enum ExpiryError {
    #[error("Invalid urgency thresholds: critical={critical}, warning={warning} (need 0 < critical < warning)")]
    InvalidThresholds { critical: i64, warning: i64 },

    #[error("No active status markers configured")]
    NoActiveMarkers,

    #[error("Invalid status marker pattern: {0}")]
    InvalidMarker(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
