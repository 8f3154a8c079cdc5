use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormStoreError>;

/// Failures reported by a key-value backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },
}

#[derive(Error, Debug)]
pub enum FormStoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
