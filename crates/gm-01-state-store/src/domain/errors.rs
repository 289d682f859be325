use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Corrupted value at key {key}: {reason}")]
    Corrupted { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Version not found: {version}")]
    VersionNotFound { version: u64 },
}

impl StoreError {
    /// Corruption of the value stored under a raw key.
    pub fn corrupted(key: &[u8], reason: impl ToString) -> Self {
        StoreError::Corrupted {
            key: String::from_utf8_lossy(key).into_owned(),
            reason: reason.to_string(),
        }
    }
}
