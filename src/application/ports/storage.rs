//! Sample storage port

use async_trait::async_trait;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unable to open file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{path}' is {len} bytes, not a whole number of f32 samples")]
    Misaligned { path: String, len: u64 },
}

/// Port for persisting a finished recording
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Write every sample, returning the number of bytes written
    async fn save(&self, samples: &[f32]) -> Result<u64, StorageError>;

    /// Where the samples end up, for user-facing messages
    fn location(&self) -> String;
}
