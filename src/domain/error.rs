//! Domain error types

use thiserror::Error;

/// Error when the recording buffer cannot be allocated
#[derive(Debug, Clone, Error)]
#[error("Could not allocate record array ({samples} samples)")]
pub struct AllocationError {
    pub samples: usize,
}

/// Error when the recording buffer is reclaimed while a stream still holds it
#[derive(Debug, Clone, Error)]
#[error("Recording buffer is still shared with the audio stream ({holders} other handle(s))")]
pub struct HandoffError {
    pub holders: usize,
}
