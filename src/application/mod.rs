//! Application layer - Use cases and port interfaces
//!
//! Contains the recording session use case and the trait definitions
//! for the audio library and sample storage.

pub mod ports;
pub mod record;

// Re-export use cases
pub use record::{
    capture, CaptureOutcome, ProgressCallback, RecordCallbacks, RecordError, RecordOutput, RecordUseCase,
};
