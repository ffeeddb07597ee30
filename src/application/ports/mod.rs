//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio;
pub mod storage;

// Re-export common types
pub use audio::{
    AudioDriver, AudioSubsystem, CaptureError, CaptureStream, InputDevice, StreamParams,
};
pub use storage::{SampleStore, StorageError};
