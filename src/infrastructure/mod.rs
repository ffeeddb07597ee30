//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal and the filesystem.

pub mod recording;
pub mod storage;

// Re-export adapters
pub use recording::{create_driver, CpalDriver};
pub use storage::{read_raw_samples, RawFileStore};
