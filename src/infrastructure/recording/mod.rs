//! Recording infrastructure module
//!
//! Captures from the default input device through cpal.

mod cpal_backend;

pub use cpal_backend::{CpalDevice, CpalDriver, CpalStream, CpalSubsystem};

/// Create the audio driver for the current platform
pub fn create_driver() -> CpalDriver {
    CpalDriver::new()
}
