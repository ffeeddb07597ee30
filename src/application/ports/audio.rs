//! Audio capture port interfaces
//!
//! The external audio library is reached through three layers: a driver
//! that brings the subsystem up, the subsystem that hands out the default
//! input device, and the stream opened on that device.

use thiserror::Error;

use crate::domain::recording::{RecordingConfig, SharedRecording};

/// Errors reported by the audio collaborator
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Audio subsystem unavailable: {0}")]
    SubsystemUnavailable(String),

    #[error("No default input device")]
    NoInputDevice,

    #[error("Failed to open stream: {0}")]
    OpenFailed(String),

    #[error("Failed to start stream: {0}")]
    StartFailed(String),

    #[error("Failed to close stream: {0}")]
    CloseFailed(String),

    #[error("Audio stream error: {0}")]
    Stream(String),
}

/// Fixed stream configuration requested from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamParams {
    pub sample_rate: u32,
    pub channels: u16,
    pub frames_per_buffer: u32,
}

impl From<&RecordingConfig> for StreamParams {
    fn from(config: &RecordingConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels,
            frames_per_buffer: config.frames_per_buffer,
        }
    }
}

/// Entry point into the audio library
pub trait AudioDriver {
    type Subsystem: AudioSubsystem;

    /// Bring the audio subsystem up
    fn initialize(&self) -> Result<Self::Subsystem, CaptureError>;
}

/// An initialized audio subsystem
pub trait AudioSubsystem {
    type Device: InputDevice;

    /// Look up the default input device
    fn default_input_device(&self) -> Result<Self::Device, CaptureError>;

    /// Release the subsystem. Called exactly once, after the stream is closed.
    fn terminate(self);
}

/// A capture device
pub trait InputDevice {
    type Stream: CaptureStream;

    /// Human-readable device name, for diagnostics
    fn name(&self) -> String;

    /// Open an input stream whose callback feeds `recording`.
    ///
    /// The stream takes ownership of the handle; it must be dropped no later
    /// than [`CaptureStream::close`] returns.
    fn open_stream(
        &self,
        params: &StreamParams,
        recording: SharedRecording,
    ) -> Result<Self::Stream, CaptureError>;
}

/// An opened capture stream
pub trait CaptureStream {
    /// Begin delivering audio to the callback
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Whether the stream is still delivering
    fn is_active(&self) -> bool;

    /// Stop and release the stream. No callback runs after this returns.
    fn close(self) -> Result<(), CaptureError>;
}
