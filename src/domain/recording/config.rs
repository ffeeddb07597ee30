//! Compile-time recording constants

use std::time::Duration;

/// Capture sample rate in Hz
pub const SAMPLE_RATE: u32 = 58_000;

/// Frames requested per audio delivery
pub const FRAMES_PER_BUFFER: u32 = 512;

/// Recording length in milliseconds (4.5 seconds)
pub const DURATION_MS: u64 = 4_500;

/// Number of interleaved channels (mono)
pub const NUM_CHANNELS: u16 = 1;

/// File the recording is written to, relative to the working directory
pub const OUTPUT_PATH: &str = "recorded.raw";

/// Interval at which the session checks whether the stream is still active
pub const POLL_INTERVAL_MS: u64 = 1_000;

/// Shape of one recording session.
///
/// The binary always runs with [`RecordingConfig::DEFAULT`]; other values
/// exist so the session driver can be exercised with small buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingConfig {
    pub sample_rate: u32,
    pub frames_per_buffer: u32,
    pub duration_ms: u64,
    pub channels: u16,
    pub poll_interval_ms: u64,
}

impl RecordingConfig {
    /// The constants above, bundled
    pub const DEFAULT: Self = Self {
        sample_rate: SAMPLE_RATE,
        frames_per_buffer: FRAMES_PER_BUFFER,
        duration_ms: DURATION_MS,
        channels: NUM_CHANNELS,
        poll_interval_ms: POLL_INTERVAL_MS,
    };

    /// Number of frames the recording buffer holds.
    ///
    /// `sample_rate * duration`, truncated toward zero.
    pub const fn capacity_frames(&self) -> usize {
        (self.sample_rate as u64 * self.duration_ms / 1000) as usize
    }

    /// Number of `f32` samples the recording buffer holds
    pub const fn capacity_samples(&self) -> usize {
        self.capacity_frames() * self.channels as usize
    }

    /// Size of the output file in bytes
    pub const fn output_bytes(&self) -> u64 {
        (self.capacity_samples() * std::mem::size_of::<f32>()) as u64
    }

    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
