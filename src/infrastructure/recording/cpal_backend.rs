//! Audio capture ports implemented over cpal
//!
//! The stream is opened with exactly the requested shape: f32 samples, the
//! configured channel count and sample rate, and a fixed buffer size. There
//! is no fallback to another configuration; a device that cannot provide it
//! fails at open time. cpal delivers float input unclipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, StreamConfig};
use tracing::{debug, warn};

use crate::application::ports::{
    AudioDriver, AudioSubsystem, CaptureError, CaptureStream, InputDevice, StreamParams,
};
use crate::domain::recording::SharedRecording;

/// Driver for the platform's default cpal host
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalDriver;

impl CpalDriver {
    pub fn new() -> Self {
        Self
    }
}

impl AudioDriver for CpalDriver {
    type Subsystem = CpalSubsystem;

    fn initialize(&self) -> Result<CpalSubsystem, CaptureError> {
        let id = cpal::default_host().id();
        let host = cpal::host_from_id(id)
            .map_err(|e| CaptureError::SubsystemUnavailable(e.to_string()))?;
        debug!(host = id.name(), "audio host ready");
        Ok(CpalSubsystem { host })
    }
}

/// An initialized cpal host
pub struct CpalSubsystem {
    host: cpal::Host,
}

impl AudioSubsystem for CpalSubsystem {
    type Device = CpalDevice;

    fn default_input_device(&self) -> Result<CpalDevice, CaptureError> {
        self.host
            .default_input_device()
            .map(|device| CpalDevice { device })
            .ok_or(CaptureError::NoInputDevice)
    }

    fn terminate(self) {
        debug!(host = self.host.id().name(), "releasing audio host");
        drop(self.host);
    }
}

/// A cpal input device
pub struct CpalDevice {
    device: cpal::Device,
}

impl CpalDevice {
    fn stream_config(params: &StreamParams) -> StreamConfig {
        StreamConfig {
            channels: params.channels,
            sample_rate: SampleRate(params.sample_rate),
            buffer_size: BufferSize::Fixed(params.frames_per_buffer),
        }
    }
}

impl InputDevice for CpalDevice {
    type Stream = CpalStream;

    fn name(&self) -> String {
        self.device
            .name()
            .unwrap_or_else(|_| "unknown device".to_string())
    }

    fn open_stream(
        &self,
        params: &StreamParams,
        recording: SharedRecording,
    ) -> Result<CpalStream, CaptureError> {
        let config = Self::stream_config(params);
        let channels = params.channels.max(1) as usize;

        let failed = Arc::new(AtomicBool::new(false));
        let last_error: Arc<StdMutex<Option<String>>> = Arc::new(StdMutex::new(None));

        let sink = recording.clone();
        let failed_clone = Arc::clone(&failed);
        let last_error_clone = Arc::clone(&last_error);

        let stream = self
            .device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    sink.deliver(Some(data), data.len() / channels);
                },
                move |err| {
                    warn!(%err, "audio stream error");
                    if let Ok(mut slot) = last_error_clone.lock() {
                        slot.get_or_insert_with(|| err.to_string());
                    }
                    failed_clone.store(true, Ordering::SeqCst);
                },
                None,
            )
            .map_err(|e| CaptureError::OpenFailed(e.to_string()))?;

        Ok(CpalStream {
            stream,
            recording,
            started: false,
            failed,
            last_error,
        })
    }
}

/// A cpal input stream feeding a [`SharedRecording`]
pub struct CpalStream {
    stream: cpal::Stream,
    recording: SharedRecording,
    started: bool,
    failed: Arc<AtomicBool>,
    last_error: Arc<StdMutex<Option<String>>>,
}

impl CaptureStream for CpalStream {
    fn start(&mut self) -> Result<(), CaptureError> {
        self.stream
            .play()
            .map_err(|e| CaptureError::StartFailed(e.to_string()))?;
        self.started = true;
        Ok(())
    }

    /// Active until the buffer fills or the stream reports an error
    fn is_active(&self) -> bool {
        self.started && !self.recording.is_filled() && !self.failed.load(Ordering::SeqCst)
    }

    fn close(self) -> Result<(), CaptureError> {
        let CpalStream {
            stream,
            recording,
            failed,
            last_error,
            ..
        } = self;

        // Dropping the stream joins the callback thread and releases the closure
        drop(stream);
        drop(recording);

        if failed.load(Ordering::SeqCst) {
            let message = last_error
                .lock()
                .ok()
                .and_then(|mut slot| slot.take())
                .unwrap_or_else(|| "unknown stream error".to_string());
            return Err(CaptureError::Stream(message));
        }
        Ok(())
    }
}
