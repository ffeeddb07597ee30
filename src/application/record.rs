//! Record-to-file use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::error::{AllocationError, HandoffError};
use crate::domain::recording::{RecordingBuffer, RecordingConfig, SharedRecording, SignalSummary};
use crate::domain::session::{InvalidStateTransition, RecordingSession};

use super::ports::{
    AudioDriver, AudioSubsystem, CaptureError, CaptureStream, InputDevice, SampleStore,
    StorageError, StreamParams,
};

/// Errors from the record use case. All of them end the session.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Handoff(#[from] HandoffError),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidStateTransition),

    #[error("Recording task failed: {0}")]
    TaskFailed(String),
}

/// Progress callback type for reporting recording progress.
/// Parameters: (elapsed_ms, total_ms)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct RecordCallbacks {
    /// Called at every poll of the running stream with (elapsed_ms, total_ms)
    pub on_progress: Option<ProgressCallback>,
    /// Called once the stream has started
    pub on_recording_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called once the stream is closed and the subsystem torn down
    pub on_recording_end: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called after the samples are on disk, with the file location
    pub on_saved: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

/// Result of the capture phase
#[derive(Debug)]
pub struct CaptureOutcome {
    /// The reclaimed buffer, zero tail included
    pub buffer: RecordingBuffer,
    /// Whether the stream was stopped before the buffer filled
    pub stopped_early: bool,
    /// Deliveries the callback had to skip
    pub missed_deliveries: u64,
}

/// Output from the record use case
#[derive(Debug, Clone)]
pub struct RecordOutput {
    /// Where the samples were written
    pub location: String,
    /// Bytes written
    pub bytes_written: u64,
    /// Frames that came from the device before the stream stopped
    pub frames_captured: usize,
    /// Level summary of the saved samples
    pub summary: SignalSummary,
    pub stopped_early: bool,
    pub missed_deliveries: u64,
}

/// Run one capture session against `driver`.
///
/// Walks the session state machine from initialization to teardown, polling
/// the stream every `config.poll_interval()` until it goes inactive or `stop`
/// is raised. The subsystem is terminated on every path once it has been
/// initialized. Blocks the calling thread for the whole recording.
pub fn capture<D: AudioDriver>(
    driver: &D,
    config: &RecordingConfig,
    stop: &AtomicBool,
    callbacks: &RecordCallbacks,
) -> Result<CaptureOutcome, RecordError> {
    let buffer = RecordingBuffer::try_new(config.capacity_frames(), config.channels)?;
    let recording = SharedRecording::new(buffer);
    let mut session = RecordingSession::new();

    let subsystem = driver.initialize()?;
    session.initialize()?;
    debug!(state = %session.state(), "audio subsystem initialized");

    let streamed = run_stream(&subsystem, &mut session, &recording, config, stop, callbacks);
    subsystem.terminate();
    let stopped_early = streamed?;

    session.finalize()?;
    debug!(state = %session.state(), "audio subsystem terminated");

    let missed_deliveries = recording.missed_deliveries();
    if missed_deliveries > 0 {
        warn!(missed_deliveries, "audio deliveries were skipped");
    }
    let buffer = recording.into_buffer()?;

    Ok(CaptureOutcome {
        buffer,
        stopped_early,
        missed_deliveries,
    })
}

/// Device selection through stream close. Returns whether the stream was
/// stopped externally.
fn run_stream<S: AudioSubsystem>(
    subsystem: &S,
    session: &mut RecordingSession,
    recording: &SharedRecording,
    config: &RecordingConfig,
    stop: &AtomicBool,
    callbacks: &RecordCallbacks,
) -> Result<bool, RecordError> {
    let device = subsystem.default_input_device()?;
    session.select_device()?;

    let params = StreamParams::from(config);
    info!(
        device = %device.name(),
        sample_rate = params.sample_rate,
        channels = params.channels,
        frames_per_buffer = params.frames_per_buffer,
        "opening input stream"
    );
    let mut stream = device.open_stream(&params, recording.clone())?;
    session.open_stream()?;

    stream.start()?;
    session.start_stream()?;
    debug!(state = %session.state(), "stream started");

    if let Some(ref cb) = callbacks.on_recording_start {
        cb();
    }

    let total_ms = config.duration_ms;
    let started = Instant::now();
    let mut stopped_early = false;
    while stream.is_active() {
        if stop.load(Ordering::SeqCst) {
            stopped_early = true;
            info!("stop requested, closing stream early");
            break;
        }
        std::thread::sleep(config.poll_interval());
        if let Some(ref progress) = callbacks.on_progress {
            let elapsed = (started.elapsed().as_millis() as u64).min(total_ms);
            progress(elapsed, total_ms);
        }
    }

    stream.close()?;
    session.close_stream()?;
    debug!(state = %session.state(), "stream closed");

    Ok(stopped_early && !recording.is_filled())
}

/// Fixed-duration recording use case
pub struct RecordUseCase<D, S>
where
    D: AudioDriver + Clone + Send + 'static,
    S: SampleStore,
{
    driver: D,
    store: S,
    config: RecordingConfig,
    stop_flag: Arc<AtomicBool>,
}

impl<D, S> RecordUseCase<D, S>
where
    D: AudioDriver + Clone + Send + 'static,
    S: SampleStore,
{
    /// Create a new use case instance
    pub fn new(driver: D, store: S, config: RecordingConfig) -> Self {
        Self {
            driver,
            store,
            config,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the stop flag for external signal handling
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Signal to stop recording early
    pub fn stop_early(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Record, then write the whole buffer to the store
    pub async fn execute(&self, callbacks: RecordCallbacks) -> Result<RecordOutput, RecordError> {
        let callbacks = Arc::new(callbacks);

        let driver = self.driver.clone();
        let config = self.config;
        let stop = Arc::clone(&self.stop_flag);
        let capture_callbacks = Arc::clone(&callbacks);

        // cpal streams are not Send, so the whole stream lifetime stays on one thread
        let outcome = tokio::task::spawn_blocking(move || {
            capture(&driver, &config, &stop, &capture_callbacks)
        })
        .await
        .map_err(|e| RecordError::TaskFailed(e.to_string()))??;

        if let Some(ref cb) = callbacks.on_recording_end {
            cb();
        }

        let frames_captured = outcome.buffer.cursor();
        let samples = outcome.buffer.into_samples();
        let bytes_written = self.store.save(&samples).await?;
        let location = self.store.location();
        let summary = SignalSummary::from_samples(&samples, config.sample_rate, config.channels);
        drop(samples);

        if let Some(ref cb) = callbacks.on_saved {
            cb(&location);
        }

        Ok(RecordOutput {
            location,
            bytes_written,
            frames_captured,
            summary,
            stopped_early: outcome.stopped_early,
            missed_deliveries: outcome.missed_deliveries,
        })
    }
}
