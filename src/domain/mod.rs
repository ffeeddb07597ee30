//! Domain layer - Core recording logic
//!
//! Contains the recording buffer, the session state machine and domain errors.
//! This layer has no dependencies on external systems.

pub mod error;
pub mod recording;
pub mod session;

// Re-export common types
pub use error::*;
pub use recording::{Continuation, RecordingBuffer, RecordingConfig, SharedRecording, SignalSummary};
pub use session::{InvalidStateTransition, RecordingSession, SessionState};
