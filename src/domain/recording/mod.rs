//! Recording buffer, its real-time handoff and the fixed recording shape

pub mod buffer;
pub mod config;
pub mod shared;
pub mod summary;

pub use buffer::{Continuation, RecordingBuffer};
pub use config::RecordingConfig;
pub use shared::SharedRecording;
pub use summary::SignalSummary;
