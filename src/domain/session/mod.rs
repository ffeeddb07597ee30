//! Recording session lifecycle

mod state;

pub use state::{InvalidStateTransition, RecordingSession, SessionState};
