//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Session lifecycle states, in the only order they may occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initialized,
    DeviceSelected,
    StreamOpened,
    StreamActive,
    StreamClosed,
    Finalized,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::DeviceSelected => "device selected",
            Self::StreamOpened => "stream opened",
            Self::StreamActive => "stream active",
            Self::StreamClosed => "stream closed",
            Self::Finalized => "finalized",
        }
    }

    /// The state that follows this one, if any
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Uninitialized => Some(Self::Initialized),
            Self::Initialized => Some(Self::DeviceSelected),
            Self::DeviceSelected => Some(Self::StreamOpened),
            Self::StreamOpened => Some(Self::StreamActive),
            Self::StreamActive => Some(Self::StreamClosed),
            Self::StreamClosed => Some(Self::Finalized),
            Self::Finalized => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Recording session entity.
///
/// State machine:
///   UNINITIALIZED -> INITIALIZED (initialize)
///   INITIALIZED -> DEVICE_SELECTED (select_device)
///   DEVICE_SELECTED -> STREAM_OPENED (open_stream)
///   STREAM_OPENED -> STREAM_ACTIVE (start_stream)
///   STREAM_ACTIVE -> STREAM_CLOSED (close_stream)
///   STREAM_CLOSED -> FINALIZED (finalize)
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
}

impl RecordingSession {
    /// Create a new session in the uninitialized state
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn initialize(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(SessionState::Initialized, "initialize the audio subsystem")
    }

    pub fn select_device(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(SessionState::DeviceSelected, "select an input device")
    }

    pub fn open_stream(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(SessionState::StreamOpened, "open a stream")
    }

    pub fn start_stream(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(SessionState::StreamActive, "start the stream")
    }

    pub fn close_stream(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(SessionState::StreamClosed, "close the stream")
    }

    pub fn finalize(&mut self) -> Result<(), InvalidStateTransition> {
        self.advance(SessionState::Finalized, "finalize")
    }

    fn advance(&mut self, to: SessionState, action: &str) -> Result<(), InvalidStateTransition> {
        if self.state.next() != Some(to) {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_uninitialized() {
        let session = RecordingSession::new();
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn full_cycle() {
        let mut session = RecordingSession::new();
        session.initialize().unwrap();
        session.select_device().unwrap();
        session.open_stream().unwrap();
        session.start_stream().unwrap();
        assert_eq!(session.state(), SessionState::StreamActive);
        session.close_stream().unwrap();
        assert_eq!(session.state(), SessionState::StreamClosed);
        session.finalize().unwrap();
        assert_eq!(session.state(), SessionState::Finalized);
    }

    #[test]
    fn skipping_a_state_fails() {
        let mut session = RecordingSession::new();
        session.initialize().unwrap();

        let err = session.open_stream().unwrap_err();
        assert_eq!(err.current_state, SessionState::Initialized);
        assert!(err.action.contains("open a stream"));
        assert_eq!(session.state(), SessionState::Initialized);
    }

    #[test]
    fn repeating_a_transition_fails() {
        let mut session = RecordingSession::new();
        session.initialize().unwrap();

        let err = session.initialize().unwrap_err();
        assert_eq!(err.current_state, SessionState::Initialized);
    }

    #[test]
    fn close_before_start_fails() {
        let mut session = RecordingSession::new();
        session.initialize().unwrap();
        session.select_device().unwrap();
        session.open_stream().unwrap();

        let err = session.close_stream().unwrap_err();
        assert_eq!(err.current_state, SessionState::StreamOpened);
    }

    #[test]
    fn finalized_is_terminal() {
        let mut session = RecordingSession::new();
        session.initialize().unwrap();
        session.select_device().unwrap();
        session.open_stream().unwrap();
        session.start_stream().unwrap();
        session.close_stream().unwrap();
        session.finalize().unwrap();

        assert!(session.finalize().is_err());
        assert!(session.initialize().is_err());
        assert_eq!(SessionState::Finalized.next(), None);
    }

    #[test]
    fn states_are_ordered() {
        assert!(SessionState::Uninitialized < SessionState::StreamActive);
        assert!(SessionState::StreamClosed < SessionState::Finalized);
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(SessionState::StreamActive.to_string(), "stream active");
        assert_eq!(SessionState::Finalized.to_string(), "finalized");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: SessionState::StreamOpened,
            action: "close the stream".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("close the stream"));
        assert!(msg.contains("stream opened"));
    }
}
