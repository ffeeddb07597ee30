//! Handoff of the recording buffer between the audio thread and the session
//!
//! While a stream is running, the only writer is the driver's callback thread.
//! It takes the lock with `try_lock`, so it never waits. A delivery that finds
//! the lock taken is counted as missed and its frames are owed as silence:
//! the next delivery that gets the lock (or the reclaim) zero-fills them
//! first, so later samples keep their positions. Completion is published
//! through an atomic flag so the session can poll it without touching the
//! lock.
//!
//! The session gets the buffer back with [`SharedRecording::into_buffer`],
//! which only succeeds once every other handle is gone. Stream handles own
//! the callback closure, and the closure owns the other handle, so closing
//! the stream is what releases the buffer.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use super::buffer::{Continuation, RecordingBuffer};
use crate::domain::error::HandoffError;

#[derive(Debug)]
struct Inner {
    buffer: Mutex<RecordingBuffer>,
    filled: AtomicBool,
    missed: AtomicU64,
    skipped_frames: AtomicUsize,
}

impl Inner {
    fn settle_skipped(&self, buffer: &mut RecordingBuffer) {
        let skipped = self.skipped_frames.swap(0, Ordering::Relaxed);
        if skipped > 0 {
            buffer.deliver(None, skipped);
        }
    }
}

/// Cloneable handle to a [`RecordingBuffer`] shared with an audio callback
#[derive(Debug, Clone)]
pub struct SharedRecording {
    inner: Arc<Inner>,
}

impl SharedRecording {
    pub fn new(buffer: RecordingBuffer) -> Self {
        let filled = buffer.is_full();
        Self {
            inner: Arc::new(Inner {
                buffer: Mutex::new(buffer),
                filled: AtomicBool::new(filled),
                missed: AtomicU64::new(0),
                skipped_frames: AtomicUsize::new(0),
            }),
        }
    }

    /// Forward one delivery to the buffer without blocking
    pub fn deliver(&self, input: Option<&[f32]>, frame_count: usize) -> Continuation {
        let mut buffer = match self.inner.buffer.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                self.inner.missed.fetch_add(1, Ordering::Relaxed);
                self.inner
                    .skipped_frames
                    .fetch_add(frame_count, Ordering::Relaxed);
                return Continuation::Continue;
            }
        };

        self.inner.settle_skipped(&mut buffer);
        let signal = buffer.deliver(input, frame_count);
        if buffer.is_full() {
            self.inner.filled.store(true, Ordering::Release);
        }
        signal
    }

    /// Whether the cursor has reached capacity
    pub fn is_filled(&self) -> bool {
        self.inner.filled.load(Ordering::Acquire)
    }

    /// Deliveries skipped because the lock was held elsewhere
    pub fn missed_deliveries(&self) -> u64 {
        self.inner.missed.load(Ordering::Relaxed)
    }

    /// Take the buffer back once no other handle exists
    pub fn into_buffer(self) -> Result<RecordingBuffer, HandoffError> {
        let inner = Arc::try_unwrap(self.inner).map_err(|inner| HandoffError {
            holders: Arc::strong_count(&inner) - 1,
        })?;
        {
            let mut guard = inner.buffer.lock().unwrap_or_else(PoisonError::into_inner);
            inner.settle_skipped(&mut guard);
        }
        let buffer = inner
            .buffer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(capacity: usize) -> SharedRecording {
        SharedRecording::new(RecordingBuffer::try_new(capacity, 1).unwrap())
    }

    #[test]
    fn deliveries_reach_the_buffer() {
        let recording = shared(4);
        recording.deliver(Some(&[1.0, 2.0]), 2);
        let buffer = recording.into_buffer().unwrap();
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.samples(), &[1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn filled_flag_rises_at_capacity() {
        let recording = shared(3);
        recording.deliver(None, 2);
        assert!(!recording.is_filled());
        recording.deliver(None, 2);
        assert!(recording.is_filled());
    }

    #[test]
    fn zero_capacity_starts_filled() {
        assert!(shared(0).is_filled());
    }

    #[test]
    fn reclaim_fails_while_callback_holds_a_handle() {
        let recording = shared(2);
        let callback_side = recording.clone();

        let err = recording.into_buffer().unwrap_err();
        assert_eq!(err.holders, 1);

        // the surviving handle can still reclaim
        assert!(callback_side.into_buffer().is_ok());
    }

    #[test]
    fn reclaim_succeeds_after_other_handle_dropped() {
        let recording = shared(2);
        let callback_side = recording.clone();
        callback_side.deliver(Some(&[0.5, 0.5]), 2);
        drop(callback_side);

        let buffer = recording.into_buffer().unwrap();
        assert!(buffer.is_full());
    }

    #[test]
    fn contended_delivery_is_counted_as_missed() {
        let recording = shared(4);
        let guard = recording.inner.buffer.lock().unwrap();
        let signal = recording.deliver(Some(&[1.0]), 1);
        drop(guard);

        assert_eq!(signal, Continuation::Continue);
        assert_eq!(recording.missed_deliveries(), 1);
        assert_eq!(recording.into_buffer().unwrap().cursor(), 1);
    }

    #[test]
    fn skipped_frames_become_silence_before_the_next_delivery() {
        let recording = shared(6);
        let guard = recording.inner.buffer.lock().unwrap();
        recording.deliver(Some(&[9.0, 9.0]), 2);
        drop(guard);

        recording.deliver(Some(&[1.0, 2.0]), 2);
        let buffer = recording.into_buffer().unwrap();
        assert_eq!(buffer.cursor(), 4);
        assert_eq!(buffer.samples(), &[0.0, 0.0, 1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn skipped_frames_stay_clamped_to_capacity() {
        let recording = shared(3);
        let guard = recording.inner.buffer.lock().unwrap();
        recording.deliver(Some(&[1.0; 5]), 5);
        drop(guard);

        assert!(!recording.is_filled());
        let buffer = recording.into_buffer().unwrap();
        assert!(buffer.is_full());
        assert_eq!(buffer.samples(), &[0.0; 3]);
    }

    #[test]
    fn deliveries_from_another_thread() {
        let recording = shared(1024);
        let callback_side = recording.clone();
        let worker = std::thread::spawn(move || {
            for _ in 0..4 {
                callback_side.deliver(Some(&[0.25; 512]), 512);
            }
        });
        worker.join().unwrap();

        assert!(recording.is_filled());
        let buffer = recording.into_buffer().unwrap();
        assert_eq!(buffer.samples(), &[0.25; 1024][..]);
    }
}
