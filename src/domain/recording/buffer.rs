//! Fixed-capacity recording buffer filled from audio deliveries

use crate::domain::error::AllocationError;

/// Answer given back to the audio driver after each delivery.
///
/// The buffer never asks for the stream to stop; the session closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Keep invoking the callback
    Continue,
}

/// Pre-zeroed sample area plus a frame cursor.
///
/// The sample vector is sized once at construction and never grows, so
/// [`RecordingBuffer::deliver`] is safe to call from a real-time thread: it
/// does not allocate, block or touch I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingBuffer {
    samples: Vec<f32>,
    channels: usize,
    capacity: usize,
    cursor: usize,
}

impl RecordingBuffer {
    /// Allocate a zeroed buffer for `capacity` frames of `channels` samples.
    ///
    /// Allocation failure is reported instead of aborting the process.
    pub fn try_new(capacity: usize, channels: u16) -> Result<Self, AllocationError> {
        let channels = channels.max(1) as usize;
        let len = capacity
            .checked_mul(channels)
            .ok_or(AllocationError { samples: usize::MAX })?;

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(len)
            .map_err(|_| AllocationError { samples: len })?;
        samples.resize(len, 0.0);

        Ok(Self {
            samples,
            channels,
            capacity,
            cursor: 0,
        })
    }

    /// Record one delivery.
    ///
    /// Writes `min(frame_count, remaining)` frames at the cursor: copied from
    /// `input` when present, zeros when the driver had no input. Frames past
    /// capacity are dropped. A short `input` slice is zero-padded up to the
    /// clamped length so the cursor always advances by the clamped count.
    pub fn deliver(&mut self, input: Option<&[f32]>, frame_count: usize) -> Continuation {
        let frames = frame_count.min(self.remaining());
        let start = self.cursor * self.channels;
        let end = start + frames * self.channels;
        let dest = &mut self.samples[start..end];

        match input {
            Some(input) => {
                let copied = input.len().min(dest.len());
                dest[..copied].copy_from_slice(&input[..copied]);
                dest[copied..].fill(0.0);
            }
            None => dest.fill(0.0),
        }

        self.cursor += frames;
        Continuation::Continue
    }

    /// Total frames the buffer holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames written so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Frames still free
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.cursor)
    }

    pub fn is_full(&self) -> bool {
        self.cursor >= self.capacity
    }

    pub fn channels(&self) -> u16 {
        self.channels as u16
    }

    /// All samples, including the zeroed tail past the cursor
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(capacity: usize) -> RecordingBuffer {
        RecordingBuffer::try_new(capacity, 1).unwrap()
    }

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = buffer(8);
        assert_eq!(buf.samples(), &[0.0; 8]);
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.remaining(), 8);
        assert!(!buf.is_full());
    }

    #[test]
    fn delivery_within_capacity_copies_input() {
        let mut buf = buffer(8);
        buf.deliver(Some(&[0.5, -0.5, 0.25]), 3);
        assert_eq!(buf.cursor(), 3);
        assert_eq!(&buf.samples()[..3], &[0.5, -0.5, 0.25]);
        assert_eq!(&buf.samples()[3..], &[0.0; 5]);
    }

    #[test]
    fn delivery_past_capacity_is_clamped() {
        let mut buf = buffer(4);
        buf.deliver(Some(&[1.0; 3]), 3);
        buf.deliver(Some(&[2.0; 3]), 3);
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.samples(), &[1.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn full_buffer_ignores_further_deliveries() {
        let mut buf = buffer(2);
        buf.deliver(Some(&[7.0, 7.0]), 2);
        let before = buf.clone();

        let signal = buf.deliver(Some(&[9.0; 4]), 4);
        assert_eq!(signal, Continuation::Continue);
        assert_eq!(buf, before);

        buf.deliver(None, 4);
        assert_eq!(buf, before);
    }

    #[test]
    fn always_asks_to_continue() {
        let mut buf = buffer(1);
        assert_eq!(buf.deliver(Some(&[1.0]), 1), Continuation::Continue);
        assert_eq!(buf.deliver(None, 1), Continuation::Continue);
    }

    #[test]
    fn ones_fill_capacity_ten() {
        let mut buf = buffer(10);
        for _ in 0..3 {
            buf.deliver(Some(&[1.0; 4]), 4);
        }
        assert_eq!(buf.samples(), &[1.0; 10]);
        assert_eq!(buf.cursor(), 10);
    }

    #[test]
    fn oversize_delivery_drops_extra_frames() {
        let mut buf = buffer(5);
        buf.deliver(Some(&[2.0; 8]), 8);
        assert_eq!(buf.samples(), &[2.0; 5]);
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn silence_then_input() {
        let mut buf = buffer(6);
        buf.deliver(None, 3);
        buf.deliver(Some(&[3.0; 3]), 3);
        assert_eq!(buf.samples(), &[0.0, 0.0, 0.0, 3.0, 3.0, 3.0]);
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn silence_overwrites_nothing_but_its_span() {
        let mut buf = buffer(4);
        buf.deliver(Some(&[5.0]), 1);
        buf.deliver(None, 2);
        buf.deliver(Some(&[6.0]), 1);
        assert_eq!(buf.samples(), &[5.0, 0.0, 0.0, 6.0]);
    }

    #[test]
    fn short_input_is_zero_padded() {
        let mut buf = buffer(4);
        buf.deliver(Some(&[4.0]), 3);
        assert_eq!(buf.cursor(), 3);
        assert_eq!(buf.samples(), &[4.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_frame_delivery_is_noop() {
        let mut buf = buffer(3);
        buf.deliver(Some(&[]), 0);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn interleaved_channels_advance_by_frames() {
        let mut buf = RecordingBuffer::try_new(3, 2).unwrap();
        buf.deliver(Some(&[1.0, -1.0, 2.0, -2.0]), 2);
        assert_eq!(buf.cursor(), 2);
        buf.deliver(Some(&[3.0, -3.0, 4.0, -4.0]), 2);
        assert_eq!(buf.cursor(), 3);
        assert_eq!(buf.samples(), &[1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn cursor_never_decreases() {
        let mut buf = buffer(16);
        let mut last = 0;
        for n in [0, 5, 1, 7, 9, 3] {
            buf.deliver(None, n);
            assert!(buf.cursor() >= last);
            assert!(buf.cursor() <= buf.capacity());
            last = buf.cursor();
        }
    }

    #[test]
    fn oversized_allocation_is_reported() {
        let err = RecordingBuffer::try_new(usize::MAX, 2).unwrap_err();
        assert_eq!(err.samples, usize::MAX);
    }
}
