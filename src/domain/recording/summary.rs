//! Level summary of a finished recording

use std::fmt;
use std::time::Duration;

/// Peak and RMS level of a block of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSummary {
    pub samples: usize,
    pub duration: Duration,
    pub peak: f32,
    pub rms: f32,
}

impl SignalSummary {
    /// Summarise interleaved samples recorded at `sample_rate` with `channels`
    pub fn from_samples(samples: &[f32], sample_rate: u32, channels: u16) -> Self {
        let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        let rms = if samples.is_empty() {
            0.0
        } else {
            let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
            (sum_sq / samples.len() as f64).sqrt() as f32
        };

        let frames = samples.len() / channels.max(1) as usize;
        let duration = if sample_rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(frames as f64 / sample_rate as f64)
        };

        Self {
            samples: samples.len(),
            duration,
            peak,
            rms,
        }
    }

    /// Peak level in dBFS; negative infinity for silence
    pub fn peak_dbfs(&self) -> f32 {
        20.0 * self.peak.log10()
    }

    pub fn is_silent(&self) -> bool {
        self.peak == 0.0
    }
}

impl fmt::Display for SignalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, {:.2}s, peak {:.3} ({:.1} dBFS), rms {:.3}",
            self.samples,
            self.duration.as_secs_f64(),
            self.peak,
            self.peak_dbfs(),
            self.rms
        )
    }
}
