/// Audio-related types
use crate::error::{NeuroError, Result};
use serde::{Deserialize, Serialize};

/// Sample rate in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Common sample rates
    pub const CD_QUALITY: Self = Self(44_100);
    pub const DVD_QUALITY: Self = Self(48_000);
    pub const HIGH_RES_88: Self = Self(88_200);
    pub const HIGH_RES_96: Self = Self(96_000);

    /// Create a new sample rate
    #[must_use]
    pub fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// Get the sample rate as Hz
    pub fn as_hz(&self) -> u32 {
        self.0
    }

    /// Get the sample rate as a float, for coefficient math
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

/// Check the stereo caller contract and return the shared channel length.
///
/// Mismatched or empty channels fail fast; nothing is truncated.
pub fn validate_stereo(left: &[f32], right: &[f32]) -> Result<usize> {
    if left.len() != right.len() {
        return Err(NeuroError::ChannelLengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.is_empty() {
        return Err(NeuroError::EmptyBuffer);
    }
    Ok(left.len())
}

/// Two same-length channels of normalized `f32` samples plus their sample rate.
///
/// Samples are stored planar (one `Vec` per channel) because every stage of the
/// mastering chain walks a single channel at a time. The length invariant is
/// enforced at construction and cannot be broken through the public API.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBuffer {
    left: Vec<f32>,
    right: Vec<f32>,
    sample_rate: SampleRate,
}

impl StereoBuffer {
    /// Create a stereo buffer from two channels
    ///
    /// # Errors
    /// Returns an error if the channels differ in length, are empty, or the
    /// sample rate is zero.
    pub fn new(left: Vec<f32>, right: Vec<f32>, sample_rate: SampleRate) -> Result<Self> {
        if sample_rate.as_hz() == 0 {
            return Err(NeuroError::InvalidSampleRate(0));
        }
        validate_stereo(&left, &right)?;
        Ok(Self {
            left,
            right,
            sample_rate,
        })
    }

    /// Create a stereo buffer from mono samples (identical left/right)
    pub fn from_mono(samples: Vec<f32>, sample_rate: SampleRate) -> Result<Self> {
        let right = samples.clone();
        Self::new(samples, right, sample_rate)
    }

    /// Create a stereo buffer from interleaved samples
    ///
    /// Channel 0 becomes left and channel 1 becomes right. Mono input is
    /// duplicated; channels beyond the second are ignored.
    pub fn from_interleaved(
        samples: &[f32],
        channels: u16,
        sample_rate: SampleRate,
    ) -> Result<Self> {
        if channels == 0 {
            return Err(NeuroError::invalid_input("channel count must be at least 1"));
        }
        let channels = usize::from(channels);
        if samples.len() % channels != 0 {
            return Err(NeuroError::invalid_input(format!(
                "sample count {} is not divisible by channel count {}",
                samples.len(),
                channels
            )));
        }

        if channels == 1 {
            return Self::from_mono(samples.to_vec(), sample_rate);
        }

        let frames = samples.len() / channels;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for frame in samples.chunks_exact(channels) {
            left.push(frame[0]);
            right.push(frame[1]);
        }
        Self::new(left, right, sample_rate)
    }

    /// Interleave back into L, R, L, R, ...
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.left.len() * 2);
        for (&l, &r) in self.left.iter().zip(self.right.iter()) {
            out.push(l);
            out.push(r);
        }
        out
    }

    /// Left channel samples
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel samples
    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Both channels, mutably. Lengths stay fixed because slices cannot grow.
    pub fn channels_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.left, &mut self.right)
    }

    /// Consume the buffer and return `(left, right)`
    pub fn into_channels(self) -> (Vec<f32>, Vec<f32>) {
        (self.left, self.right)
    }

    /// Sample rate of both channels
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Always false for a constructed buffer; kept for API symmetry with `Vec`
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate.as_f64()
    }

    /// Largest absolute sample value across both channels
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0_f32, |peak, s| peak.max(s.abs()))
    }
}

/// Normalize a 16-bit PCM sample to `[-1, 1)`
#[inline]
pub fn normalize_i16(sample: i16) -> f32 {
    f32::from(sample) / 32768.0
}

/// Normalize a 24-bit PCM sample (carried in an `i32`) to `[-1, 1)`
#[inline]
pub fn normalize_i24(sample: i32) -> f32 {
    sample as f32 / 8_388_608.0
}

/// Normalize a 32-bit PCM sample to `[-1, 1)`
#[inline]
pub fn normalize_i32(sample: i32) -> f32 {
    (f64::from(sample) / 2_147_483_648.0) as f32
}

/// Float samples pass through unchanged
#[inline]
pub fn normalize_f32(sample: f32) -> f32 {
    sample
}
