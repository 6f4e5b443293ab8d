//! Block mean-square loudness meter
//!
//! A simplified, ungated loudness estimate: the buffer is cut into
//! non-overlapping 400 ms blocks, each full block contributes the mean of
//! `l² + r²` over its samples, and the block means are averaged. A trailing
//! partial block is discarded. Both channels carry a fixed weight of 1.0 and
//! no K-weighting filter or gating is applied; the optimizer converges on this
//! exact figure, so it must not be swapped for a BS.1770 meter.

use crate::error::{LoudnessError, Result};
use crate::{BLOCK_MS, LOUDNESS_OFFSET_DB, SILENCE_FLOOR_LUFS};

/// Per-channel power weights
const LEFT_WEIGHT: f64 = 1.0;
const RIGHT_WEIGHT: f64 = 1.0;

/// Block mean-square loudness meter for one sample rate
///
/// # Example
///
/// ```rust
/// use neuro_loudness::LoudnessMeter;
///
/// let meter = LoudnessMeter::new(48_000);
/// assert_eq!(meter.block_len(), 19_200);
///
/// let tone: Vec<f32> = (0..96_000)
///     .map(|i| (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / 48_000.0).sin())
///     .collect();
/// let lufs = meter.measure(&tone, &tone).unwrap();
/// // Mean of l² + r² for a full-scale sine is 1.0
/// assert!((lufs - (-0.691)).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoudnessMeter {
    sample_rate: u32,
    block_len: usize,
}

impl LoudnessMeter {
    /// Create a meter for the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        let block_len = (u64::from(sample_rate) * u64::from(BLOCK_MS) / 1000) as usize;
        Self {
            sample_rate,
            block_len,
        }
    }

    /// Sample rate the meter was built for
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Nominal block length in samples (400 ms)
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Measure the loudness of a stereo pair
    ///
    /// Returns [`SILENCE_FLOOR_LUFS`] when no full block exists or the mean
    /// power is not positive.
    ///
    /// # Errors
    /// Returns [`LoudnessError::ChannelLengthMismatch`] if the channels differ
    /// in length.
    pub fn measure(&self, left: &[f32], right: &[f32]) -> Result<f64> {
        if left.len() != right.len() {
            return Err(LoudnessError::ChannelLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        // A buffer shorter than 400 ms is measured as a single block
        let block = self.block_len.min(left.len());
        if block == 0 {
            return Ok(SILENCE_FLOOR_LUFS);
        }

        let mut total = 0.0_f64;
        let mut blocks = 0_usize;
        for (l_block, r_block) in left.chunks_exact(block).zip(right.chunks_exact(block)) {
            let block_sum: f64 = l_block
                .iter()
                .zip(r_block)
                .map(|(&l, &r)| {
                    let l = f64::from(l);
                    let r = f64::from(r);
                    LEFT_WEIGHT * l * l + RIGHT_WEIGHT * r * r
                })
                .sum();
            total += block_sum / block as f64;
            blocks += 1;
        }

        if blocks == 0 {
            return Ok(SILENCE_FLOOR_LUFS);
        }

        let mean = total / blocks as f64;
        if mean <= 0.0 {
            return Ok(SILENCE_FLOOR_LUFS);
        }

        Ok(LOUDNESS_OFFSET_DB + 10.0 * mean.log10())
    }
}

/// Measure the loudness of a stereo pair at `sample_rate`
///
/// Convenience wrapper around [`LoudnessMeter::measure`].
pub fn measure_loudness(left: &[f32], right: &[f32], sample_rate: u32) -> Result<f64> {
    LoudnessMeter::new(sample_rate).measure(left, right)
}
