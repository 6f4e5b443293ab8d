//! Neuro-Drive parallel path
//!
//! A copy of the channel is squashed by a hard-knee compressor, stripped of
//! low end, brightened with a high shelf, and mixed back under the untouched
//! signal at a fixed 22 % wet ratio.

use crate::biquad::{BiquadCoefficients, FilterState};
use crate::constants::{
    DRIVE_COMP_RATIO, DRIVE_COMP_THRESHOLD, DRIVE_HPF_HZ, DRIVE_HPF_Q, DRIVE_SHELF_GAIN_DB,
    DRIVE_SHELF_HZ, DRIVE_WET_MIX,
};

/// Hard-knee compression in place
///
/// Samples with `|x| > threshold` become
/// `sign(x) · min(1, threshold + (|x| - threshold) / ratio)`; quieter samples
/// are untouched.
pub fn hyper_compress(buffer: &mut [f32], threshold: f64, ratio: f64) {
    for sample in buffer.iter_mut() {
        let x = f64::from(*sample);
        let level = x.abs();
        if level <= threshold {
            continue;
        }
        let compressed = (threshold + (level - threshold) / ratio).min(1.0);
        *sample = compressed.copysign(x) as f32;
    }
}

/// The parallel drive path for one sample rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuroDrive {
    high_pass: BiquadCoefficients,
    shelf: Option<BiquadCoefficients>,
    wet: f64,
}

impl NeuroDrive {
    /// Build the drive filters for `sample_rate`
    ///
    /// The 12 kHz shelf is left out whenever its coefficients come out
    /// unstable, which happens below roughly 28.7 kHz.
    pub fn new(sample_rate: f64) -> Self {
        let shelf = Some(BiquadCoefficients::high_shelf(
            DRIVE_SHELF_HZ,
            sample_rate,
            DRIVE_SHELF_GAIN_DB,
        ))
        .filter(BiquadCoefficients::is_stable);
        Self {
            high_pass: BiquadCoefficients::high_pass(DRIVE_HPF_HZ, sample_rate, DRIVE_HPF_Q),
            shelf,
            wet: DRIVE_WET_MIX,
        }
    }

    /// Whether the high shelf runs at this sample rate
    pub fn has_shelf(&self) -> bool {
        self.shelf.is_some()
    }

    /// Wet share of the output mix
    pub fn wet_mix(&self) -> f64 {
        self.wet
    }

    /// Blend the processed copy into `buffer` in place
    pub fn apply(&self, buffer: &mut [f32]) {
        // The copy is taken before the input is touched
        let mut wet_path = buffer.to_vec();
        hyper_compress(&mut wet_path, DRIVE_COMP_THRESHOLD, DRIVE_COMP_RATIO);
        self.high_pass.apply(&mut wet_path, &mut FilterState::default());
        if let Some(shelf) = &self.shelf {
            shelf.apply(&mut wet_path, &mut FilterState::default());
        }

        let dry = 1.0 - self.wet;
        for (sample, &processed) in buffer.iter_mut().zip(&wet_path) {
            *sample = (f64::from(*sample) * dry + f64::from(processed) * self.wet) as f32;
        }
    }
}
