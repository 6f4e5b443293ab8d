/// Pultec-style low end
///
/// A 30 Hz high-pass clears sub-sonic rumble, then a broad 55 Hz bell adds the
/// low contour boost. Each section keeps its own delay line.
use crate::biquad::{BiquadCoefficients, FilterState};
use crate::constants::{PULTEC_HPF_HZ, PULTEC_HPF_Q, PULTEC_PEAK_HZ, PULTEC_PEAK_Q};
use neuro_core::LOW_CONTOUR_RANGE_DB;

/// Low-end EQ stage: 30 Hz high-pass into the 55 Hz contour bell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PultecLowEnd {
    high_pass: BiquadCoefficients,
    contour: BiquadCoefficients,
    contour_db: f64,
}

impl PultecLowEnd {
    /// `low_contour_db` is clamped to 0..=2.5 dB
    pub fn new(sample_rate: f64, low_contour_db: f64) -> Self {
        let contour_db =
            low_contour_db.clamp(*LOW_CONTOUR_RANGE_DB.start(), *LOW_CONTOUR_RANGE_DB.end());
        Self {
            high_pass: BiquadCoefficients::high_pass(PULTEC_HPF_HZ, sample_rate, PULTEC_HPF_Q),
            contour: BiquadCoefficients::peaking(
                PULTEC_PEAK_HZ,
                sample_rate,
                PULTEC_PEAK_Q,
                contour_db,
            ),
            contour_db,
        }
    }

    /// Boost actually applied at 55 Hz, after clamping
    pub fn contour_db(&self) -> f64 {
        self.contour_db
    }

    /// Run both sections over `buffer`, each from a zeroed state
    pub fn apply(&self, buffer: &mut [f32]) {
        self.high_pass.apply(buffer, &mut FilterState::default());
        self.contour.apply(buffer, &mut FilterState::default());
    }

    /// Combined magnitude response in dB
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        self.high_pass.magnitude_db(freq, sample_rate)
            + self.contour.magnitude_db(freq, sample_rate)
    }
}
