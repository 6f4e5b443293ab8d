/// Mastering parameters
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Valid range of the tube drive amount (values outside are clamped)
pub const TUBE_DRIVE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Valid range of the low contour boost in dB (values outside are clamped)
pub const LOW_CONTOUR_RANGE_DB: RangeInclusive<f64> = 0.0..=2.5;

/// Range the gain optimizer keeps the make-up gain within, in dB
pub const GAIN_ADJUSTMENT_RANGE_DB: RangeInclusive<f64> = -12.0..=12.0;

/// Parameter set driving one pass of the mastering chain.
///
/// This is a plain `Copy` value: adjusting a field means building a new value
/// with one of the `with_*` methods, so a caller's original set can never be
/// changed behind its back (the optimizer relies on this).
///
/// Deserialization fills missing fields with the defaults, so a partial JSON
/// object such as `{"tube_drive_amount": 0.6}` overrides only that field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteringParams {
    /// Saturation intensity (0-1, clamped at use)
    pub tube_drive_amount: f64,

    /// Pultec-style 55 Hz resonance boost in dB (0-2.5, clamped at use)
    pub low_contour_amount: f64,

    /// Limiter output ceiling in dBFS (typically <= 0)
    pub limiter_ceiling_db: f64,

    /// Make-up gain applied first in the chain, in dB
    pub gain_adjustment_db: f64,
}

impl Default for MasteringParams {
    fn default() -> Self {
        Self {
            tube_drive_amount: 0.42,
            low_contour_amount: 1.8,
            limiter_ceiling_db: -0.5,
            gain_adjustment_db: 0.0,
        }
    }
}

impl MasteringParams {
    /// Copy with a different tube drive amount
    #[must_use]
    pub fn with_tube_drive_amount(self, tube_drive_amount: f64) -> Self {
        Self {
            tube_drive_amount,
            ..self
        }
    }

    /// Copy with a different low contour amount
    #[must_use]
    pub fn with_low_contour_amount(self, low_contour_amount: f64) -> Self {
        Self {
            low_contour_amount,
            ..self
        }
    }

    /// Copy with a different limiter ceiling
    #[must_use]
    pub fn with_limiter_ceiling_db(self, limiter_ceiling_db: f64) -> Self {
        Self {
            limiter_ceiling_db,
            ..self
        }
    }

    /// Copy with a different make-up gain
    #[must_use]
    pub fn with_gain_adjustment_db(self, gain_adjustment_db: f64) -> Self {
        Self {
            gain_adjustment_db,
            ..self
        }
    }

    /// Tube drive clamped to [`TUBE_DRIVE_RANGE`]
    pub fn clamped_tube_drive(&self) -> f64 {
        self.tube_drive_amount
            .clamp(*TUBE_DRIVE_RANGE.start(), *TUBE_DRIVE_RANGE.end())
    }

    /// Low contour boost clamped to [`LOW_CONTOUR_RANGE_DB`]
    pub fn clamped_low_contour_db(&self) -> f64 {
        self.low_contour_amount
            .clamp(*LOW_CONTOUR_RANGE_DB.start(), *LOW_CONTOUR_RANGE_DB.end())
    }
}

impl fmt::Display for MasteringParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "drive {:.2}, low contour {:.2} dB, ceiling {:.2} dB, gain {:+.2} dB",
            self.tube_drive_amount,
            self.low_contour_amount,
            self.limiter_ceiling_db,
            self.gain_adjustment_db
        )
    }
}
