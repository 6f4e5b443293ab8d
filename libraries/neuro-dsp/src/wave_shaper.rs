//! Table-driven wave shaping
//!
//! A static transfer curve is sampled at a fixed resolution over `[-1, 1]`
//! and applied per sample by linear interpolation between neighbouring table
//! entries. Lookups are independent across samples, so long buffers are
//! shaped on the rayon pool.

use crate::constants::{
    CLIPPER_CURVE_LEN, CLIPPER_KNEE_CURVATURE, CLIPPER_SLOPE, CLIPPER_THRESHOLD_MAX,
    CLIPPER_THRESHOLD_MIN, TUBE_CURVE_LEN, TUBE_DRIVE_OFFSET, TUBE_DRIVE_SCALE,
    TUBE_EVEN_HARMONIC,
};
use neuro_core::TUBE_DRIVE_RANGE;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Buffers shorter than this are shaped on the calling thread
const PARALLEL_MIN_LEN: usize = 16_384;

/// Sampled transfer curve over `[-1, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct WaveShaperCurve {
    table: Vec<f32>,
}

impl WaveShaperCurve {
    /// Tube saturation with even-harmonic colouring
    ///
    /// `drive = clamp(amount, 0, 1) · 4 + 0.5`; each point is
    /// `sign(x) · (1 - e^(-|x|·drive)) · (1 + 0.15·cos(π|x|))`, clamped to `[-1, 1]`.
    /// The cosine factor bends the positive and negative halves of a cycle
    /// differently once the signal is offset, which is where the even
    /// harmonics come from.
    pub fn tube(drive_amount: f64) -> Self {
        let amount = drive_amount.clamp(*TUBE_DRIVE_RANGE.start(), *TUBE_DRIVE_RANGE.end());
        let drive = amount * TUBE_DRIVE_SCALE + TUBE_DRIVE_OFFSET;
        Self::from_fn(TUBE_CURVE_LEN, |x| {
            let abs_x = x.abs();
            let saturated = signum_or_zero(x) * (1.0 - (-abs_x * drive).exp());
            saturated * (1.0 + TUBE_EVEN_HARMONIC * (PI * abs_x).cos())
        })
    }

    /// Transient clipper with a soft knee of fixed width below `threshold`
    ///
    /// Identity up to `threshold - 0.04`, flat at `±threshold` above it, and an
    /// exponential blend in between. `threshold` is clamped to `[0.5, 1.0]`.
    pub fn clipper(threshold: f64) -> Self {
        let threshold = threshold.clamp(CLIPPER_THRESHOLD_MIN, CLIPPER_THRESHOLD_MAX);
        let soft_start = threshold - CLIPPER_SLOPE;

        Self::from_fn(CLIPPER_CURVE_LEN, |x| {
            let abs_x = x.abs();
            if abs_x <= soft_start {
                x
            } else if abs_x >= threshold {
                threshold.copysign(x)
            } else {
                let blend = (abs_x - soft_start) / (threshold - soft_start);
                let knee = 1.0 - (-blend * CLIPPER_KNEE_CURVATURE).exp();
                (soft_start + (threshold - soft_start) * knee).copysign(x)
            }
        })
    }

    /// Sample `shape` at `len` evenly spaced points over `[-1, 1]`
    fn from_fn(len: usize, shape: impl Fn(f64) -> f64) -> Self {
        let last = (len - 1) as f64;
        let table = (0..len)
            .map(|i| {
                let x = (i as f64 / last) * 2.0 - 1.0;
                shape(x).clamp(-1.0, 1.0) as f32
            })
            .collect();
        Self { table }
    }

    /// Number of table points
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false; curves are built with a fixed, non-zero resolution
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Raw table values
    pub fn as_slice(&self) -> &[f32] {
        &self.table
    }

    /// Map one input through the curve
    ///
    /// The fractional table position is clamped to the table, so inputs
    /// beyond `±1` read the end points.
    #[inline]
    pub fn lookup(&self, x: f32) -> f32 {
        let last = self.table.len() - 1;
        let half = last as f64 / 2.0;
        let position = (f64::from(x) * half + half).clamp(0.0, last as f64);

        let i0 = (position.floor() as usize).min(last - 1);
        let t = position - i0 as f64;
        let y0 = f64::from(self.table[i0]);
        let y1 = f64::from(self.table[i0 + 1]);
        (y0 * (1.0 - t) + y1 * t) as f32
    }

    /// Shape `buffer` in place
    pub fn apply(&self, buffer: &mut [f32]) {
        if buffer.len() < PARALLEL_MIN_LEN {
            for sample in buffer.iter_mut() {
                *sample = self.lookup(*sample);
            }
        } else {
            buffer
                .par_iter_mut()
                .with_min_len(PARALLEL_MIN_LEN / 4)
                .for_each(|sample| *sample = self.lookup(*sample));
        }
    }
}

/// `sign(x)` with `sign(0) = 0`
#[inline]
fn signum_or_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}
