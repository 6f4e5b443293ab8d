//! Iterative make-up gain search
//!
//! The optimizer renders a centered excerpt of at most ten seconds through the
//! full mastering chain, measures it with the block meter, and nudges
//! `gain_adjustment_db` by a fixed 0.1 dB step toward the target until the
//! reading lands within 0.05 dB or fifty renders have been spent. Only the
//! gain moves; every other parameter is carried through unchanged.

use crate::chain::MasteringChain;
use crate::constants::{
    OPTIMIZER_EXCERPT_SECS, OPTIMIZER_GAIN_MAX_DB, OPTIMIZER_GAIN_MIN_DB,
    OPTIMIZER_MAX_ITERATIONS, OPTIMIZER_STEP_DB, OPTIMIZER_TOLERANCE_DB,
};
use neuro_core::{validate_stereo, MasteringParams, NeuroError, OptimizationResult, Result};
use neuro_loudness::{LoudnessMeter, SILENCE_FLOOR_LUFS};
use std::ops::Range;
use tracing::{debug, info};

/// Gain optimizer for one sample rate
///
/// Keeps its excerpt working buffers and the chain's scratch space between
/// runs.
#[derive(Debug, Clone)]
pub struct GainOptimizer {
    chain: MasteringChain,
    meter: LoudnessMeter,
    work_left: Vec<f32>,
    work_right: Vec<f32>,
}

impl GainOptimizer {
    /// Create an optimizer for `sample_rate`
    ///
    /// # Errors
    /// Returns [`NeuroError::InvalidSampleRate`] for a zero rate.
    pub fn new(sample_rate: u32) -> Result<Self> {
        Ok(Self {
            chain: MasteringChain::new(sample_rate)?,
            meter: LoudnessMeter::new(sample_rate),
            work_left: Vec::new(),
            work_right: Vec::new(),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.chain.sample_rate()
    }

    /// Sample range of the excerpt the optimizer renders for a buffer of `len`
    pub fn excerpt_range(&self, len: usize) -> Range<usize> {
        let max_len = OPTIMIZER_EXCERPT_SECS * self.sample_rate() as usize;
        let excerpt_len = len.min(max_len);
        let start = (len / 2).saturating_sub(excerpt_len / 2);
        start..start + excerpt_len
    }

    /// Search for the make-up gain that brings the excerpt to `target_lufs`
    ///
    /// `initial` is never modified; the returned parameters are a new value.
    /// When the loop runs out of iterations the returned gain is one step past
    /// the last measured render, and `achieved_lufs` belongs to that last
    /// render.
    ///
    /// # Errors
    /// Fails on empty or mismatched channels and on a non-finite target.
    pub fn optimize(
        &mut self,
        left: &[f32],
        right: &[f32],
        target_lufs: f64,
        initial: &MasteringParams,
    ) -> Result<OptimizationResult> {
        let len = validate_stereo(left, right)?;
        if !target_lufs.is_finite() {
            return Err(NeuroError::invalid_input(format!(
                "target loudness must be finite, got {target_lufs}"
            )));
        }

        let excerpt = self.excerpt_range(len);
        let excerpt_left = &left[excerpt.clone()];
        let excerpt_right = &right[excerpt.clone()];
        debug!(
            start = excerpt.start,
            len = excerpt.len(),
            target_lufs,
            "optimizing make-up gain"
        );

        let mut params = *initial;
        let mut achieved_lufs = SILENCE_FLOOR_LUFS;
        let mut iterations = 0_u32;
        let mut converged = false;

        while iterations < OPTIMIZER_MAX_ITERATIONS {
            self.work_left.clear();
            self.work_left.extend_from_slice(excerpt_left);
            self.work_right.clear();
            self.work_right.extend_from_slice(excerpt_right);

            self.chain
                .process(&mut self.work_left, &mut self.work_right, &params)?;
            achieved_lufs = self.meter.measure(&self.work_left, &self.work_right)?;
            iterations += 1;

            let error = target_lufs - achieved_lufs;
            debug!(
                iteration = iterations,
                gain_db = params.gain_adjustment_db,
                achieved_lufs,
                error,
                "optimizer step"
            );

            if error.abs() <= OPTIMIZER_TOLERANCE_DB {
                converged = true;
                break;
            }

            let gain_db = (params.gain_adjustment_db + OPTIMIZER_STEP_DB.copysign(error))
                .clamp(OPTIMIZER_GAIN_MIN_DB, OPTIMIZER_GAIN_MAX_DB);
            params = params.with_gain_adjustment_db(gain_db);
        }

        let result = OptimizationResult {
            params,
            achieved_lufs,
            iterations,
            converged,
        };
        info!(%result, target_lufs, "gain optimization finished");
        Ok(result)
    }
}
