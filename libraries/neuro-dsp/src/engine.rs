//! Engine facade
//!
//! [`MasteringEngine`] ties the chain, the optimizer and the meter together
//! for callers holding a [`StereoBuffer`]. The free functions at the bottom
//! do the same for raw channel slices.

use crate::chain::MasteringChain;
use crate::optimizer::GainOptimizer;
use neuro_core::{MasteringParams, NeuroError, OptimizationResult, Result, StereoBuffer};
use neuro_loudness::LoudnessMeter;
use serde::{Deserialize, Serialize};
use tracing::info;

/// What one [`MasteringEngine::master`] call did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasteringOutcome {
    /// Parameters the full buffer was rendered with
    pub params: MasteringParams,
    /// Optimizer result, when a target was given
    pub optimization: Option<OptimizationResult>,
    /// Loudness of the rendered buffer, measured after the render
    pub final_lufs: f64,
}

/// Mastering engine
///
/// Caches one chain and one optimizer, rebuilt whenever a buffer arrives at
/// a different sample rate.
///
/// # Example
///
/// ```rust
/// use neuro_core::{MasteringParams, SampleRate, StereoBuffer};
/// use neuro_dsp::MasteringEngine;
///
/// let tone: Vec<f32> = (0..48_000)
///     .map(|i| 0.1 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 48_000.0).sin())
///     .collect();
/// let mut buffer = StereoBuffer::from_mono(tone, SampleRate::DVD_QUALITY).unwrap();
///
/// let mut engine = MasteringEngine::new();
/// let outcome = engine
///     .master(&mut buffer, &MasteringParams::default(), None)
///     .unwrap();
/// assert!(outcome.optimization.is_none());
/// assert!(outcome.final_lufs > -70.0);
/// ```
#[derive(Debug, Default)]
pub struct MasteringEngine {
    chain: Option<MasteringChain>,
    optimizer: Option<GainOptimizer>,
}

impl MasteringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn chain_for(&mut self, sample_rate: u32) -> Result<&mut MasteringChain> {
        if self.chain.as_ref().map(MasteringChain::sample_rate) != Some(sample_rate) {
            self.chain = Some(MasteringChain::new(sample_rate)?);
        }
        self.chain
            .as_mut()
            .ok_or(NeuroError::InvalidSampleRate(sample_rate))
    }

    fn optimizer_for(&mut self, sample_rate: u32) -> Result<&mut GainOptimizer> {
        if self.optimizer.as_ref().map(GainOptimizer::sample_rate) != Some(sample_rate) {
            self.optimizer = Some(GainOptimizer::new(sample_rate)?);
        }
        self.optimizer
            .as_mut()
            .ok_or(NeuroError::InvalidSampleRate(sample_rate))
    }

    /// Render `buffer` in place through the full chain
    pub fn render(&mut self, buffer: &mut StereoBuffer, params: &MasteringParams) -> Result<()> {
        let sample_rate = buffer.sample_rate().as_hz();
        let (left, right) = buffer.channels_mut();
        self.chain_for(sample_rate)?.process(left, right, params)
    }

    /// Search for the make-up gain that brings `buffer` to `target_lufs`
    ///
    /// `buffer` and `initial` are left untouched.
    pub fn optimize(
        &mut self,
        buffer: &StereoBuffer,
        target_lufs: f64,
        initial: &MasteringParams,
    ) -> Result<OptimizationResult> {
        self.optimizer_for(buffer.sample_rate().as_hz())?.optimize(
            buffer.left(),
            buffer.right(),
            target_lufs,
            initial,
        )
    }

    /// Block-meter loudness of `buffer`
    pub fn measure_loudness(&self, buffer: &StereoBuffer) -> Result<f64> {
        measure_loudness(buffer.left(), buffer.right(), buffer.sample_rate().as_hz())
    }

    /// Optimize (when a target is given), render once, then measure
    pub fn master(
        &mut self,
        buffer: &mut StereoBuffer,
        params: &MasteringParams,
        target_lufs: Option<f64>,
    ) -> Result<MasteringOutcome> {
        let optimization = match target_lufs {
            Some(target) => Some(self.optimize(buffer, target, params)?),
            None => None,
        };
        let params = optimization.map_or(*params, |result| result.params);

        self.render(buffer, &params)?;
        let final_lufs = self.measure_loudness(buffer)?;
        info!(
            final_lufs,
            samples = buffer.len(),
            sample_rate = buffer.sample_rate().as_hz(),
            "mastering finished"
        );

        Ok(MasteringOutcome {
            params,
            optimization,
            final_lufs,
        })
    }
}

/// Render a pair of channels in place
///
/// # Errors
/// Fails on a zero sample rate and on empty or mismatched channels.
pub fn render(
    left: &mut [f32],
    right: &mut [f32],
    sample_rate: u32,
    params: &MasteringParams,
) -> Result<()> {
    MasteringChain::new(sample_rate)?.process(left, right, params)
}

/// Run the gain optimizer over a pair of channels
pub fn optimize(
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
    target_lufs: f64,
    initial: &MasteringParams,
) -> Result<OptimizationResult> {
    GainOptimizer::new(sample_rate)?.optimize(left, right, target_lufs, initial)
}

/// Block-meter loudness of a pair of channels
///
/// Empty input and silence read the -70 floor; only mismatched lengths fail.
pub fn measure_loudness(left: &[f32], right: &[f32], sample_rate: u32) -> Result<f64> {
    Ok(LoudnessMeter::new(sample_rate).measure(left, right)?)
}
