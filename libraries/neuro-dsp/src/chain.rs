/// Mid/Side mastering chain
///
/// The single rendering primitive: the optimizer's excerpt passes and the
/// final full-length render both go through [`MasteringChain::process`].
use crate::channel::ChannelProcessor;
use neuro_core::{validate_stereo, MasteringParams, NeuroError, Result};
use rayon::join;
use tracing::trace;

/// Stereo mastering chain for one sample rate
///
/// Owns the Mid and Side scratch buffers so repeated renders at the same
/// length do not reallocate.
#[derive(Debug, Clone)]
pub struct MasteringChain {
    sample_rate: u32,
    mid: Vec<f32>,
    side: Vec<f32>,
}

impl MasteringChain {
    /// Create a chain for `sample_rate`
    ///
    /// # Errors
    /// Returns [`NeuroError::InvalidSampleRate`] for a zero rate.
    pub fn new(sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(NeuroError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            sample_rate,
            mid: Vec::new(),
            side: Vec::new(),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Master `left` and `right` in place with `params`
    ///
    /// Mid and Side each get their own pass through the channel processor,
    /// on separate rayon tasks.
    ///
    /// # Errors
    /// Fails fast on empty or mismatched channels; nothing is truncated.
    pub fn process(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        params: &MasteringParams,
    ) -> Result<()> {
        let len = validate_stereo(left, right)?;
        trace!(len, sample_rate = self.sample_rate, %params, "rendering");

        encode_mid_side(left, right, &mut self.mid, &mut self.side);

        let processor = ChannelProcessor::new(params, f64::from(self.sample_rate));
        let (mid, side) = (&mut self.mid, &mut self.side);
        join(|| processor.process(mid), || processor.process(side));

        decode_mid_side(&self.mid, &self.side, left, right);
        Ok(())
    }
}

/// Fill `mid` and `side` with `(l + r) / 2` and `(l - r) / 2`
pub fn encode_mid_side(left: &[f32], right: &[f32], mid: &mut Vec<f32>, side: &mut Vec<f32>) {
    mid.clear();
    side.clear();
    mid.extend(left.iter().zip(right).map(|(&l, &r)| (l + r) * 0.5));
    side.extend(left.iter().zip(right).map(|(&l, &r)| (l - r) * 0.5));
}

/// Write `mid + side` to `left` and `mid - side` to `right`
pub fn decode_mid_side(mid: &[f32], side: &[f32], left: &mut [f32], right: &mut [f32]) {
    for (((l, r), &m), &s) in left.iter_mut().zip(right.iter_mut()).zip(mid).zip(side) {
        *l = m + s;
        *r = m - s;
    }
}
