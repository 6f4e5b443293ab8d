/// Feed-forward peak limiter
///
/// A single envelope follower with a fast attack and a very slow release
/// drives the gain `min(1, ceiling / envelope)`. There is no lookahead, so a
/// transient can exceed the ceiling for up to one attack window while the
/// envelope catches up. It is a safety net for the clipper in front of it,
/// not a brick wall.
use crate::constants::{LIMITER_ENVELOPE_FLOOR, LIMITER_RELEASE_COEFF};

/// Limiter settings for one pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterSettings {
    /// Output ceiling in dBFS
    pub ceiling_db: f64,
    /// Attack time in milliseconds
    pub attack_ms: f64,
}

impl LimiterSettings {
    /// Ceiling as a linear amplitude
    pub fn ceiling_linear(&self) -> f64 {
        10.0_f64.powf(self.ceiling_db / 20.0)
    }

    /// Attack window in whole samples (at least one)
    pub fn attack_samples(&self, sample_rate: f64) -> usize {
        let samples = (self.attack_ms / 1000.0 * sample_rate).floor();
        if samples >= 1.0 {
            samples as usize
        } else {
            1
        }
    }
}

/// Limit `buffer` in place
///
/// The envelope starts at zero for every call; no state survives between
/// buffers.
pub fn apply_limiter(buffer: &mut [f32], sample_rate: f64, settings: LimiterSettings) {
    let ceiling = settings.ceiling_linear();
    let attack_coeff = 1.0 / settings.attack_samples(sample_rate) as f64;
    let mut envelope = 0.0_f64;

    for sample in buffer.iter_mut() {
        let level = f64::from(sample.abs());

        if level > envelope {
            // Attack: move 1/attack_samples of the way up
            envelope += (level - envelope) * attack_coeff;
        } else {
            // Release: fixed per-sample decay toward the current level
            envelope = level + (envelope - level) * LIMITER_RELEASE_COEFF;
        }

        if envelope > LIMITER_ENVELOPE_FLOOR {
            let gain = (ceiling / envelope).min(1.0);
            *sample = (f64::from(*sample) * gain) as f32;
        }
    }
}
