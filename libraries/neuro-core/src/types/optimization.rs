/// Gain optimizer result
use super::params::MasteringParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one gain optimizer run.
///
/// `params` is the set the caller should render with; `achieved_lufs` is the
/// loudness measured on the last rendered excerpt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Final parameter set
    pub params: MasteringParams,

    /// Loudness of the last rendered excerpt (LUFS-like)
    pub achieved_lufs: f64,

    /// Number of render/measure iterations performed (0-50)
    pub iterations: u32,

    /// Whether the last measurement landed within tolerance of the target
    pub converged: bool,
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} LUFS after {} iterations ({}), gain {:+.1} dB",
            self.achieved_lufs,
            self.iterations,
            if self.converged {
                "converged"
            } else {
                "not converged"
            },
            self.params.gain_adjustment_db
        )
    }
}
