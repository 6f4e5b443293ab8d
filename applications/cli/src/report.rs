/// JSON mastering report
use crate::error::Result;
use neuro_core::MasteringParams;
use neuro_dsp::MasteringOutcome;
use neuro_loudness::LoudnessReport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteringReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sample_rate: u32,
    pub duration_seconds: f64,

    /// Parameters the output was rendered with
    pub params: MasteringParams,

    pub target_lufs: Option<f64>,
    /// Loudness of the optimizer's last excerpt render
    pub achieved_lufs: Option<f64>,
    pub iterations: Option<u32>,
    pub converged: Option<bool>,

    /// Block-meter loudness of the full rendered output
    pub final_lufs: f64,

    /// EBU R128 figures for the output, when the analyzer could produce them
    pub r128: Option<LoudnessReport>,
}

impl MasteringReport {
    pub fn new(
        input: &Path,
        output: &Path,
        sample_rate: u32,
        duration_seconds: f64,
        target_lufs: Option<f64>,
        outcome: &MasteringOutcome,
    ) -> Self {
        let optimization = outcome.optimization.as_ref();
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            sample_rate,
            duration_seconds,
            params: outcome.params,
            target_lufs,
            achieved_lufs: optimization.map(|o| o.achieved_lufs),
            iterations: optimization.map(|o| o.iterations),
            converged: optimization.map(|o| o.converged),
            final_lufs: outcome.final_lufs,
            r128: None,
        }
    }

    #[must_use]
    pub fn with_r128(mut self, r128: Option<LoudnessReport>) -> Self {
        self.r128 = r128;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
