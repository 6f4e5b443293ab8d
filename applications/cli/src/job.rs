//! Mastering job description
//!
//! A job is a small JSON document naming the input and output files plus any
//! parameter overrides:
//!
//! ```json
//! {
//!   "input": "mix.wav",
//!   "output": "master.wav",
//!   "params": { "tube_drive_amount": 0.6 },
//!   "target_lufs": -14.0
//! }
//! ```
//!
//! Values are layered: command-line flags over the job file over the config
//! file over the engine defaults.

use crate::error::{MasterError, Result};
use neuro_core::MasteringParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A subset of [`MasteringParams`]; unset fields fall through to the layer below
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParamOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tube_drive_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_contour_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limiter_ceiling_db: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain_adjustment_db: Option<f64>,
}

impl ParamOverrides {
    /// Apply the set fields on top of `base`
    pub fn apply(&self, base: MasteringParams) -> MasteringParams {
        let mut params = base;
        if let Some(v) = self.tube_drive_amount {
            params = params.with_tube_drive_amount(v);
        }
        if let Some(v) = self.low_contour_amount {
            params = params.with_low_contour_amount(v);
        }
        if let Some(v) = self.limiter_ceiling_db {
            params = params.with_limiter_ceiling_db(v);
        }
        if let Some(v) = self.gain_adjustment_db {
            params = params.with_gain_adjustment_db(v);
        }
        params
    }

    /// Layer `other` over `self`: fields set in `other` win
    #[must_use]
    pub fn merged_with(self, other: ParamOverrides) -> Self {
        Self {
            tube_drive_amount: other.tube_drive_amount.or(self.tube_drive_amount),
            low_contour_amount: other.low_contour_amount.or(self.low_contour_amount),
            limiter_ceiling_db: other.limiter_ceiling_db.or(self.limiter_ceiling_db),
            gain_adjustment_db: other.gain_adjustment_db.or(self.gain_adjustment_db),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MasteringJob {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub params: ParamOverrides,
    #[serde(default)]
    pub target_lufs: Option<f64>,
    /// Report path; defaults to the output path with a `.json` extension
    #[serde(default)]
    pub report: Option<PathBuf>,
}

impl MasteringJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            params: ParamOverrides::default(),
            target_lufs: None,
            report: None,
        }
    }

    /// Read a job description from a JSON file
    ///
    /// Relative `input`, `output` and `report` paths are resolved against the
    /// job file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut job: Self = serde_json::from_str(&text)?;
        if let Some(dir) = path.parent() {
            job.input = dir.join(&job.input);
            job.output = dir.join(&job.output);
            job.report = job.report.map(|report| dir.join(report));
        }
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() || self.output.as_os_str().is_empty() {
            return Err(MasterError::Job("input and output paths are required".into()));
        }
        if self.input == self.output {
            return Err(MasterError::Job(format!(
                "output would overwrite input: {}",
                self.input.display()
            )));
        }
        if let Some(target) = self.target_lufs {
            if !target.is_finite() {
                return Err(MasterError::Job(format!(
                    "target_lufs must be finite, got {target}"
                )));
            }
        }
        Ok(())
    }

    pub fn report_path(&self) -> PathBuf {
        self.report
            .clone()
            .unwrap_or_else(|| self.output.with_extension("json"))
    }
}
