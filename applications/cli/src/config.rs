/// Job runner configuration
use crate::error::{MasterError, Result};
use neuro_core::MasteringParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "neuro-master.toml";

/// Environment variable prefix (`NEURO_DEFAULT_PARAMS__TUBE_DRIVE_AMOUNT=0.6`)
pub const ENV_PREFIX: &str = "NEURO";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MasterConfig {
    /// Parameters used for anything the job and the command line leave unset
    pub default_params: MasteringParams,

    /// Loudness target when the job names none; `None` renders without optimizing
    pub default_target_lufs: Option<f64>,

    pub output_format: OutputFormat,

    /// Write a JSON report next to the output file
    pub report: bool,
}

/// Sample format of the written WAV
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Float32,
    Int16,
}

impl OutputFormat {
    pub fn bits_per_sample(self) -> u16 {
        match self {
            OutputFormat::Float32 => 32,
            OutputFormat::Int16 => 16,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = MasterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float32" | "f32" | "float" => Ok(OutputFormat::Float32),
            "int16" | "i16" | "pcm16" => Ok(OutputFormat::Int16),
            other => Err(MasterError::Config(format!(
                "unknown output format '{other}' (expected float32 or int16)"
            ))),
        }
    }
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            default_params: MasteringParams::default(),
            default_target_lufs: None,
            output_format: OutputFormat::default(),
            report: true,
        }
    }
}

impl MasterConfig {
    /// Load from `neuro-master.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        Self::load_from(path.exists().then_some(path.as_path()))
    }

    /// Load from an explicit file (if any), then apply `NEURO_*` overrides
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(MasterError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        // Nested keys use a double underscore so field names keep theirs
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    ///
    /// Out-of-range mastering parameters are not errors; the engine clamps them.
    pub fn validate(&self) -> Result<()> {
        if let Some(target) = self.default_target_lufs {
            if !target.is_finite() {
                return Err(MasterError::Config(format!(
                    "default_target_lufs must be finite, got {target}"
                )));
            }
        }

        let params = &self.default_params;
        let fields = [
            ("tube_drive_amount", params.tube_drive_amount),
            ("low_contour_amount", params.low_contour_amount),
            ("limiter_ceiling_db", params.limiter_ceiling_db),
            ("gain_adjustment_db", params.gain_adjustment_db),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(MasterError::Config(format!(
                    "default_params.{name} must be finite, got {value}"
                )));
            }
        }

        Ok(())
    }
}
