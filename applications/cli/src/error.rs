/// Job runner error types
use neuro_core::NeuroError;
use neuro_loudness::LoudnessError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MasterError>;

#[derive(Debug, Error)]
pub enum MasterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid job: {0}")]
    Job(String),

    #[error("Unsupported WAV format: {bits}-bit {format}")]
    UnsupportedFormat { bits: u16, format: &'static str },

    #[error("WAV error in {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Engine error: {0}")]
    Engine(#[from] NeuroError),

    #[error("Loudness analysis error: {0}")]
    Loudness(#[from] LoudnessError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MasterError {
    pub(crate) fn wav(path: impl Into<PathBuf>, source: hound::Error) -> Self {
        Self::Wav {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for MasterError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
