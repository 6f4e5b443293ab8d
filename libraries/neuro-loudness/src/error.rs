//! Error types for loudness metering

use neuro_core::NeuroError;
use thiserror::Error;

/// Result type for loudness operations
pub type Result<T> = std::result::Result<T, LoudnessError>;

/// Errors that can occur during loudness measurement
#[derive(Error, Debug)]
pub enum LoudnessError {
    /// Invalid sample rate
    #[error("Invalid sample rate: {0} Hz (must be between 8000 and 384000)")]
    InvalidSampleRate(u32),

    /// Left and right channels differ in length
    #[error("Channel length mismatch: left has {left} samples, right has {right}")]
    ChannelLengthMismatch {
        /// Samples in the left channel
        left: usize,
        /// Samples in the right channel
        right: usize,
    },

    /// EBU R128 analysis error
    #[error("EBU R128 analysis failed: {0}")]
    AnalysisError(String),

    /// No samples were provided for analysis
    #[error("No audio samples provided for analysis")]
    NoSamples,

    /// Audio is completely silent
    #[error("Audio is silent (no loudness data available)")]
    SilentAudio,

    /// Loudness target could not be parsed
    #[error("Invalid loudness target: {0}")]
    InvalidTarget(String),
}

impl From<ebur128::Error> for LoudnessError {
    fn from(err: ebur128::Error) -> Self {
        Self::AnalysisError(format!("{:?}", err))
    }
}

impl From<LoudnessError> for NeuroError {
    fn from(err: LoudnessError) -> Self {
        match err {
            LoudnessError::ChannelLengthMismatch { left, right } => {
                NeuroError::ChannelLengthMismatch { left, right }
            }
            LoudnessError::InvalidSampleRate(rate) => NeuroError::InvalidSampleRate(rate),
            other => NeuroError::loudness(other.to_string()),
        }
    }
}
