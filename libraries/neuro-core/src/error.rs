/// Core error types for Neuro-Master
use thiserror::Error;

/// Result type alias using `NeuroError`
pub type Result<T> = std::result::Result<T, NeuroError>;

/// Core error type for Neuro-Master
#[derive(Error, Debug)]
pub enum NeuroError {
    /// A stereo buffer with no samples was handed to the engine
    #[error("Audio buffer is empty")]
    EmptyBuffer,

    /// Left and right channels disagree in length
    #[error("Channel length mismatch: left has {left} samples, right has {right}")]
    ChannelLengthMismatch {
        /// Samples in the left channel
        left: usize,
        /// Samples in the right channel
        right: usize,
    },

    /// Sample rate of zero
    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Loudness analysis errors (reporting analyzer)
    #[error("Loudness error: {0}")]
    Loudness(String),
}

impl NeuroError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a loudness error
    pub fn loudness(msg: impl Into<String>) -> Self {
        Self::Loudness(msg.into())
    }
}
