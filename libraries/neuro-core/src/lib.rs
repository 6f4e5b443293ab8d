//! Neuro-Master Core
//!
//! Platform-agnostic types and error handling shared by the mastering engine crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Parameters**: `MasteringParams`, the immutable record that drives the chain
//! - **Audio Types**: `StereoBuffer`, `SampleRate`, PCM normalization helpers
//! - **Results**: `OptimizationResult` produced by the gain optimizer
//! - **Error Handling**: Unified `NeuroError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use neuro_core::{MasteringParams, SampleRate, StereoBuffer};
//!
//! // Defaults: drive 0.42, low contour 1.8 dB, ceiling -0.5 dB, gain 0 dB
//! let params = MasteringParams::default();
//! let louder = params.with_gain_adjustment_db(1.5);
//! assert_eq!(params.gain_adjustment_db, 0.0);
//! assert_eq!(louder.gain_adjustment_db, 1.5);
//!
//! let buffer = StereoBuffer::from_mono(vec![0.0; 480], SampleRate::DVD_QUALITY).unwrap();
//! assert_eq!(buffer.len(), 480);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{NeuroError, Result};
pub use types::{
    // Audio types
    normalize_f32, normalize_i16, normalize_i24, normalize_i32, validate_stereo, SampleRate,
    StereoBuffer,
    // Parameters
    MasteringParams, GAIN_ADJUSTMENT_RANGE_DB, LOW_CONTOUR_RANGE_DB, TUBE_DRIVE_RANGE,
    // Results
    OptimizationResult,
};
