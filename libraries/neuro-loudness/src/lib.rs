//! Loudness metering for Neuro-Master
//!
//! This crate provides:
//! - The block mean-square loudness meter the gain optimizer steers by
//! - Named loudness targets (streaming, broadcast, club)
//! - An EBU R128 analyzer used only for the final mastering report
//!
//! # Architecture
//!
//! ```text
//! Optimizer loop:
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │  Rendered   │ ──► │ LoudnessMeter│ ──► │  LUFS-like    │
//! │  excerpt    │     │ (400 ms mean)│     │  estimate     │
//! └─────────────┘     └──────────────┘     └───────────────┘
//!
//! Final report:
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │  Mastered   │ ──► │  Analyzer    │ ──► │ LoudnessReport│
//! │  buffer     │     │  (EBU R128)  │     │               │
//! └─────────────┘     └──────────────┘     └───────────────┘
//! ```
//!
//! The two paths never mix: the optimizer converges on the meter's figure,
//! and the R128 numbers are informational only.
//!
//! # Example
//!
//! ```rust
//! use neuro_loudness::{measure_loudness, SILENCE_FLOOR_LUFS};
//!
//! let silence = vec![0.0_f32; 48_000];
//! let lufs = measure_loudness(&silence, &silence, 48_000).unwrap();
//! assert_eq!(lufs, SILENCE_FLOOR_LUFS);
//! ```

#![deny(unsafe_code)]

mod analyzer;
mod error;
mod meter;
mod target;

pub use analyzer::{LoudnessAnalyzer, LoudnessReport};
pub use error::{LoudnessError, Result};
pub use meter::{measure_loudness, LoudnessMeter};
pub use target::LoudnessTarget;

/// Length of one meter block in milliseconds
pub const BLOCK_MS: u32 = 400;

/// Offset added to `10·log10(mean power)`
pub const LOUDNESS_OFFSET_DB: f64 = -0.691;

/// Value reported for silence or buffers shorter than one block
pub const SILENCE_FLOOR_LUFS: f64 = -70.0;

/// Common streaming platform reference level
pub const STREAMING_LUFS: f64 = -14.0;

/// EBU R128 broadcast reference level
pub const BROADCAST_LUFS: f64 = -23.0;

/// Club / DJ-store reference level
pub const CLUB_LUFS: f64 = -8.5;
