//! Neuro-Master DSP
//!
//! The mastering chain and the gain optimizer that drives it.
//!
//! This crate provides:
//! - Biquad filters (high-pass, peaking, high shelf) with explicit delay-line state
//! - Table-driven wave shaping (tube saturation, transient clipper)
//! - A feed-forward peak limiter and the Neuro-Drive parallel path
//! - The per-channel stage chain and the Mid/Side mastering chain around it
//! - An iterative make-up gain optimizer steering by the block loudness meter
//!
//! # Example: Rendering
//!
//! ```rust
//! use neuro_core::MasteringParams;
//! use neuro_dsp::render;
//!
//! let mut left: Vec<f32> = (0..4800)
//!     .map(|i| 0.3 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 48_000.0).sin())
//!     .collect();
//! let mut right = left.clone();
//!
//! render(&mut left, &mut right, 48_000, &MasteringParams::default()).unwrap();
//! assert!(left.iter().all(|s| s.abs() <= 1.0));
//! ```
//!
//! # Example: Hitting a loudness target
//!
//! ```rust
//! use neuro_core::MasteringParams;
//! use neuro_dsp::{optimize, render};
//!
//! let left: Vec<f32> = (0..48_000)
//!     .map(|i| 0.1 * (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / 48_000.0).sin())
//!     .collect();
//! let right = left.clone();
//!
//! let result = optimize(&left, &right, 48_000, -20.0, &MasteringParams::default()).unwrap();
//! assert!(result.iterations <= 50);
//!
//! let (mut out_l, mut out_r) = (left.clone(), right.clone());
//! render(&mut out_l, &mut out_r, 48_000, &result.params).unwrap();
//! ```

#![deny(unsafe_code)]

pub mod biquad;
pub mod chain;
pub mod channel;
pub mod constants;
pub mod drive;
mod engine;
pub mod limiter;
pub mod optimizer;
pub mod pultec;
pub mod wave_shaper;

pub use biquad::{BiquadCoefficients, FilterState};
pub use chain::MasteringChain;
pub use channel::{ChannelProcessor, ChannelStage};
pub use constants::{EngineConstants, ENGINE_CONSTANTS};
pub use drive::NeuroDrive;
pub use engine::{measure_loudness, optimize, render, MasteringEngine, MasteringOutcome};
pub use limiter::{apply_limiter, LimiterSettings};
pub use optimizer::GainOptimizer;
pub use pultec::PultecLowEnd;
pub use wave_shaper::WaveShaperCurve;
