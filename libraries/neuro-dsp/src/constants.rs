//! Fixed, non-configurable engine values
//!
//! Every stage reads its numbers from here, and [`ENGINE_CONSTANTS`] publishes
//! the same values for display. Changing a constant changes the rendered audio.

use neuro_core::GAIN_ADJUSTMENT_RANGE_DB;
use neuro_loudness::{BLOCK_MS, LOUDNESS_OFFSET_DB, SILENCE_FLOOR_LUFS};
use serde::Serialize;

// Tube saturation
pub const TUBE_CURVE_LEN: usize = 8192;
/// `drive = clamp(amount, 0, 1) * scale + offset`
pub const TUBE_DRIVE_SCALE: f64 = 4.0;
pub const TUBE_DRIVE_OFFSET: f64 = 0.5;
/// Weight of the `cos(π|x|)` even-harmonic term
pub const TUBE_EVEN_HARMONIC: f64 = 0.15;

// Pultec-style low end
pub const PULTEC_HPF_HZ: f64 = 30.0;
pub const PULTEC_HPF_Q: f64 = 0.707;
pub const PULTEC_PEAK_HZ: f64 = 55.0;
pub const PULTEC_PEAK_Q: f64 = 0.9;

// Transient clipper
pub const CLIPPER_CURVE_LEN: usize = 8192;
pub const CLIPPER_THRESHOLD: f64 = 0.99;
pub const CLIPPER_SLOPE: f64 = 0.04;
pub const CLIPPER_KNEE_CURVATURE: f64 = 3.0;
pub const CLIPPER_THRESHOLD_MIN: f64 = 0.5;
pub const CLIPPER_THRESHOLD_MAX: f64 = 1.0;

// Limiter
pub const LIMITER_ATTACK_MS: f64 = 5.0;
/// Per-sample release multiplier; release time therefore scales with sample rate
pub const LIMITER_RELEASE_COEFF: f64 = 0.9999;
/// Envelope level below which no gain is applied
pub const LIMITER_ENVELOPE_FLOOR: f64 = 1e-6;

// Neuro-Drive parallel path
pub const DRIVE_WET_MIX: f64 = 0.22;
pub const DRIVE_COMP_THRESHOLD: f64 = 0.3;
pub const DRIVE_COMP_RATIO: f64 = 4.0;
pub const DRIVE_HPF_HZ: f64 = 250.0;
pub const DRIVE_HPF_Q: f64 = 0.707;
pub const DRIVE_SHELF_HZ: f64 = 12_000.0;
pub const DRIVE_SHELF_GAIN_DB: f64 = 4.5;

// Gain optimizer
pub const OPTIMIZER_MAX_ITERATIONS: u32 = 50;
pub const OPTIMIZER_STEP_DB: f64 = 0.1;
pub const OPTIMIZER_TOLERANCE_DB: f64 = 0.05;
pub const OPTIMIZER_EXCERPT_SECS: usize = 10;
pub const OPTIMIZER_GAIN_MIN_DB: f64 = *GAIN_ADJUSTMENT_RANGE_DB.start();
pub const OPTIMIZER_GAIN_MAX_DB: f64 = *GAIN_ADJUSTMENT_RANGE_DB.end();

/// Published constant table (display only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConstants {
    pub tube_tape: TubeConstants,
    pub eq: EqConstants,
    pub transient_limiter: TransientConstants,
    pub neuro_drive: DriveConstants,
    pub convergence: ConvergenceConstants,
    pub meter: MeterConstants,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TubeConstants {
    pub curve_length: usize,
    pub drive_scale: f64,
    pub drive_offset: f64,
    pub even_harmonic: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EqConstants {
    pub hpf_freq: f64,
    pub hpf_q: f64,
    pub low_peak_freq: f64,
    pub low_peak_q: f64,
    pub high_shelf_freq: f64,
    pub high_shelf_gain: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransientConstants {
    pub soft_clip_threshold: f64,
    pub soft_clip_slope: f64,
    pub limiter_attack: f64,
    pub limiter_release_coeff: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveConstants {
    pub hpf_cutoff: f64,
    pub high_shelf_drive: f64,
    pub wet_mix: f64,
    pub comp_threshold: f64,
    pub comp_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvergenceConstants {
    pub max_iterations: u32,
    pub step_db: f64,
    pub tolerance_db: f64,
    pub excerpt_seconds: usize,
    pub gain_min_db: f64,
    pub gain_max_db: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterConstants {
    pub block_ms: u32,
    pub offset_db: f64,
    pub silence_floor: f64,
}

pub const ENGINE_CONSTANTS: EngineConstants = EngineConstants {
    tube_tape: TubeConstants {
        curve_length: TUBE_CURVE_LEN,
        drive_scale: TUBE_DRIVE_SCALE,
        drive_offset: TUBE_DRIVE_OFFSET,
        even_harmonic: TUBE_EVEN_HARMONIC,
    },
    eq: EqConstants {
        hpf_freq: PULTEC_HPF_HZ,
        hpf_q: PULTEC_HPF_Q,
        low_peak_freq: PULTEC_PEAK_HZ,
        low_peak_q: PULTEC_PEAK_Q,
        high_shelf_freq: DRIVE_SHELF_HZ,
        high_shelf_gain: DRIVE_SHELF_GAIN_DB,
    },
    transient_limiter: TransientConstants {
        soft_clip_threshold: CLIPPER_THRESHOLD,
        soft_clip_slope: CLIPPER_SLOPE,
        limiter_attack: LIMITER_ATTACK_MS,
        limiter_release_coeff: LIMITER_RELEASE_COEFF,
    },
    neuro_drive: DriveConstants {
        hpf_cutoff: DRIVE_HPF_HZ,
        high_shelf_drive: DRIVE_SHELF_GAIN_DB,
        wet_mix: DRIVE_WET_MIX,
        comp_threshold: DRIVE_COMP_THRESHOLD,
        comp_ratio: DRIVE_COMP_RATIO,
    },
    convergence: ConvergenceConstants {
        max_iterations: OPTIMIZER_MAX_ITERATIONS,
        step_db: OPTIMIZER_STEP_DB,
        tolerance_db: OPTIMIZER_TOLERANCE_DB,
        excerpt_seconds: OPTIMIZER_EXCERPT_SECS,
        gain_min_db: OPTIMIZER_GAIN_MIN_DB,
        gain_max_db: OPTIMIZER_GAIN_MAX_DB,
    },
    meter: MeterConstants {
        block_ms: BLOCK_MS,
        offset_db: LOUDNESS_OFFSET_DB,
        silence_floor: SILENCE_FLOOR_LUFS,
    },
};
