//! Integration tests for neuro-dsp
//!
//! Tests include:
//! - Property-based tests with proptest (curves, Mid/Side, limiter ceiling)
//! - Render determinism and stage order
//! - Optimizer scenarios: convergence, unreachable targets, excerpt selection

use neuro_core::{MasteringParams, NeuroError, SampleRate, StereoBuffer};
use neuro_dsp::chain::{decode_mid_side, encode_mid_side};
use neuro_dsp::constants::{LIMITER_ATTACK_MS, OPTIMIZER_MAX_ITERATIONS};
use neuro_dsp::{
    apply_limiter, measure_loudness, optimize, render, ChannelProcessor, GainOptimizer,
    LimiterSettings, MasteringEngine, WaveShaperCurve,
};
use proptest::prelude::*;

// ========== Helper Functions ==========

/// Generate a sine wave at specified amplitude and frequency
fn generate_sine(
    sample_rate: u32,
    frequency: f32,
    amplitude: f32,
    duration_secs: f32,
) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Deterministic white noise (LCG)
fn generate_noise(num_samples: usize, level: f32, mut seed: u64) -> Vec<f32> {
    (0..num_samples)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let random = ((seed >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            random * level
        })
        .collect()
}

// ========== Property-Based Tests ==========

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// curve(-x) ≈ -curve(x) for any drive
    #[test]
    fn tube_curve_is_odd(drive in 0.0_f64..=1.0, x in -1.0_f32..=1.0) {
        let curve = WaveShaperCurve::tube(drive);
        prop_assert!((curve.lookup(-x) + curve.lookup(x)).abs() < 1e-5);
    }

    /// Identity below the knee
    #[test]
    fn clipper_is_identity_below_knee(x in -0.95_f32..=0.95) {
        let curve = WaveShaperCurve::clipper(0.99);
        prop_assert!((curve.lookup(x) - x).abs() < 1e-3, "x {} -> {}", x, curve.lookup(x));
    }

    /// Never beyond the threshold, however hot the input
    #[test]
    fn clipper_is_bounded(x in -10.0_f32..10.0) {
        let curve = WaveShaperCurve::clipper(0.99);
        prop_assert!(curve.lookup(x).abs() <= 0.99 + 1e-6);
    }

    /// Decoding an unprocessed Mid/Side pair gives back the input
    #[test]
    fn mid_side_round_trip(
        pairs in prop::collection::vec((-1.0_f32..=1.0, -1.0_f32..=1.0), 1..512)
    ) {
        let (left, right): (Vec<f32>, Vec<f32>) = pairs.into_iter().unzip();
        let (mut mid, mut side) = (Vec::new(), Vec::new());
        encode_mid_side(&left, &right, &mut mid, &mut side);

        let mut out_l = vec![0.0; left.len()];
        let mut out_r = vec![0.0; right.len()];
        decode_mid_side(&mid, &side, &mut out_l, &mut out_r);

        for i in 0..left.len() {
            prop_assert!((out_l[i] - left[i]).abs() <= 1e-6);
            prop_assert!((out_r[i] - right[i]).abs() <= 1e-6);
        }
    }

    /// Sustained overload settles at the ceiling once the envelope has caught up
    #[test]
    fn limiter_holds_ceiling(ceiling_db in -12.0_f64..-0.1, level in 1.0_f32..4.0) {
        let mut buffer = vec![level; 9_600];
        let settings = LimiterSettings { ceiling_db, attack_ms: LIMITER_ATTACK_MS };
        apply_limiter(&mut buffer, 48_000.0, settings);

        let ceiling = 10.0_f64.powf(ceiling_db / 20.0) as f32;
        for &s in &buffer[4_800..] {
            prop_assert!(s <= ceiling + 1e-3, "{} above {}", s, ceiling);
        }
    }
}

// ========== Rendering ==========

#[test]
fn render_is_deterministic() {
    let left = generate_noise(48_000, 0.6, 11);
    let right = generate_noise(48_000, 0.6, 23);
    let params = MasteringParams::default().with_gain_adjustment_db(3.0);

    let (mut l1, mut r1) = (left.clone(), right.clone());
    let (mut l2, mut r2) = (left, right);
    render(&mut l1, &mut r1, 48_000, &params).unwrap();
    render(&mut l2, &mut r2, 48_000, &params).unwrap();

    assert_eq!(l1, l2);
    assert_eq!(r1, r2);
}

#[test]
fn stage_order_is_canonical() {
    let processor = ChannelProcessor::new(&MasteringParams::default(), 44_100.0);
    assert_eq!(
        processor.stage_names(),
        ["gain", "tube", "pultec", "clipper", "limiter", "neuro-drive"]
    );
}

#[test]
fn out_of_range_params_are_clamped_not_rejected() {
    let tone = generate_sine(48_000, 440.0, 0.3, 0.5);
    let wild = MasteringParams {
        tube_drive_amount: 7.0,
        low_contour_amount: -4.0,
        ..MasteringParams::default()
    };
    let tame = MasteringParams {
        tube_drive_amount: 1.0,
        low_contour_amount: 0.0,
        ..MasteringParams::default()
    };

    let (mut l1, mut r1) = (tone.clone(), tone.clone());
    let (mut l2, mut r2) = (tone.clone(), tone);
    render(&mut l1, &mut r1, 48_000, &wild).unwrap();
    render(&mut l2, &mut r2, 48_000, &tame).unwrap();
    assert_eq!(l1, l2);
}

#[test]
fn render_rejects_bad_buffers() {
    let params = MasteringParams::default();
    let mut short = vec![0.0_f32; 10];
    let mut long = vec![0.0_f32; 11];
    assert!(matches!(
        render(&mut short, &mut long, 48_000, &params),
        Err(NeuroError::ChannelLengthMismatch { left: 10, right: 11 })
    ));
    assert!(matches!(
        render(&mut [], &mut [], 48_000, &params),
        Err(NeuroError::EmptyBuffer)
    ));
}

// ========== Optimizer ==========

#[test]
fn render_stays_finite_where_drive_shelf_is_unstable() {
    // 12 kHz sits close enough to Nyquist here that the shelf would blow up
    for sample_rate in [24_000, 27_000, 28_000, 28_700, 30_000, 32_000] {
        let mut left = generate_sine(sample_rate, 440.0, 0.5, 1.0);
        let mut right = left.clone();
        render(&mut left, &mut right, sample_rate, &MasteringParams::default()).unwrap();

        let peak = left.iter().chain(&right).fold(0.0_f32, |m, s| m.max(s.abs()));
        assert!(
            left.iter().chain(&right).all(|s| s.is_finite()),
            "non-finite output at {} Hz",
            sample_rate
        );
        assert!(peak < 1.5, "peak {} at {} Hz", peak, sample_rate);
    }
}

#[test]
fn optimizer_converges_on_reachable_target() {
    let tone = generate_sine(48_000, 1000.0, 0.1, 2.0);
    let initial = MasteringParams::default();

    let result = optimize(&tone, &tone, 48_000, -14.0, &initial).unwrap();

    assert!(result.converged, "{}", result);
    assert!((result.achieved_lufs + 14.0).abs() <= 0.05);
    assert!(result.iterations >= 1 && result.iterations <= OPTIMIZER_MAX_ITERATIONS);
    assert!((-12.0..=12.0).contains(&result.params.gain_adjustment_db));
    // Only the gain moves
    assert_eq!(result.params.tube_drive_amount, initial.tube_drive_amount);
    assert_eq!(result.params.low_contour_amount, initial.low_contour_amount);
    assert_eq!(result.params.limiter_ceiling_db, initial.limiter_ceiling_db);
    // The caller's value is untouched
    assert_eq!(initial, MasteringParams::default());
}

#[test]
fn optimizer_gives_up_on_unreachable_target() {
    let tone = generate_sine(48_000, 1000.0, 0.1, 2.0);

    let up = MasteringParams::default().with_gain_adjustment_db(11.0);
    let result = optimize(&tone, &tone, 48_000, 100.0, &up).unwrap();
    assert_eq!(result.iterations, 50);
    assert!(!result.converged);
    assert_eq!(result.params.gain_adjustment_db, 12.0);

    let down = MasteringParams::default().with_gain_adjustment_db(-11.0);
    let result = optimize(&tone, &tone, 48_000, -100.0, &down).unwrap();
    assert_eq!(result.iterations, 50);
    assert_eq!(result.params.gain_adjustment_db, -12.0);
}

#[test]
fn full_scale_sine_cannot_reach_streaming_target_in_fifty_steps() {
    // Fifty 0.1 dB steps cover 5 dB; the limiter keeps a full-scale sine
    // far above -14 over that range.
    let tone = generate_sine(48_000, 1000.0, 1.0, 2.0);
    let result = optimize(&tone, &tone, 48_000, -14.0, &MasteringParams::default()).unwrap();

    assert_eq!(result.iterations, 50);
    assert!(!result.converged);
    assert!((result.params.gain_adjustment_db + 5.0).abs() < 1e-9);
    assert!(result.achieved_lufs > -10.0);
}

#[test]
fn optimizer_only_hears_the_centered_excerpt() {
    // 12 s at 8 kHz: the optimizer renders samples 8_000..88_000
    let sample_rate = 8_000;
    let tone = generate_sine(sample_rate, 440.0, 0.1, 12.0);
    let mut noisy = tone.clone();
    let (head, rest) = noisy.split_at_mut(8_000);
    for s in head.iter_mut().chain(rest[80_000..].iter_mut()) {
        *s = 0.9;
    }

    let mut optimizer = GainOptimizer::new(sample_rate).unwrap();
    assert_eq!(optimizer.excerpt_range(tone.len()), 8_000..88_000);

    let params = MasteringParams::default();
    let clean = optimizer.optimize(&tone, &tone, -14.0, &params).unwrap();
    let dirty = optimizer.optimize(&noisy, &noisy, -14.0, &params).unwrap();
    assert_eq!(clean, dirty);
}

// ========== End to End ==========

#[test]
fn master_lands_on_optimizer_reading() {
    let tone = generate_sine(48_000, 1000.0, 0.1, 2.0);
    let mut buffer = StereoBuffer::new(tone.clone(), tone, SampleRate::DVD_QUALITY).unwrap();

    let outcome = MasteringEngine::new()
        .master(&mut buffer, &MasteringParams::default(), Some(-14.0))
        .unwrap();
    let optimization = outcome.optimization.unwrap();

    assert!(optimization.converged);
    // The whole buffer fits in the excerpt, so the final render is the last
    // optimizer render
    assert!((outcome.final_lufs - optimization.achieved_lufs).abs() <= 0.1);
    assert_eq!(
        outcome.final_lufs,
        measure_loudness(buffer.left(), buffer.right(), 48_000).unwrap()
    );
    assert!(buffer.peak() <= 1.0);
}
