/// Biquad filter
///
/// Second-order IIR sections built from the audio-EQ-cookbook formulas and run
/// as a direct form I difference equation. Coefficients are immutable once
/// computed; the delay line lives in a separate [`FilterState`] owned by one
/// pass over one channel.
use std::f64::consts::PI;

/// Normalized biquad coefficients (`a0` divided out)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

/// Delay line of one biquad: two past inputs, two past outputs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl FilterState {
    /// Zero the delay line
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl BiquadCoefficients {
    /// Second-order high-pass at `freq` Hz
    pub fn high_pass(freq: f64, sample_rate: f64, q: f64) -> Self {
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        Self {
            b0: (1.0 + cos_w0) / 2.0 / a0,
            b1: -(1.0 + cos_w0) / a0,
            b2: (1.0 + cos_w0) / 2.0 / a0,
            a1: -2.0 * cos_w0 / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// Peaking bell at `freq` Hz with `gain_db` boost/cut
    pub fn peaking(freq: f64, sample_rate: f64, q: f64, gain_db: f64) -> Self {
        let a = 10.0_f64.powf(gain_db / 40.0);
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha / a;

        Self {
            b0: (1.0 + alpha * a) / a0,
            b1: (-2.0 * cos_w0) / a0,
            b2: (1.0 - alpha * a) / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha / a) / a0,
        }
    }

    /// High shelf at `freq` Hz with `gain_db` boost/cut and shelf slope S = 1
    ///
    /// The normalizing `a0` uses `(A+1) + (A-1)·cos w0`. At the 12 kHz / 48 kHz
    /// operating point `cos w0 = 0` and this coincides with the cookbook form;
    /// elsewhere it shifts the shelf's upper plateau slightly. The rendered
    /// sound is defined by this exact formula.
    pub fn high_shelf(freq: f64, sample_rate: f64, gain_db: f64) -> Self {
        let a = 10.0_f64.powf(gain_db / 40.0);
        let sqrt_a = a.sqrt();
        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() * 0.5;
        let beta = 2.0 * sqrt_a * alpha;
        let a0 = (a + 1.0) + (a - 1.0) * cos_w0 + beta;

        Self {
            b0: (a * ((a + 1.0) + (a - 1.0) * cos_w0 + beta)) / a0,
            b1: (-2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0)) / a0,
            b2: (a * ((a + 1.0) + (a - 1.0) * cos_w0 - beta)) / a0,
            a1: (2.0 * ((a - 1.0) - (a + 1.0) * cos_w0)) / a0,
            a2: ((a + 1.0) - (a - 1.0) * cos_w0 - beta) / a0,
        }
    }

    /// Filter `buffer` in place, strictly front to back
    ///
    /// Each output depends on the two previous inputs and outputs, so this loop
    /// cannot be split or reordered.
    pub fn apply(&self, buffer: &mut [f32], state: &mut FilterState) {
        let FilterState {
            mut x1,
            mut x2,
            mut y1,
            mut y2,
        } = *state;

        for sample in buffer.iter_mut() {
            let x0 = f64::from(*sample);
            let y0 = self.b0 * x0 + self.b1 * x1 + self.b2 * x2 - self.a1 * y1 - self.a2 * y2;
            x2 = x1;
            x1 = x0;
            y2 = y1;
            y1 = y0;
            *sample = y0 as f32;
        }

        *state = FilterState { x1, x2, y1, y2 };
    }

    /// Magnitude response in dB at `freq` Hz
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * freq / sample_rate;
        let (cos1, sin1) = (w.cos(), w.sin());
        let (cos2, sin2) = ((2.0 * w).cos(), (2.0 * w).sin());

        let num_re = self.b0 + self.b1 * cos1 + self.b2 * cos2;
        let num_im = -(self.b1 * sin1 + self.b2 * sin2);
        let den_re = 1.0 + self.a1 * cos1 + self.a2 * cos2;
        let den_im = -(self.a1 * sin1 + self.a2 * sin2);

        let num = (num_re * num_re + num_im * num_im).sqrt();
        let den = (den_re * den_re + den_im * den_im).sqrt();
        20.0 * (num / den).log10()
    }

    /// Whether both poles lie inside the unit circle
    ///
    /// Uses the stability triangle `|a2| < 1`, `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: f64 = 48_000.0;

    #[test]
    fn high_pass_blocks_dc_passes_highs() {
        let hpf = BiquadCoefficients::high_pass(30.0, FS, 0.707);
        assert!(hpf.magnitude_db(1.0, FS) < -50.0);
        assert!(hpf.magnitude_db(1000.0, FS).abs() < 0.05);
        // Butterworth: -3 dB at cutoff
        assert!((hpf.magnitude_db(30.0, FS) + 3.0).abs() < 0.1);
    }

    #[test]
    fn peaking_hits_gain_at_center() {
        let peak = BiquadCoefficients::peaking(55.0, FS, 0.9, 2.5);
        assert!((peak.magnitude_db(55.0, FS) - 2.5).abs() < 0.01);
        assert!(peak.magnitude_db(5000.0, FS).abs() < 0.05);
    }

    #[test]
    fn peaking_zero_gain_is_identity() {
        let peak = BiquadCoefficients::peaking(55.0, FS, 0.9, 0.0);
        assert!((peak.b0 - 1.0).abs() < 1e-12);
        assert!((peak.b1 - peak.a1).abs() < 1e-12);
        assert!((peak.b2 - peak.a2).abs() < 1e-12);
    }

    #[test]
    fn high_shelf_boosts_top_end() {
        let shelf = BiquadCoefficients::high_shelf(12_000.0, FS, 4.5);
        assert!(shelf.magnitude_db(100.0, FS).abs() < 0.1);
        assert!((shelf.magnitude_db(23_000.0, FS) - 4.5).abs() < 0.3);
    }

    #[test]
    fn high_shelf_stability_tracks_sample_rate() {
        // The 12 kHz shelf only settles once the rate clears about 28.7 kHz
        for sample_rate in [8_000.0, 22_050.0, 24_000.0, 27_000.0, 28_000.0, 28_600.0] {
            let shelf = BiquadCoefficients::high_shelf(12_000.0, sample_rate, 4.5);
            assert!(!shelf.is_stable(), "{} Hz", sample_rate);
        }
        for sample_rate in [28_700.0, 30_000.0, 44_100.0, FS, 96_000.0, 192_000.0] {
            let shelf = BiquadCoefficients::high_shelf(12_000.0, sample_rate, 4.5);
            assert!(shelf.is_stable(), "{} Hz", sample_rate);
        }
    }

    #[test]
    fn cookbook_filters_are_stable() {
        assert!(BiquadCoefficients::high_pass(30.0, FS, 0.707).is_stable());
        assert!(BiquadCoefficients::high_pass(250.0, 8_000.0, 0.707).is_stable());
        assert!(BiquadCoefficients::peaking(55.0, FS, 0.9, 2.5).is_stable());
    }

    #[test]
    fn apply_updates_state() {
        let hpf = BiquadCoefficients::high_pass(250.0, FS, 0.707);
        let mut state = FilterState::default();
        let mut buffer = vec![1.0_f32; 4];
        hpf.apply(&mut buffer, &mut state);

        assert_eq!(state.x1, 1.0);
        assert_eq!(state.x2, 1.0);
        assert_eq!(state.y1, f64::from(buffer[3]));
        // First output is b0 · x0 from a zero state
        assert!((f64::from(buffer[0]) - hpf.b0).abs() < 1e-6);

        state.reset();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn split_processing_matches_single_pass() {
        let peak = BiquadCoefficients::peaking(1000.0, FS, 1.0, 6.0);
        let input: Vec<f32> = (0..512).map(|i| ((i * 7919) % 200) as f32 / 100.0 - 1.0).collect();

        let mut whole = input.clone();
        peak.apply(&mut whole, &mut FilterState::default());

        let mut parts = input;
        let mut state = FilterState::default();
        let (a, b) = parts.split_at_mut(200);
        peak.apply(a, &mut state);
        peak.apply(b, &mut state);

        assert_eq!(whole, parts);
    }
}
