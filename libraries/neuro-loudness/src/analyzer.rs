//! EBU R128 loudness analysis for the mastering report
//!
//! This module wraps the ebur128 crate to describe a finished master:
//! - Integrated loudness (LUFS) - gated, K-weighted
//! - Loudness range (LRA)
//! - True peak (dBTP) - 4x oversampled inter-sample peak
//! - Sample peak (dBFS)
//!
//! These figures are informational. The gain optimizer never reads them; it
//! steers by [`crate::LoudnessMeter`].

use crate::error::{LoudnessError, Result};
use ebur128::{EbuR128, Mode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// EBU R128 description of a stereo buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoudnessReport {
    /// Integrated loudness in LUFS (gated)
    pub integrated_lufs: f64,

    /// Loudness range in LU
    pub loudness_range_lu: f64,

    /// True peak in dBTP
    pub true_peak_dbtp: f64,

    /// Sample peak in dBFS
    pub sample_peak_dbfs: f64,

    /// Duration of the analyzed audio in seconds
    pub duration_seconds: f64,
}

impl fmt::Display for LoudnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Integrated: {:.1} LUFS, Range: {:.1} LU, True Peak: {:.1} dBTP, Sample Peak: {:.1} dBFS",
            self.integrated_lufs,
            self.loudness_range_lu,
            self.true_peak_dbtp,
            self.sample_peak_dbfs
        )
    }
}

/// EBU R128 analyzer for stereo material
///
/// # Example
///
/// ```rust
/// use neuro_loudness::LoudnessAnalyzer;
///
/// let tone: Vec<f32> = (0..48_000 * 3)
///     .map(|i| 0.1 * (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / 48_000.0).sin())
///     .collect();
///
/// let mut analyzer = LoudnessAnalyzer::new(48_000).unwrap();
/// analyzer.add_stereo(&tone, &tone).unwrap();
/// let report = analyzer.finalize().unwrap();
/// assert!(report.integrated_lufs < -15.0);
/// ```
pub struct LoudnessAnalyzer {
    ebur128: EbuR128,
    sample_rate: u32,
    frames_processed: usize,
}

impl LoudnessAnalyzer {
    const CHANNELS: u32 = 2;

    /// Create a new stereo analyzer
    ///
    /// # Errors
    /// Returns error if the sample rate is outside 8000-384000 Hz
    pub fn new(sample_rate: u32) -> Result<Self> {
        if !(8000..=384_000).contains(&sample_rate) {
            return Err(LoudnessError::InvalidSampleRate(sample_rate));
        }

        let mode = Mode::I | Mode::LRA | Mode::SAMPLE_PEAK | Mode::TRUE_PEAK;
        let ebur128 = EbuR128::new(Self::CHANNELS, sample_rate, mode)?;

        Ok(Self {
            ebur128,
            sample_rate,
            frames_processed: 0,
        })
    }

    /// Add planar stereo samples
    pub fn add_stereo(&mut self, left: &[f32], right: &[f32]) -> Result<()> {
        if left.len() != right.len() {
            return Err(LoudnessError::ChannelLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        if left.is_empty() {
            return Ok(());
        }

        self.ebur128.add_frames_planar_f32(&[left, right])?;
        self.frames_processed += left.len();
        Ok(())
    }

    /// Finalize analysis
    ///
    /// # Errors
    /// Returns error if no samples were provided or the audio is silent
    pub fn finalize(self) -> Result<LoudnessReport> {
        if self.frames_processed == 0 {
            return Err(LoudnessError::NoSamples);
        }

        let integrated_lufs = self.ebur128.loudness_global()?;
        if integrated_lufs.is_infinite() || integrated_lufs.is_nan() {
            return Err(LoudnessError::SilentAudio);
        }

        let loudness_range_lu = self.ebur128.loudness_range().unwrap_or(0.0);

        let mut true_peak = 0.0_f64;
        let mut sample_peak = 0.0_f64;
        for ch in 0..Self::CHANNELS {
            true_peak = true_peak.max(self.ebur128.true_peak(ch).unwrap_or(0.0));
            sample_peak = sample_peak.max(self.ebur128.sample_peak(ch).unwrap_or(0.0));
        }

        let report = LoudnessReport {
            integrated_lufs,
            loudness_range_lu,
            true_peak_dbtp: linear_to_db(true_peak),
            sample_peak_dbfs: linear_to_db(sample_peak),
            duration_seconds: self.frames_processed as f64 / f64::from(self.sample_rate),
        };
        debug!("R128 analysis: {}", report);
        Ok(report)
    }
}

fn linear_to_db(linear: f64) -> f64 {
    if linear > 0.0 {
        20.0 * linear.log10()
    } else {
        -f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(amplitude: f32, sample_rate: u32, seconds: u32) -> Vec<f32> {
        (0..sample_rate * seconds)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                amplitude * (2.0 * std::f32::consts::PI * 1000.0 * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_analyzer_creation() {
        assert!(LoudnessAnalyzer::new(44_100).is_ok());
        assert!(LoudnessAnalyzer::new(48_000).is_ok());
        assert!(LoudnessAnalyzer::new(100).is_err());
        assert!(LoudnessAnalyzer::new(500_000).is_err());
    }

    #[test]
    fn test_silent_audio() {
        let mut analyzer = LoudnessAnalyzer::new(48_000).unwrap();
        let silence = vec![0.0_f32; 48_000];
        analyzer.add_stereo(&silence, &silence).unwrap();
        assert!(matches!(
            analyzer.finalize(),
            Err(LoudnessError::SilentAudio)
        ));
    }

    #[test]
    fn test_no_samples_error() {
        let analyzer = LoudnessAnalyzer::new(48_000).unwrap();
        assert!(matches!(analyzer.finalize(), Err(LoudnessError::NoSamples)));
    }

    #[test]
    fn test_mismatched_channels() {
        let mut analyzer = LoudnessAnalyzer::new(48_000).unwrap();
        assert!(analyzer.add_stereo(&[0.0; 4], &[0.0; 5]).is_err());
    }

    #[test]
    fn test_sine_wave_report() {
        let tone = sine(0.1, 48_000, 3);
        let mut analyzer = LoudnessAnalyzer::new(48_000).unwrap();
        analyzer.add_stereo(&tone, &tone).unwrap();
        let report = analyzer.finalize().unwrap();

        // -20 dBFS stereo sine sits in the low -20s LUFS
        assert!(
            report.integrated_lufs > -30.0 && report.integrated_lufs < -15.0,
            "got {:.1}",
            report.integrated_lufs
        );
        assert!(
            report.true_peak_dbtp > -25.0 && report.true_peak_dbtp < -15.0,
            "got {:.1}",
            report.true_peak_dbtp
        );
        assert!((report.duration_seconds - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_adds_count_as_no_samples() {
        let mut analyzer = LoudnessAnalyzer::new(48_000).unwrap();
        analyzer.add_stereo(&[], &[]).unwrap();
        assert!(matches!(analyzer.finalize(), Err(LoudnessError::NoSamples)));
    }

    #[test]
    fn test_report_serializes_for_the_json_report() {
        let tone = sine(0.2, 44_100, 2);
        let mut analyzer = LoudnessAnalyzer::new(44_100).unwrap();
        analyzer.add_stereo(&tone, &tone).unwrap();
        let report = analyzer.finalize().unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 5);
        assert!((json["duration_seconds"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    }
}
