/// Mono channel processor
///
/// The per-channel chain is a fixed sequence of stages, built once from a
/// parameter set and a sample rate:
///
/// ```text
/// gain -> tube -> pultec -> clipper -> limiter -> neuro-drive
/// ```
///
/// The order is part of the sound. Stages hold only immutable coefficients
/// and tables; every filter pass starts from a zeroed delay line, so one
/// processor can run over Mid and Side at the same time.
use crate::constants::{CLIPPER_THRESHOLD, LIMITER_ATTACK_MS};
use crate::drive::NeuroDrive;
use crate::limiter::{apply_limiter, LimiterSettings};
use crate::pultec::PultecLowEnd;
use crate::wave_shaper::WaveShaperCurve;
use neuro_core::MasteringParams;

/// One stage of the per-channel chain
///
/// # Thread safety
/// Stages are shared by reference between the Mid and Side passes, so
/// `process` takes `&self` and must keep any running state local to the call.
pub trait ChannelStage: Send + Sync {
    /// Process one channel in place
    fn process(&self, buffer: &mut [f32]);

    /// Stage name (for logging and tests)
    fn name(&self) -> &'static str;
}

/// Linear make-up gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MakeupGain {
    gain: f64,
}

impl MakeupGain {
    pub fn from_db(gain_db: f64) -> Self {
        Self {
            gain: 10.0_f64.powf(gain_db / 20.0),
        }
    }

    pub fn linear(&self) -> f64 {
        self.gain
    }
}

impl ChannelStage for MakeupGain {
    fn process(&self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = (f64::from(*sample) * self.gain) as f32;
        }
    }

    fn name(&self) -> &'static str {
        "gain"
    }
}

/// A wave-shaper curve with a stage name
#[derive(Debug, Clone, PartialEq)]
pub struct ShaperStage {
    name: &'static str,
    curve: WaveShaperCurve,
}

impl ShaperStage {
    pub fn tube(drive_amount: f64) -> Self {
        Self {
            name: "tube",
            curve: WaveShaperCurve::tube(drive_amount),
        }
    }

    pub fn clipper(threshold: f64) -> Self {
        Self {
            name: "clipper",
            curve: WaveShaperCurve::clipper(threshold),
        }
    }

    pub fn curve(&self) -> &WaveShaperCurve {
        &self.curve
    }
}

impl ChannelStage for ShaperStage {
    fn process(&self, buffer: &mut [f32]) {
        self.curve.apply(buffer);
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl ChannelStage for PultecLowEnd {
    fn process(&self, buffer: &mut [f32]) {
        self.apply(buffer);
    }

    fn name(&self) -> &'static str {
        "pultec"
    }
}

/// Limiter bound to a sample rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterStage {
    sample_rate: f64,
    settings: LimiterSettings,
}

impl LimiterStage {
    pub fn new(sample_rate: f64, ceiling_db: f64) -> Self {
        Self {
            sample_rate,
            settings: LimiterSettings {
                ceiling_db,
                attack_ms: LIMITER_ATTACK_MS,
            },
        }
    }
}

impl ChannelStage for LimiterStage {
    fn process(&self, buffer: &mut [f32]) {
        apply_limiter(buffer, self.sample_rate, self.settings);
    }

    fn name(&self) -> &'static str {
        "limiter"
    }
}

impl ChannelStage for NeuroDrive {
    fn process(&self, buffer: &mut [f32]) {
        self.apply(buffer);
    }

    fn name(&self) -> &'static str {
        "neuro-drive"
    }
}

/// The canonical per-channel chain for one parameter set
pub struct ChannelProcessor {
    stages: Vec<Box<dyn ChannelStage>>,
}

impl ChannelProcessor {
    /// Build the chain for `params` at `sample_rate`
    ///
    /// Drive and contour are clamped to their documented ranges here.
    pub fn new(params: &MasteringParams, sample_rate: f64) -> Self {
        let stages: Vec<Box<dyn ChannelStage>> = vec![
            Box::new(MakeupGain::from_db(params.gain_adjustment_db)),
            Box::new(ShaperStage::tube(params.clamped_tube_drive())),
            Box::new(PultecLowEnd::new(sample_rate, params.clamped_low_contour_db())),
            Box::new(ShaperStage::clipper(CLIPPER_THRESHOLD)),
            Box::new(LimiterStage::new(sample_rate, params.limiter_ceiling_db)),
            Box::new(NeuroDrive::new(sample_rate)),
        ];
        Self { stages }
    }

    /// Stage names in processing order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false for a processor built by [`ChannelProcessor::new`]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage over `channel`, in order
    pub fn process(&self, channel: &mut [f32]) {
        for stage in &self.stages {
            stage.process(channel);
        }
    }
}

impl std::fmt::Debug for ChannelProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelProcessor")
            .field("stages", &self.stage_names())
            .finish()
    }
}
