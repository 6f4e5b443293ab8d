/// Job execution: read, master, write, report
use crate::config::MasterConfig;
use crate::error::Result;
use crate::job::{MasteringJob, ParamOverrides};
use crate::report::MasteringReport;
use crate::wav::{read_wav, write_wav};
use neuro_core::StereoBuffer;
use neuro_dsp::MasteringEngine;
use neuro_loudness::{LoudnessAnalyzer, LoudnessReport};
use tracing::{info, warn};

/// Run one job with `config` underneath it
///
/// `cli` overrides sit on top of the job's own parameters.
pub fn run_job(
    job: &MasteringJob,
    config: &MasterConfig,
    cli: ParamOverrides,
) -> Result<MasteringReport> {
    job.validate()?;

    let params = job.params.merged_with(cli).apply(config.default_params);
    let target_lufs = job.target_lufs.or(config.default_target_lufs);
    info!(input = %job.input.display(), %params, ?target_lufs, "mastering job");

    let mut buffer = read_wav(&job.input)?;
    let sample_rate = buffer.sample_rate().as_hz();
    let duration_seconds = buffer.duration_secs();

    let outcome = MasteringEngine::new().master(&mut buffer, &params, target_lufs)?;
    if let Some(result) = outcome.optimization.filter(|r| !r.converged) {
        warn!(%result, "optimizer did not reach the target; rendering with its last step");
    }

    write_wav(&job.output, &buffer, config.output_format)?;
    info!(output = %job.output.display(), final_lufs = outcome.final_lufs, "output written");

    let report = MasteringReport::new(
        &job.input,
        &job.output,
        sample_rate,
        duration_seconds,
        target_lufs,
        &outcome,
    )
    .with_r128(analyze_r128(&buffer));

    if config.report {
        let path = job.report_path();
        report.write(&path)?;
        info!(report = %path.display(), "report written");
    }

    Ok(report)
}

/// EBU R128 figures for the report; failures are logged, not fatal
pub fn analyze_r128(buffer: &StereoBuffer) -> Option<LoudnessReport> {
    let analysis = LoudnessAnalyzer::new(buffer.sample_rate().as_hz()).and_then(|mut analyzer| {
        analyzer.add_stereo(buffer.left(), buffer.right())?;
        analyzer.finalize()
    });

    match analysis {
        Ok(report) => Some(report),
        Err(e) => {
            warn!(error = %e, "EBU R128 analysis unavailable");
            None
        }
    }
}
