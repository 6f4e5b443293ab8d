/// Job runner tests
/// Tests WAV round trips, job files, config layering and the written report
use hound::{SampleFormat, WavSpec, WavWriter};
use neuro_master::{
    run_job, wav::read_wav, MasterConfig, MasteringJob, MasteringReport, OutputFormat,
    ParamOverrides,
};
use std::path::Path;
use tempfile::TempDir;

/// Write a 16-bit stereo 1 kHz sine
fn write_test_wav(path: &Path, sample_rate: u32, amplitude: f32, secs: f32) {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let frames = (sample_rate as f32 * secs) as usize;
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let s = amplitude * (2.0 * std::f32::consts::PI * 1000.0 * t).sin();
        let pcm = (s * 32767.0).round() as i16;
        writer.write_sample(pcm).unwrap();
        writer.write_sample(pcm).unwrap();
    }
    writer.finalize().unwrap();
}

/// Test rendering without a target writes output and report
#[test]
fn test_render_only_job() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mix.wav");
    let output = dir.path().join("master.wav");
    write_test_wav(&input, 44_100, 0.3, 1.0);

    let job = MasteringJob::new(&input, &output);
    let report = run_job(&job, &MasterConfig::default(), ParamOverrides::default()).unwrap();

    assert!(output.exists(), "Output WAV should be written");
    assert!(output.with_extension("json").exists(), "Report should be written");
    assert_eq!(report.target_lufs, None);
    assert_eq!(report.iterations, None);
    assert_eq!(report.sample_rate, 44_100);

    let mastered = read_wav(&output).unwrap();
    assert_eq!(mastered.len(), 44_100);
    assert!(mastered.peak() <= 1.0);
}

/// Test a job file with a target reaches it and records the optimizer figures
#[test]
fn test_job_file_with_target() {
    let dir = TempDir::new().unwrap();
    write_test_wav(&dir.path().join("mix.wav"), 48_000, 0.1, 2.0);

    let job_path = dir.path().join("job.json");
    std::fs::write(
        &job_path,
        r#"{
            "input": "mix.wav",
            "output": "master.wav",
            "params": { "limiter_ceiling_db": -0.5 },
            "target_lufs": -14.0
        }"#,
    )
    .unwrap();

    let job = MasteringJob::from_file(&job_path).unwrap();
    assert_eq!(job.input, dir.path().join("mix.wav"));

    let report = run_job(&job, &MasterConfig::default(), ParamOverrides::default()).unwrap();
    assert_eq!(report.target_lufs, Some(-14.0));
    assert_eq!(report.converged, Some(true));
    let achieved = report.achieved_lufs.unwrap();
    assert!((achieved + 14.0).abs() <= 0.05, "achieved {}", achieved);
    assert!((report.final_lufs - achieved).abs() <= 0.1);
    assert!(report.r128.is_some());

    let written = MasteringReport::read(&dir.path().join("master.json")).unwrap();
    assert_eq!(written.iterations, report.iterations);
    assert!((written.params.gain_adjustment_db - report.params.gain_adjustment_db).abs() < 1e-12);
    assert!((written.final_lufs - report.final_lufs).abs() < 1e-9);
}

/// Test command-line overrides win over the job, and the job over the config
#[test]
fn test_parameter_layering() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mix.wav");
    write_test_wav(&input, 44_100, 0.2, 0.5);

    let mut job = MasteringJob::new(&input, dir.path().join("master.wav"));
    job.params = ParamOverrides {
        tube_drive_amount: Some(0.6),
        gain_adjustment_db: Some(1.0),
        ..ParamOverrides::default()
    };

    let mut config = MasterConfig::default();
    config.default_params = config
        .default_params
        .with_low_contour_amount(0.5)
        .with_tube_drive_amount(0.1);
    config.report = false;

    let cli = ParamOverrides {
        gain_adjustment_db: Some(-2.0),
        ..ParamOverrides::default()
    };

    let report = run_job(&job, &config, cli).unwrap();
    assert_eq!(report.params.low_contour_amount, 0.5);
    assert_eq!(report.params.tube_drive_amount, 0.6);
    assert_eq!(report.params.gain_adjustment_db, -2.0);
    assert!(!dir.path().join("master.json").exists(), "Report disabled");
}

/// Test int16 output format
#[test]
fn test_int16_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mix.wav");
    let output = dir.path().join("master.wav");
    write_test_wav(&input, 48_000, 0.25, 0.5);

    let config = MasterConfig {
        output_format: OutputFormat::Int16,
        report: false,
        ..MasterConfig::default()
    };
    run_job(&MasteringJob::new(&input, &output), &config, ParamOverrides::default()).unwrap();

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.spec().sample_format, SampleFormat::Int);
    assert_eq!(reader.spec().channels, 2);
}

/// Test a missing input fails without writing output
#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("master.wav");
    let job = MasteringJob::new(dir.path().join("nope.wav"), &output);

    assert!(run_job(&job, &MasterConfig::default(), ParamOverrides::default()).is_err());
    assert!(!output.exists());
}
