/// Neuro-Master - command-line mastering
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use neuro_dsp::ENGINE_CONSTANTS;
use neuro_loudness::LoudnessTarget;
use neuro_master::{
    analyze_r128, run_job, wav::read_wav, MasterConfig, MasteringJob, OutputFormat,
    ParamOverrides,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "neuro-master")]
#[command(about = "Deterministic two-channel mastering chain", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./neuro-master.toml when present)
    #[arg(short, long, global = true, env = "NEURO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Master a WAV file
    Master(MasterArgs),
    /// Print the loudness of a WAV file
    Measure {
        /// WAV file to measure
        input: PathBuf,
    },
    /// Print the engine's fixed constants as JSON
    Constants,
}

#[derive(Args)]
struct MasterArgs {
    /// JSON job description
    #[arg(short, long, conflicts_with_all = ["input", "output"])]
    job: Option<PathBuf>,

    /// Input WAV file
    #[arg(short, long, requires = "output")]
    input: Option<PathBuf>,

    /// Output WAV file
    #[arg(short, long, requires = "input")]
    output: Option<PathBuf>,

    /// Loudness target: streaming, broadcast, club, or a LUFS value
    #[arg(short, long, allow_hyphen_values = true)]
    target: Option<LoudnessTarget>,

    /// Tube saturation amount (0-1)
    #[arg(long)]
    drive: Option<f64>,

    /// Low contour boost in dB (0-2.5)
    #[arg(long)]
    contour: Option<f64>,

    /// Limiter ceiling in dBFS
    #[arg(long, allow_hyphen_values = true)]
    ceiling: Option<f64>,

    /// Initial make-up gain in dB
    #[arg(long, allow_hyphen_values = true)]
    gain: Option<f64>,

    /// Output sample format: float32 or int16
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Skip the JSON report
    #[arg(long)]
    no_report: bool,
}

impl MasterArgs {
    fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            tube_drive_amount: self.drive,
            low_contour_amount: self.contour,
            limiter_ceiling_db: self.ceiling,
            gain_adjustment_db: self.gain,
        }
    }

    fn job(&self) -> anyhow::Result<MasteringJob> {
        let mut job = match (&self.job, &self.input, &self.output) {
            (Some(path), _, _) => MasteringJob::from_file(path)
                .with_context(|| format!("Failed to load job {}", path.display()))?,
            (None, Some(input), Some(output)) => MasteringJob::new(input, output),
            _ => bail!("either --job or both --input and --output are required"),
        };
        if let Some(target) = self.target {
            job.target_lufs = Some(target.lufs());
        }
        Ok(job)
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neuro_master=info,neuro_dsp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Master(args) => {
            let mut config = load_config(cli.config)?;
            if let Some(format) = args.format {
                config.output_format = format;
            }
            if args.no_report {
                config.report = false;
            }

            let job = args.job()?;
            let report = run_job(&job, &config, args.overrides())
                .with_context(|| format!("Mastering {} failed", job.input.display()))?;
            println!("{}", report.to_json()?);
        }
        Commands::Measure { input } => {
            let buffer = read_wav(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let lufs = neuro_dsp::measure_loudness(
                buffer.left(),
                buffer.right(),
                buffer.sample_rate().as_hz(),
            )?;
            println!("Block loudness: {:.2} LUFS", lufs);
            if let Some(r128) = analyze_r128(&buffer) {
                println!("EBU R128:       {}", r128);
            }
        }
        Commands::Constants => {
            println!("{}", serde_json::to_string_pretty(&ENGINE_CONSTANTS)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<MasterConfig> {
    let config = match path {
        Some(path) => MasterConfig::load_from(Some(&path))
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MasterConfig::load().context("Failed to load configuration")?,
    };
    Ok(config)
}
