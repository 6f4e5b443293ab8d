//! Neuro-Master job runner
//!
//! Reads a WAV file, runs it through the mastering engine (optionally
//! steering to a loudness target), writes the master and a JSON report.
//!
//! This library exposes the pieces for testing.

pub mod config;
pub mod error;
pub mod job;
pub mod pipeline;
pub mod report;
pub mod wav;

pub use config::{MasterConfig, OutputFormat};
pub use error::{MasterError, Result};
pub use job::{MasteringJob, ParamOverrides};
pub use pipeline::{analyze_r128, run_job};
pub use report::MasteringReport;
