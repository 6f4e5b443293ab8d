/// WAV file reading and writing
///
/// Integer PCM is normalized to `[-1, 1)` on the way in (16, 24 and 32 bit),
/// 32-bit float passes through. Mono files become identical left/right
/// channels; channels past the second are dropped.
use crate::config::OutputFormat;
use crate::error::{MasterError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use neuro_core::{
    normalize_f32, normalize_i16, normalize_i24, normalize_i32, SampleRate, StereoBuffer,
};
use std::path::Path;
use tracing::debug;

/// Read a WAV file into a stereo buffer
pub fn read_wav(path: &Path) -> Result<StereoBuffer> {
    let mut reader = WavReader::open(path).map_err(|e| MasterError::wav(path, e))?;
    let spec = reader.spec();
    debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "reading WAV"
    );

    let samples: std::result::Result<Vec<f32>, hound::Error> =
        match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .map(|s| s.map(normalize_f32))
                .collect(),
            (SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .map(|s| s.map(normalize_i16))
                .collect(),
            (SampleFormat::Int, 24) => reader
                .samples::<i32>()
                .map(|s| s.map(normalize_i24))
                .collect(),
            (SampleFormat::Int, 32) => reader
                .samples::<i32>()
                .map(|s| s.map(normalize_i32))
                .collect(),
            (format, bits) => {
                return Err(MasterError::UnsupportedFormat {
                    bits,
                    format: match format {
                        SampleFormat::Float => "float",
                        SampleFormat::Int => "integer",
                    },
                })
            }
        };
    let samples = samples.map_err(|e| MasterError::wav(path, e))?;

    Ok(StereoBuffer::from_interleaved(
        &samples,
        spec.channels,
        SampleRate::new(spec.sample_rate),
    )?)
}

/// Write a stereo buffer as an interleaved two-channel WAV file
pub fn write_wav(path: &Path, buffer: &StereoBuffer, format: OutputFormat) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate: buffer.sample_rate().as_hz(),
        bits_per_sample: format.bits_per_sample(),
        sample_format: match format {
            OutputFormat::Float32 => SampleFormat::Float,
            OutputFormat::Int16 => SampleFormat::Int,
        },
    };
    debug!(path = %path.display(), ?format, frames = buffer.len(), "writing WAV");

    let mut writer = WavWriter::create(path, spec).map_err(|e| MasterError::wav(path, e))?;
    for sample in buffer.to_interleaved() {
        let written = match format {
            OutputFormat::Float32 => writer.write_sample(sample),
            OutputFormat::Int16 => writer.write_sample(to_i16(sample)),
        };
        written.map_err(|e| MasterError::wav(path, e))?;
    }
    writer.finalize().map_err(|e| MasterError::wav(path, e))
}

/// Clamp to `[-1, 1]` and scale to 16-bit
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}
