//! Audio duration probing.

use std::path::Path;

use thiserror::Error;

/// Errors from reading an audio file's duration
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unreadable WAV file: {0}")]
    Wav(#[from] hound::Error),

    #[error("WAV header declares a sample rate of zero")]
    InvalidSampleRate,
}

/// Something that can tell how long an audio file is
pub trait DurationProbe: Send + Sync {
    /// Duration of the file in seconds
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Reads the duration from a WAV header
#[derive(Debug, Clone, Copy, Default)]
pub struct WavProbe;

impl DurationProbe for WavProbe {
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        let reader = hound::WavReader::open(path)?;
        let sample_rate = reader.spec().sample_rate;
        if sample_rate == 0 {
            return Err(ProbeError::InvalidSampleRate);
        }

        // duration() counts frames (samples per channel)
        Ok(reader.duration() as f64 / sample_rate as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_wav(path: &Path, seconds: f64, sample_rate: u32, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let frames = (seconds * sample_rate as f64) as usize;
        for _ in 0..frames * channels as usize {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_wav_duration_mono() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mono.wav");
        write_wav(&path, 1.5, 8000, 1);

        let duration = WavProbe.probe_duration(&path).unwrap();
        assert!((duration - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_wav_duration_counts_frames_not_samples() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stereo.wav");
        write_wav(&path, 0.25, 44100, 2);

        let duration = WavProbe.probe_duration(&path).unwrap();
        assert!((duration - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_non_wav_file_is_probe_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fake.wav");
        std::fs::write(&path, b"definitely not RIFF").unwrap();

        assert!(matches!(WavProbe.probe_duration(&path), Err(ProbeError::Wav(_))));
    }
}
