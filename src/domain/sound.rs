//! Sound records.
//!
//! A sound is either a raw capture or a processed variant of another sound.
//! Both share the base record; the kind-specific fields live in
//! [`SoundDetails`].

use chrono::NaiveDateTime;

use crate::library::ContentHash;

/// Format used for `recorded_at` in listings and info output
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File-name timestamp pattern of raw captures (`YYMMDD-HHMMSS`)
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%y%m%d-%H%M%S";

/// A cataloged sound
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    /// SHA-256 of the file content (primary key)
    pub hash: ContentHash,

    /// User-facing name
    pub name: String,

    /// Path relative to the library root (`./`-prefixed)
    pub path: String,

    /// Duration in seconds
    pub duration: f64,

    /// Kind-specific fields
    pub details: SoundDetails,

    /// Tag names, ordered by name
    pub tags: Vec<String>,
}

/// Kind-specific part of a sound
#[derive(Debug, Clone, PartialEq)]
pub enum SoundDetails {
    /// Direct capture from a recorder
    Raw {
        recorded_at: NaiveDateTime,
        location: String,
    },

    /// Derived from another sound (raw or processed)
    Processed {
        origin: ContentHash,
        intensity: Option<f64>,
    },
}

impl SoundDetails {
    pub fn kind(&self) -> SoundKind {
        match self {
            SoundDetails::Raw { .. } => SoundKind::Raw,
            SoundDetails::Processed { .. } => SoundKind::Processed,
        }
    }
}

/// Discriminator stored in the `kind` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    Raw,
    Processed,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Raw => "raw",
            SoundKind::Processed => "processed",
        }
    }
}

impl std::fmt::Display for SoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SoundKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(SoundKind::Raw),
            "processed" => Ok(SoundKind::Processed),
            _ => anyhow::bail!("Unknown sound kind: {}", s),
        }
    }
}

impl Sound {
    /// Create a raw sound record
    pub fn raw(
        hash: ContentHash,
        name: impl Into<String>,
        path: impl Into<String>,
        duration: f64,
        recorded_at: NaiveDateTime,
        location: impl Into<String>,
    ) -> Self {
        Self {
            hash,
            name: name.into(),
            path: path.into(),
            duration,
            details: SoundDetails::Raw {
                recorded_at,
                location: location.into(),
            },
            tags: Vec::new(),
        }
    }

    /// Create a processed sound record derived from `origin`
    pub fn processed(
        hash: ContentHash,
        name: impl Into<String>,
        path: impl Into<String>,
        duration: f64,
        origin: ContentHash,
    ) -> Self {
        Self {
            hash,
            name: name.into(),
            path: path.into(),
            duration,
            details: SoundDetails::Processed {
                origin,
                intensity: None,
            },
            tags: Vec::new(),
        }
    }

    /// Set the intensity of a processed sound (no-op for raw sounds)
    pub fn with_intensity(mut self, value: f64) -> Self {
        if let SoundDetails::Processed { intensity, .. } = &mut self.details {
            *intensity = Some(value);
        }
        self
    }

    pub fn kind(&self) -> SoundKind {
        self.details.kind()
    }

    /// Hash of the sound this one derives from, if processed
    pub fn origin(&self) -> Option<&ContentHash> {
        match &self.details {
            SoundDetails::Processed { origin, .. } => Some(origin),
            SoundDetails::Raw { .. } => None,
        }
    }
}

/// Parse the capture timestamp from a raw file name.
///
/// The extension is stripped and the remaining stem must be exactly
/// `YYMMDD-HHMMSS`, e.g. `180101-123456.wav`.
pub fn parse_recorded_at(file_name: &str) -> Option<NaiveDateTime> {
    let stem = std::path::Path::new(file_name).file_stem()?.to_str()?;
    NaiveDateTime::parse_from_str(stem, FILENAME_TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hash(seed: u8) -> ContentHash {
        ContentHash::from_digest(&[seed; 32])
    }

    #[test]
    fn test_parse_recorded_at() {
        let expected = NaiveDate::from_ymd_opt(2018, 1, 1)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap();

        assert_eq!(parse_recorded_at("180101-123456.wav"), Some(expected));
        assert_eq!(parse_recorded_at("180101-123456.WAV"), Some(expected));
        assert_eq!(parse_recorded_at("180101-123456"), Some(expected));
    }

    #[test]
    fn test_parse_recorded_at_rejects_other_names() {
        assert_eq!(parse_recorded_at("my sound.wav"), None);
        assert_eq!(parse_recorded_at("181301-123456.wav"), None);
        assert_eq!(parse_recorded_at("180101-123456-take2.wav"), None);
        assert_eq!(parse_recorded_at(""), None);
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!("raw".parse::<SoundKind>().unwrap(), SoundKind::Raw);
        assert_eq!("Processed".parse::<SoundKind>().unwrap(), SoundKind::Processed);
        assert!("midi".parse::<SoundKind>().is_err());
        assert_eq!(SoundKind::Processed.to_string(), "processed");
    }

    #[test]
    fn test_processed_sound_origin_and_intensity() {
        let sound = Sound::processed(hash(2), "Reverb", "./p.wav", 1.5, hash(1)).with_intensity(0.8);

        assert_eq!(sound.kind(), SoundKind::Processed);
        assert_eq!(sound.origin(), Some(&hash(1)));
        assert!(matches!(
            sound.details,
            SoundDetails::Processed { intensity: Some(i), .. } if (i - 0.8).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn test_intensity_ignored_for_raw() {
        let at = NaiveDate::from_ymd_opt(2018, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let sound = Sound::raw(hash(1), "Field", "./r.wav", 2.0, at, "Zurich").with_intensity(1.0);
        assert_eq!(sound.origin(), None);
        assert_eq!(sound.kind(), SoundKind::Raw);
    }
}
