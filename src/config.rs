use crate::audioexport::AudioExportError;
use melody_core::MAX_DELTA_TICKS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File names and audio settings every menu operation works from
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub work_dir: PathBuf,
    pub midi_file: String,
    pub mp3_file: String,
    pub temp_wav_file: String,
    pub temp_midi_file: String,
    pub sample_rate: u32,
    pub amplitude: f32,
    pub mp3_bitrate: u32,
    pub ticks_per_note: u32,
    pub velocity: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            work_dir: PathBuf::from("."),
            midi_file: "output.mid".to_string(),
            mp3_file: "output.mp3".to_string(),
            temp_wav_file: "temp.wav".to_string(),
            temp_midi_file: "temp.mid".to_string(),
            sample_rate: 44100,
            amplitude: 0.5,
            mp3_bitrate: 192,
            ticks_per_note: 480,
            velocity: 100,
        }
    }
}

impl SessionConfig {
    /// Load a camelCase JSON config; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, AudioExportError> {
        let text = std::fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AudioExportError> {
        // Validate file names
        for (field, name) in [
            ("midiFile", &self.midi_file),
            ("mp3File", &self.mp3_file),
            ("tempWavFile", &self.temp_wav_file),
            ("tempMidiFile", &self.temp_midi_file),
        ] {
            if name.trim().is_empty() {
                return Err(AudioExportError::InvalidParams(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }

        // Validate sample rate
        if ![44100, 48000, 96000].contains(&self.sample_rate) {
            return Err(AudioExportError::InvalidParams(format!(
                "Sample rate must be 44100, 48000, or 96000 Hz, got {}",
                self.sample_rate
            )));
        }

        // Validate MP3 bitrate
        if ![128, 192, 256, 320].contains(&self.mp3_bitrate) {
            return Err(AudioExportError::InvalidParams(format!(
                "MP3 bitrate must be 128, 192, 256, or 320 kbps, got {}",
                self.mp3_bitrate
            )));
        }

        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(AudioExportError::InvalidParams(format!(
                "Amplitude must be in (0, 1], got {}",
                self.amplitude
            )));
        }

        if !(1..=127).contains(&self.velocity) {
            return Err(AudioExportError::InvalidParams(format!(
                "Velocity must be between 1 and 127, got {}",
                self.velocity
            )));
        }

        if self.ticks_per_note == 0 || self.ticks_per_note > MAX_DELTA_TICKS {
            return Err(AudioExportError::InvalidParams(format!(
                "Note length must be between 1 and {} ticks, got {}",
                MAX_DELTA_TICKS, self.ticks_per_note
            )));
        }

        Ok(())
    }

    pub fn midi_path(&self) -> PathBuf {
        self.work_dir.join(&self.midi_file)
    }

    pub fn mp3_path(&self) -> PathBuf {
        self.work_dir.join(&self.mp3_file)
    }

    pub fn temp_wav_path(&self) -> PathBuf {
        self.work_dir.join(&self.temp_wav_file)
    }

    pub fn temp_midi_path(&self) -> PathBuf {
        self.work_dir.join(&self.temp_midi_file)
    }

    /// Resolve a user-supplied path; blank answers fall back to `default`
    pub fn resolve(&self, answer: &str, default: PathBuf) -> PathBuf {
        let answer = answer.trim();
        if answer.is_empty() {
            default
        } else {
            let path = Path::new(answer);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.work_dir.join(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.midi_path(), PathBuf::from("./output.mid"));
        assert_eq!(config.mp3_path(), PathBuf::from("./output.mp3"));
    }

    #[test]
    fn test_params_validation() {
        let valid = SessionConfig::default();

        let invalid_rate = SessionConfig {
            sample_rate: 22050,
            ..valid.clone()
        };
        assert!(invalid_rate.validate().is_err());

        let invalid_bitrate = SessionConfig {
            mp3_bitrate: 64,
            ..valid.clone()
        };
        assert!(invalid_bitrate.validate().is_err());

        let invalid_amplitude = SessionConfig {
            amplitude: 1.5,
            ..valid.clone()
        };
        assert!(invalid_amplitude.validate().is_err());

        let invalid_velocity = SessionConfig {
            velocity: 0,
            ..valid.clone()
        };
        assert!(invalid_velocity.validate().is_err());

        let empty_name = SessionConfig {
            mp3_file: "  ".to_string(),
            ..valid.clone()
        };
        assert!(empty_name.validate().is_err());

        let zero_ticks = SessionConfig {
            ticks_per_note: 0,
            ..valid
        };
        assert!(zero_ticks.validate().is_err());
    }

    #[test]
    fn test_ticks_must_fit_midi_delta() {
        let longest = SessionConfig {
            ticks_per_note: MAX_DELTA_TICKS,
            ..Default::default()
        };
        assert!(longest.validate().is_ok());

        let overlong = SessionConfig {
            ticks_per_note: 1 << 28,
            ..Default::default()
        };
        assert!(matches!(
            overlong.validate(),
            Err(AudioExportError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_partial_json() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "mp3File": "song.mp3", "sampleRate": 48000 }"#).unwrap();
        assert_eq!(config.mp3_file, "song.mp3");
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.midi_file, "output.mid");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "workDir": "/tmp/melodies", "velocity": 90 }"#).unwrap();

        let config = SessionConfig::from_file(&path).unwrap();
        assert_eq!(config.work_dir, PathBuf::from("/tmp/melodies"));
        assert_eq!(config.velocity, 90);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SessionConfig::from_file(&path),
            Err(AudioExportError::Json(_))
        ));
    }

    #[test]
    fn test_resolve() {
        let config = SessionConfig {
            work_dir: PathBuf::from("/data"),
            ..Default::default()
        };
        assert_eq!(
            config.resolve("  ", config.midi_path()),
            PathBuf::from("/data/output.mid")
        );
        assert_eq!(
            config.resolve("song.mid", config.midi_path()),
            PathBuf::from("/data/song.mid")
        );
        assert_eq!(
            config.resolve("/elsewhere/song.mid", config.midi_path()),
            PathBuf::from("/elsewhere/song.mid")
        );
    }
}
