//! Letter melodies: lowercase text to a seven-pitch tune and back

use crate::audioexport::{export_mp3, AudioExportError};
use crate::config::SessionConfig;
use melody_core::{EventSequence, LetterMap, MidiContainer};
use std::path::{Path, PathBuf};

/// Files written by one encode
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFiles {
    pub midi: PathBuf,
    pub mp3: PathBuf,
    pub notes: usize,
}

/// One event per lowercase letter; everything else is skipped
pub fn encode_letters(text: &str, config: &SessionConfig) -> EventSequence {
    EventSequence::from_text(text, &LetterMap, config.ticks_per_note, config.velocity)
}

/// Encode `text` to the configured MIDI file and render it to the configured MP3
pub fn text_to_melody(text: &str, config: &SessionConfig) -> Result<EncodedFiles, AudioExportError> {
    config.validate()?;

    let container = MidiContainer::new(encode_letters(text, config));
    let midi = config.midi_path();
    let mp3 = config.mp3_path();

    container.save(&midi)?;
    export_mp3(&container, config, &mp3)?;

    Ok(EncodedFiles {
        midi,
        mp3,
        notes: container.events.len(),
    })
}

/// Decode a MIDI file with the letter table; lossy by construction
pub fn decode_midi(path: &Path) -> Result<String, AudioExportError> {
    let container = MidiContainer::from_file(path)?;
    Ok(container.events.decode_with(&LetterMap))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> SessionConfig {
        SessionConfig {
            work_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_letters_examples() {
        let config = SessionConfig::default();
        assert_eq!(encode_letters("ab", &config).note_codes(), vec![60, 60]);
        assert_eq!(encode_letters("az", &config).note_codes(), vec![60, 71]);
    }

    #[test]
    fn test_encode_uses_configured_note_shape() {
        let config = SessionConfig {
            ticks_per_note: 240,
            velocity: 90,
            ..Default::default()
        };
        let events = encode_letters("q", &config);
        let event = events.iter().next().unwrap();
        assert_eq!(event.duration, 240);
        assert_eq!(event.velocity, 90);
    }

    #[test]
    fn test_text_to_melody_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let files = text_to_melody("hello world", &config).unwrap();
        assert_eq!(files.midi, dir.path().join("output.mid"));
        assert_eq!(files.mp3, dir.path().join("output.mp3"));
        assert_eq!(files.notes, 10);
        assert!(files.midi.exists());
        assert!(std::fs::metadata(&files.mp3).unwrap().len() > 0);
    }

    #[test]
    fn test_decode_length_matches_events() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let files = text_to_melody("the quick brown fox", &config).unwrap();
        let decoded = decode_midi(&files.midi).unwrap();
        assert_eq!(decoded.chars().count(), files.notes);
        assert_eq!(decode_midi(&files.midi).unwrap(), "qeequiaiaqmumemu");
    }

    #[test]
    fn test_decode_is_lossy_not_identity() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        text_to_melody("abz", &config).unwrap();
        assert_eq!(decode_midi(&config.midi_path()).unwrap(), "aay");
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            mp3_bitrate: 1,
            ..config_in(dir.path())
        };

        assert!(text_to_melody("abc", &config).is_err());
        assert!(!config.midi_path().exists());
    }
}
