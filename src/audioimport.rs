//! MP3 back to text, best effort.
//!
//! The MP3 is decompressed into the temporary WAV, the WAV is transcribed
//! window by window into the temporary MIDI file, and that MIDI file is
//! decoded like any other letter melody. Encoder delay and lossy compression
//! mean the recovered text can differ from what the MIDI path would give.

use crate::audioexport::{encode_wav, AudioExportError};
use crate::config::SessionConfig;
use crate::melody::decode_midi;
use melody_audio::{load_audio, transcribe, TranscribeParams};
use melody_core::midi::tick_to_second;
use melody_core::{EventSequence, MidiContainer, NoteEvent, DEFAULT_TEMPO, TICKS_PER_BEAT};
use std::path::Path;

/// Decode a rendered letter melody from `mp3` through the configured temp files
pub fn mp3_to_text(mp3: &Path, config: &SessionConfig) -> Result<String, AudioExportError> {
    config.validate()?;

    let decompressed = load_audio(mp3)?;
    let wav = config.temp_wav_path();
    encode_wav(&decompressed.data, decompressed.sample_rate, &wav)?;

    let waveform = load_audio(&wav)?;
    let params = TranscribeParams {
        note_seconds: tick_to_second(config.ticks_per_note, TICKS_PER_BEAT as u32, DEFAULT_TEMPO),
        ..Default::default()
    };
    let notes = transcribe(&waveform, &params)?;

    let events: EventSequence = notes
        .into_iter()
        .map(|note| NoteEvent::new(note, config.velocity, config.ticks_per_note))
        .collect();
    let midi = config.temp_midi_path();
    MidiContainer::new(events).save(&midi)?;

    decode_midi(&midi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::melody::text_to_melody;

    fn config_in(dir: &Path) -> SessionConfig {
        SessionConfig {
            work_dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mp3_round_trip_recovers_pitches() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let files = text_to_melody("abz", &config).unwrap();
        let text = mp3_to_text(&files.mp3, &config).unwrap();

        assert_eq!(text, "aay");
        assert!(config.temp_wav_path().exists());
        assert!(config.temp_midi_path().exists());
    }

    #[test]
    fn test_missing_mp3() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = mp3_to_text(&dir.path().join("absent.mp3"), &config).unwrap_err();
        assert!(matches!(err, AudioExportError::Audio(_)));
        assert!(!config.temp_midi_path().exists());
    }
}
