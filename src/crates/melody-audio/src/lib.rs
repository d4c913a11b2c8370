//! Audio side of the letter melody tool
//!
//! This crate turns note containers into sound and, as far as it reliably
//! can, sound back into notes:
//! - Render each sounding note as a fixed-amplitude sine wave
//! - Decode compressed audio files into mono PCM
//! - Recover a note per note-length window from the strongest spectral peak

pub mod pitch;
pub mod render;
pub mod samples;
pub mod voice;

pub use pitch::{transcribe, TranscribeParams};
pub use render::{render, RenderParams};
pub use samples::{load_audio, Sample};
pub use voice::{freq_to_midi, midi_to_freq, SineVoice};

/// Audio rendering and analysis errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Failed to decode audio: {0}")]
    DecodeError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AudioError>;
