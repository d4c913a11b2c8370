//! ASCII text ↔ MIDI converter library
//!
//! Every ASCII character becomes one note whose key number is the character's
//! code point, so decoding a file written here gives back the exact text.
//! Text containing anything outside ASCII is rejected before a file is created.

pub mod session;

use melody_core::{AsciiMap, EventSequence, MelodyError, MidiContainer, Result};
use std::path::Path;

pub use session::{conclude, run_session, SessionError};

/// Ticks between each note-on and its note-off
pub const NOTE_TICKS: u32 = 480;

/// Velocity used for both note-on and note-off
pub const VELOCITY: u8 = 64;

/// Turn ASCII text into one note event per character
pub fn encode_text(text: &str) -> Result<EventSequence> {
    if let Some((position, ch)) = AsciiMap::first_unsupported(text) {
        return Err(MelodyError::UnsupportedInput { ch, position });
    }
    Ok(EventSequence::from_text(text, &AsciiMap, NOTE_TICKS, VELOCITY))
}

/// Encode `text` and write it to `output`, overwriting any existing file.
///
/// Nothing is written when the text is rejected.
pub fn text_to_midi(text: &str, output: &Path) -> Result<()> {
    let events = encode_text(text)?;
    MidiContainer::new(events).save(output)
}

/// Read a MIDI file and turn each sounding note back into a character
pub fn midi_to_text(input: &Path) -> Result<String> {
    let container = MidiContainer::from_file(input)?;
    Ok(container.events.decode_with(&AsciiMap))
}
