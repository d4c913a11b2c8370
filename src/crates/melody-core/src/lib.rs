//! Core types shared by the text-melody tools
//!
//! This crate holds the pieces both encoders agree on: the fixed
//! character/note tables, the ordered event list built from text, and the
//! Standard MIDI File container those events are written to and read from.
//!
//! # Examples
//!
//! ```
//! use melody_core::{AsciiMap, EventSequence};
//!
//! let events = EventSequence::from_text("hi", &AsciiMap, 480, 64);
//! assert_eq!(events.note_codes(), vec![104, 105]);
//! assert_eq!(events.decode_with(&AsciiMap), "hi");
//! ```
//!
//! # Main Components
//!
//! - **CharacterNoteMap**: the `char` ↔ note code tables ([`AsciiMap`], [`LetterMap`])
//! - **NoteEvent / EventSequence**: ordered note events built from text
//! - **MidiContainer**: reading and writing event lists as MIDI files
//! - **Console**: prompt/answer helper used by both interactive sessions

pub mod console;
pub mod event;
pub mod logging;
pub mod mapping;
pub mod midi;

pub use console::Console;
pub use event::{EventSequence, NoteEvent};
pub use mapping::{AsciiMap, CharacterNoteMap, LetterMap, PLACEHOLDER, SENTINEL_NOTE};
pub use midi::{MidiContainer, DEFAULT_TEMPO, MAX_DELTA_TICKS, TICKS_PER_BEAT};

/// Errors raised while encoding text or reading note containers
#[derive(Debug, thiserror::Error)]
pub enum MelodyError {
    #[error("Unsupported input: {ch:?} at position {position} is not an ASCII character")]
    UnsupportedInput { ch: char, position: usize },

    #[error("Note code {0} does not fit in a MIDI note message")]
    NoteOutOfRange(u8),

    #[error("Note length of {0} ticks does not fit in a MIDI delta time")]
    DurationOutOfRange(u32),

    #[error("Malformed MIDI container: {0}")]
    Malformed(#[from] midly::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MelodyError>;
