//! Letter melody tool
//!
//! Lowercase text is folded onto seven C-major pitches, written as a MIDI
//! file, and synthesized to MP3. The menu in [`menu`] drives encoding,
//! decoding either file back to text, and removing what earlier runs left.

pub mod audioexport;
pub mod audioimport;
pub mod cleanup;
pub mod config;
pub mod melody;
pub mod menu;

pub use audioexport::AudioExportError;
pub use config::SessionConfig;
pub use melody::{decode_midi, encode_letters, text_to_melody, EncodedFiles};
pub use menu::{run_menu, MenuChoice};
