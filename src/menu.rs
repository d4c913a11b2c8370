//! Numbered menu loop for the letter melody tool.
//!
//! Each pass waits for a choice, runs exactly one operation, reports the
//! result, and comes back to the menu. A failed operation is reported and the
//! loop continues; only `Exit` or the end of input leaves it.

use crate::audioexport::AudioExportError;
use crate::audioimport::mp3_to_text;
use crate::cleanup::{remove_generated, GENERATED_EXTENSIONS};
use crate::config::SessionConfig;
use crate::melody::{decode_midi, text_to_melody};
use melody_core::Console;
use std::io::{self, BufRead, Write};

const MENU: &str = "\
Text Melody
  1. Encode text to MIDI and MP3
  2. Decode MIDI to text
  3. Decode MP3 to text
  4. Remove generated files
  5. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EncodeText,
    DecodeMidi,
    DecodeMp3,
    Cleanup,
    Exit,
}

impl MenuChoice {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(MenuChoice::EncodeText),
            "2" => Some(MenuChoice::DecodeMidi),
            "3" => Some(MenuChoice::DecodeMp3),
            "4" => Some(MenuChoice::Cleanup),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum MenuError {
    #[error("Input ended")]
    EndOfInput,

    #[error(transparent)]
    Export(#[from] AudioExportError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Run the menu until the user exits or input runs out
pub fn run_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &SessionConfig,
) -> io::Result<()> {
    loop {
        console.say(MENU)?;
        let Some(answer) = console.choose("Enter your choice (1-5): ")? else {
            break;
        };

        let Some(choice) = MenuChoice::parse(&answer) else {
            console.say("Invalid choice. Please enter a number from 1 to 5.")?;
            continue;
        };

        if choice == MenuChoice::Exit {
            console.say("Goodbye!")?;
            break;
        }

        match perform(console, config, choice) {
            Ok(()) => {}
            Err(MenuError::EndOfInput) => break,
            Err(e) => {
                log::error!("{:?} failed: {}", choice, e);
                console.say(format!("Error: {}", e))?;
            }
        }
    }
    Ok(())
}

fn perform<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &SessionConfig,
    choice: MenuChoice,
) -> Result<(), MenuError> {
    match choice {
        MenuChoice::EncodeText => {
            let text = ask(console, "Enter the text to encode: ")?;
            let files = text_to_melody(&text, config)?;
            console.say(format!("Encoded {} note(s).", files.notes))?;
            console.say(format!("MIDI saved to: {}", files.midi.display()))?;
            console.say(format!("MP3 saved to: {}", files.mp3.display()))?;
        }
        MenuChoice::DecodeMidi => {
            let answer = ask(
                console,
                &format!("Enter the MIDI filename (blank for {}): ", config.midi_file),
            )?;
            let path = config.resolve(&answer, config.midi_path());
            let text = decode_midi(&path)?;
            console.say(format!("Decoded text: {}", text))?;
        }
        MenuChoice::DecodeMp3 => {
            let answer = ask(
                console,
                &format!("Enter the MP3 filename (blank for {}): ", config.mp3_file),
            )?;
            let path = config.resolve(&answer, config.mp3_path());
            let text = mp3_to_text(&path, config)?;
            console.say(format!("Decoded text: {}", text))?;
        }
        MenuChoice::Cleanup => {
            let removed = remove_generated(&config.work_dir, &GENERATED_EXTENSIONS)?;
            for path in &removed {
                console.say(format!("Removed {}", path.display()))?;
            }
            console.say(format!("Removed {} generated file(s).", removed.len()))?;
        }
        MenuChoice::Exit => {}
    }
    Ok(())
}

fn ask<R: BufRead, W: Write>(console: &mut Console<R, W>, prompt: &str) -> Result<String, MenuError> {
    console.ask(prompt)?.ok_or(MenuError::EndOfInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::EncodeText));
        assert_eq!(MenuChoice::parse(" 4 "), Some(MenuChoice::Cleanup));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }
}
