//! One-shot interactive session: pick encode or decode, answer its prompts,
//! and get exactly one conversion.

use crate::{midi_to_text, text_to_midi};
use melody_core::{Console, MelodyError};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid choice. Please choose 'encode' or 'decode'.")]
    InvalidOperation,

    #[error("Invalid input option. Please choose 'text' or 'txt file'.")]
    InvalidInputOption,

    #[error("Invalid output option. Please choose 'display' or 'txt file'.")]
    InvalidOutputOption,

    #[error("Input ended before the session was complete")]
    EndOfInput,

    #[error("Failed to access {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Melody(#[from] MelodyError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// Whether the user picked an option the prompt does not offer
    pub fn is_invalid_choice(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidOperation
                | SessionError::InvalidInputOption
                | SessionError::InvalidOutputOption
        )
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Encode,
    Decode,
}

impl Operation {
    fn parse(answer: &str) -> Option<Self> {
        match answer {
            "encode" => Some(Operation::Encode),
            "decode" => Some(Operation::Decode),
            _ => None,
        }
    }
}

/// Where text comes from (encode) or goes to (decode)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextEndpoint {
    Inline,
    TxtFile,
}

/// Report how a session ended and return the process exit status.
///
/// Invalid choices are shown on the console like any other prompt text;
/// other failures go to the log and stderr.
pub fn conclude<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: Result<()>,
) -> io::Result<u8> {
    match result {
        Ok(()) => Ok(0),
        Err(e) if e.is_invalid_choice() => {
            console.say(&e)?;
            Ok(1)
        }
        Err(e) => {
            log::error!("session failed: {}", e);
            eprintln!("✗ {}", e);
            Ok(1)
        }
    }
}

/// Run a single encode or decode.
///
/// Invalid choices come back as errors so the caller decides the exit status.
pub fn run_session<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let choice = required(console.choose("Choose an operation (encode or decode): ")?)?;

    match Operation::parse(&choice).ok_or(SessionError::InvalidOperation)? {
        Operation::Encode => encode(console),
        Operation::Decode => decode(console),
    }
}

fn encode<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let option = required(console.choose("Choose input option (text or txt file): ")?)?;

    let text = match parse_endpoint(&option, "text").ok_or(SessionError::InvalidInputOption)? {
        TextEndpoint::Inline => required(console.ask("Enter the text to encode: ")?)?,
        TextEndpoint::TxtFile => {
            let path = PathBuf::from(required(console.ask("Enter the path to the TXT file: ")?)?);
            read_text(&path)?
        }
    };

    let output = PathBuf::from(required(console.ask("Enter the output MIDI filename: ")?)?);

    text_to_midi(&text, &output)?;
    console.say(format!("Text encoded to MIDI: {}", output.display()))?;
    Ok(())
}

fn decode<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let input = PathBuf::from(required(console.ask("Enter the input MIDI filename: ")?)?);
    let decoded = midi_to_text(&input)?;

    let option = required(console.choose("Choose output option (display or txt file): ")?)?;

    match parse_endpoint(&option, "display").ok_or(SessionError::InvalidOutputOption)? {
        TextEndpoint::Inline => {
            console.say(format!("MIDI decoded to text:\n{}", decoded))?;
        }
        TextEndpoint::TxtFile => {
            let path = PathBuf::from(required(
                console.ask("Enter the path to save the decoded text (TXT file): ")?,
            )?);
            std::fs::write(&path, &decoded).map_err(|source| SessionError::File {
                path: path.clone(),
                source,
            })?;
            log::info!("saved {} decoded character(s) to {}", decoded.len(), path.display());
            console.say(format!("Decoded text saved to: {}", path.display()))?;
        }
    }
    Ok(())
}

fn parse_endpoint(answer: &str, inline_name: &str) -> Option<TextEndpoint> {
    if answer == inline_name {
        Some(TextEndpoint::Inline)
    } else if answer == "txt file" {
        Some(TextEndpoint::TxtFile)
    } else {
        None
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SessionError::File {
        path: path.to_path_buf(),
        source,
    })
}

fn required(answer: Option<String>) -> Result<String> {
    answer.ok_or(SessionError::EndOfInput)
}
