use anyhow::Result;
use ascii_midi::{conclude, run_session};
use clap::Parser;
use melody_core::{logging, Console};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ascii-midi")]
#[command(about = "Encode ASCII text as MIDI notes, or decode a MIDI file back to text", long_about = None)]
struct Args {
    /// Diagnostic log level written to stderr (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _logger = logging::init(&args.log_level).map_err(anyhow::Error::msg)?;

    let mut console = Console::stdio();
    let result = run_session(&mut console);
    let status = conclude(&mut console, result)?;
    Ok(ExitCode::from(status))
}
