use anyhow::{Context, Result};
use clap::Parser;
use melody_core::{logging, Console};
use std::path::PathBuf;
use text_melody::{run_menu, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "letter-melody")]
#[command(about = "Encode lowercase text as a sine-wave melody and decode it back", long_about = None)]
struct Args {
    /// JSON session config (camelCase keys); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory generated files are written to and cleaned from
    #[arg(short, long)]
    work_dir: Option<PathBuf>,

    /// Output sample rate in Hz (44100, 48000 or 96000)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// MP3 bitrate in kbps (128, 192, 256 or 320)
    #[arg(long)]
    mp3_bitrate: Option<u32>,

    /// Diagnostic log level written to stderr (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _logger = logging::init(&args.log_level).map_err(anyhow::Error::msg)?;

    let mut config = match &args.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(dir) = args.work_dir {
        config.work_dir = dir;
    }
    if let Some(rate) = args.sample_rate {
        config.sample_rate = rate;
    }
    if let Some(bitrate) = args.mp3_bitrate {
        config.mp3_bitrate = bitrate;
    }
    config.validate().context("Invalid session config")?;

    log::info!("session config: {:?}", config);

    let mut console = Console::stdio();
    run_menu(&mut console, &config)?;
    Ok(())
}
