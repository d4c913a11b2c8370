use crate::config::SessionConfig;
use hound::{SampleFormat, WavSpec, WavWriter};
use melody_audio::{render, AudioError, RenderParams};
use melody_core::{MelodyError, MidiContainer};
use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, MonoPcm, Quality};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hound error: {0}")]
    Hound(#[from] hound::Error),

    #[error("Audio encoding error: {0}")]
    Encoding(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Melody(#[from] MelodyError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Convert a normalized sample to 16-bit PCM, clamping to prevent clipping
fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Encode mono samples to a 16-bit WAV file
pub fn encode_wav(samples: &[f32], sample_rate: u32, path: &Path) -> Result<(), AudioExportError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(to_i16(sample))?;
    }
    writer.finalize()?;

    log::info!("wrote {} sample(s) to {}", samples.len(), path.display());
    Ok(())
}

fn bitrate(kbps: u32) -> Result<Bitrate, AudioExportError> {
    match kbps {
        128 => Ok(Bitrate::Kbps128),
        192 => Ok(Bitrate::Kbps192),
        256 => Ok(Bitrate::Kbps256),
        320 => Ok(Bitrate::Kbps320),
        other => Err(AudioExportError::InvalidParams(format!(
            "MP3 bitrate must be 128, 192, 256, or 320 kbps, got {}",
            other
        ))),
    }
}

/// Encode mono samples to an MP3 file.
///
/// The whole stream is encoded in memory first; the file is only created
/// once encoding has succeeded.
pub fn encode_mp3(
    samples: &[f32],
    sample_rate: u32,
    bitrate_kbps: u32,
    path: &Path,
) -> Result<(), AudioExportError> {
    let mut builder = Builder::new()
        .ok_or_else(|| AudioExportError::Encoding("Failed to create LAME builder".to_string()))?;
    builder
        .set_num_channels(1)
        .map_err(|e| AudioExportError::Encoding(format!("Failed to set channels: {:?}", e)))?;
    builder
        .set_sample_rate(sample_rate)
        .map_err(|e| AudioExportError::Encoding(format!("Failed to set sample rate: {:?}", e)))?;
    builder
        .set_brate(bitrate(bitrate_kbps)?)
        .map_err(|e| AudioExportError::Encoding(format!("Failed to set bitrate: {:?}", e)))?;
    builder
        .set_quality(Quality::Best)
        .map_err(|e| AudioExportError::Encoding(format!("Failed to set quality: {:?}", e)))?;
    let mut encoder = builder
        .build()
        .map_err(|e| AudioExportError::Encoding(format!("Failed to initialize LAME: {:?}", e)))?;

    let pcm: Vec<i16> = samples.iter().map(|&s| to_i16(s)).collect();

    // Room for the encoded frames plus what the final flush emits
    let mut mp3_out: Vec<u8> =
        Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(pcm.len()) + 7200);

    encoder
        .encode_to_vec(MonoPcm(&pcm), &mut mp3_out)
        .map_err(|e| AudioExportError::Encoding(format!("Failed to encode MP3: {:?}", e)))?;
    encoder
        .flush_to_vec::<FlushNoGap>(&mut mp3_out)
        .map_err(|e| AudioExportError::Encoding(format!("Failed to flush MP3: {:?}", e)))?;

    std::fs::write(path, &mp3_out)?;
    log::info!(
        "wrote {} byte(s) of MP3 ({} sample(s)) to {}",
        mp3_out.len(),
        samples.len(),
        path.display()
    );
    Ok(())
}

/// Synthesize a note container and compress it to `path` as MP3
pub fn export_mp3(
    container: &MidiContainer,
    config: &SessionConfig,
    path: &Path,
) -> Result<(), AudioExportError> {
    let params = RenderParams {
        sample_rate: config.sample_rate,
        amplitude: config.amplitude,
    };
    let samples = render(container, &params)?;
    encode_mp3(&samples, config.sample_rate, config.mp3_bitrate, path)
}
