//! Decoding compressed or PCM audio files into mono samples

use crate::{AudioError, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded mono audio
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Mono samples, normalized to [-1.0, 1.0]
    pub data: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Sample {
    /// Get the duration of this sample in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.data.len() as f64 / self.sample_rate as f64
    }
}

/// Decode an audio file (MP3, WAV, ...) and mix it down to mono
pub fn load_audio(path: &Path) -> Result<Sample> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Create a hint to help the format registry guess the format
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AudioError::DecodeError(format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::DecodeError("No valid audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = &track.codec_params;

    let mut decoder = symphonia::default::get_codecs()
        .make(codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::DecodeError(format!("Failed to create decoder: {}", e)))?;

    let mut sample_rate = codec_params.sample_rate.unwrap_or(44100);
    let mut data: Vec<f32> = Vec::new();

    loop {
        match format.next_packet() {
            Ok(packet) if packet.track_id() == track_id => {
                let decoded = decoder.decode(&packet).map_err(|e| {
                    AudioError::DecodeError(format!("Failed to decode packet: {}", e))
                })?;

                let spec = *decoded.spec();
                sample_rate = spec.rate;
                let channels = spec.channels.count().max(1);

                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                mix_down(buffer.samples(), channels, &mut data);
            }
            Ok(_) => continue,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(AudioError::DecodeError(format!("Format error: {}", e)));
            }
        }
    }

    log::info!(
        "decoded {} sample(s) at {} Hz from {}",
        data.len(),
        sample_rate,
        path.display()
    );

    Ok(Sample { data, sample_rate })
}

/// Average interleaved frames into one channel
fn mix_down(interleaved: &[f32], channels: usize, output: &mut Vec<f32>) {
    if channels == 1 {
        output.extend_from_slice(interleaved);
        return;
    }
    output.extend(
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32),
    );
}
