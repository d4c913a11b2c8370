//! Best-effort note recovery from a rendered melody.
//!
//! The signal is assumed to be back-to-back tones of equal length, as written
//! by [`crate::render`]. After trimming leading silence it is cut into
//! note-length windows and each window is reduced to the MIDI note nearest its
//! strongest spectral peak. Lossy codecs shift and smear the tones, so the
//! result is only as good as the window alignment survives.

use crate::samples::Sample;
use crate::voice::freq_to_midi;
use crate::{AudioError, Result};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscribeParams {
    /// Length of one note in seconds
    pub note_seconds: f64,
    /// Absolute level a sample must reach to count as the first onset
    pub onset_threshold: f32,
    /// Windows with an RMS below this are treated as silence
    pub silence_rms: f32,
}

impl Default for TranscribeParams {
    fn default() -> Self {
        TranscribeParams {
            note_seconds: 0.5,
            onset_threshold: 0.01,
            silence_rms: 0.01,
        }
    }
}

/// Recover one MIDI note per sounding note-length window
pub fn transcribe(sample: &Sample, params: &TranscribeParams) -> Result<Vec<u8>> {
    let window = (params.note_seconds * sample.sample_rate as f64).round() as usize;
    if window == 0 {
        return Err(AudioError::InvalidParams(format!(
            "Note length of {}s is shorter than one sample at {} Hz",
            params.note_seconds, sample.sample_rate
        )));
    }

    let Some(onset) = sample
        .data
        .iter()
        .position(|s| s.abs() >= params.onset_threshold)
    else {
        log::info!("no onset found; treating audio as silent");
        return Ok(Vec::new());
    };

    let mut planner = FftPlanner::<f32>::new();
    let mut notes = Vec::new();

    for (index, chunk) in sample.data[onset..].chunks(window).enumerate() {
        if chunk.len() < window / 2 {
            log::warn!(
                "dropping trailing partial window of {} sample(s)",
                chunk.len()
            );
            break;
        }

        let rms = (chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len() as f32).sqrt();
        if rms < params.silence_rms {
            log::debug!("window {} is silent (rms {:.4})", index, rms);
            continue;
        }

        let freq = peak_frequency(&mut planner, chunk, sample.sample_rate);
        let note = freq_to_midi(freq);
        log::debug!("window {}: peak {:.1} Hz -> note {}", index, freq, note);
        notes.push(note);
    }

    log::info!("transcribed {} note(s)", notes.len());
    Ok(notes)
}

/// Frequency of the largest-magnitude bin, ignoring DC
fn peak_frequency(planner: &mut FftPlanner<f32>, chunk: &[f32], sample_rate: u32) -> f64 {
    let n = chunk.len();
    let fft = planner.plan_fft_forward(n);

    let mut spectrum: Vec<Complex<f32>> = chunk.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut spectrum);

    let (bin, _) = spectrum
        .iter()
        .enumerate()
        .take(n / 2 + 1)
        .skip(1)
        .fold((0usize, 0.0f32), |best, (i, c)| {
            let magnitude = c.norm_sqr();
            if magnitude > best.1 {
                (i, magnitude)
            } else {
                best
            }
        });

    bin as f64 * sample_rate as f64 / n as f64
}
