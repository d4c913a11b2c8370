//! A single sine oscillator playing one note

use std::f64::consts::PI;

/// Frequency of a MIDI note in equal temperament, A4 (69) = 440 Hz
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * 2.0_f64.powf((note as f64 - 69.0) / 12.0)
}

/// Nearest MIDI note for a frequency in Hz
pub fn freq_to_midi(freq: f64) -> u8 {
    if freq <= 0.0 {
        return 0;
    }
    let note = 69.0 + 12.0 * (freq / 440.0).log2();
    note.round().clamp(0.0, 127.0) as u8
}

/// A fixed-length sine tone
pub struct SineVoice {
    /// Oscillator frequency in Hz
    frequency: f64,
    /// Peak amplitude (0.0 to 1.0)
    gain: f32,
    /// Frames produced so far
    position: usize,
    /// Total frames this voice lasts
    frames: usize,
}

impl SineVoice {
    /// Create a voice for `note` lasting `frames` samples at full gain
    pub fn new(note: u8, frames: usize) -> Self {
        SineVoice {
            frequency: midi_to_freq(note),
            gain: 1.0,
            position: 0,
            frames,
        }
    }

    /// Set the gain
    pub fn set_gain(mut self, gain: f32) -> Self {
        self.gain = gain.clamp(0.0, 1.0);
        self
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Check if this voice still has frames to produce
    pub fn is_active(&self) -> bool {
        self.position < self.frames
    }

    /// Get the next mono sample, or `None` once the voice has finished
    pub fn next_sample(&mut self, sample_rate: u32) -> Option<f32> {
        if !self.is_active() {
            return None;
        }

        let t = self.position as f64 / sample_rate as f64;
        let value = (2.0 * PI * self.frequency * t).sin() as f32 * self.gain;
        self.position += 1;

        Some(value)
    }

    /// Append every remaining sample of this voice to `buffer`
    pub fn fill_buffer(&mut self, buffer: &mut Vec<f32>, sample_rate: u32) {
        buffer.reserve(self.frames.saturating_sub(self.position));
        while let Some(sample) = self.next_sample(sample_rate) {
            buffer.push(sample);
        }
    }
}
