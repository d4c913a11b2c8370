//! Render a note container to a mono waveform

use crate::voice::SineVoice;
use crate::{AudioError, Result};
use melody_core::MidiContainer;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Samples per second
    pub sample_rate: u32,
    /// Fixed peak amplitude of every tone (0.0 to 1.0)
    pub amplitude: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            sample_rate: 44100,
            amplitude: 0.5,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidParams(
                "Sample rate must be positive".to_string(),
            ));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(AudioError::InvalidParams(format!(
                "Amplitude must be in (0, 1], got {}",
                self.amplitude
            )));
        }
        Ok(())
    }

    /// Number of samples covering `seconds`
    pub fn frames(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64).round() as usize
    }
}

/// Render every sounding event as a sine tone, back to back.
///
/// Silent (zero-velocity) events contribute no samples.
pub fn render(container: &MidiContainer, params: &RenderParams) -> Result<Vec<f32>> {
    params.validate()?;

    let mut output = Vec::new();
    let mut rendered = 0usize;

    for event in container.events.iter().filter(|e| e.is_audible()) {
        let frames = params.frames(container.seconds(event));
        let mut voice = SineVoice::new(event.note, frames).set_gain(params.amplitude);
        log::debug!(
            "note {} at {:.2} Hz for {} frame(s)",
            event.note,
            voice.frequency(),
            frames
        );
        voice.fill_buffer(&mut output, params.sample_rate);
        rendered += 1;
    }

    log::info!(
        "rendered {} tone(s) into {} sample(s) at {} Hz",
        rendered,
        output.len(),
        params.sample_rate
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use melody_core::{EventSequence, LetterMap, NoteEvent};

    #[test]
    fn test_render_length() {
        // 480 ticks at 120 BPM is half a second per note
        let events = EventSequence::from_text("abc", &LetterMap, 480, 100);
        let samples = render(&MidiContainer::new(events), &RenderParams::default()).unwrap();
        assert_eq!(samples.len(), 3 * 22050);
    }

    #[test]
    fn test_silent_events_skipped() {
        let events = EventSequence::new(vec![
            NoteEvent::new(60, 100, 480),
            NoteEvent::new(62, 0, 480),
            NoteEvent::new(64, 100, 240),
        ]);
        let samples = render(&MidiContainer::new(events), &RenderParams::default()).unwrap();
        assert_eq!(samples.len(), 22050 + 11025);
    }

    #[test]
    fn test_empty_container() {
        let samples = render(
            &MidiContainer::new(EventSequence::default()),
            &RenderParams::default(),
        )
        .unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_amplitude_respected() {
        let params = RenderParams {
            sample_rate: 8000,
            amplitude: 0.25,
        };
        let events = EventSequence::from_text("y", &LetterMap, 480, 100);
        let samples = render(&MidiContainer::new(events), &params).unwrap();
        assert!(samples.iter().all(|s| s.abs() <= 0.25 + 1e-6));
    }

    #[test]
    fn test_invalid_params() {
        let container = MidiContainer::new(EventSequence::default());
        let params = RenderParams {
            sample_rate: 44100,
            amplitude: 0.0,
        };
        assert!(render(&container, &params).is_err());

        let params = RenderParams {
            sample_rate: 0,
            amplitude: 0.5,
        };
        assert!(render(&container, &params).is_err());
    }
}
