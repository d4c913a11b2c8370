//! Standard MIDI File container for event sequences
//!
//! Writing produces a single-track (format 0) file where every event becomes a
//! note-on at delta 0 followed by a note-off after the event's duration.
//! Reading walks every track and collects each sounding note-on in file order,
//! pairing it with the matching note-off to recover its duration.

use crate::event::{EventSequence, NoteEvent};
use crate::{MelodyError, Result};
use midly::num::{u15, u24, u28, u4, u7};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::collections::HashMap;
use std::path::Path;

/// Ticks per quarter note used when writing
pub const TICKS_PER_BEAT: u16 = 480;

/// Microseconds per quarter note when a file carries no tempo (120 BPM)
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Longest note a single variable-length delta time can hold
pub const MAX_DELTA_TICKS: u32 = 0x0FFF_FFFF;

/// An event sequence together with the timing needed to play it back
#[derive(Debug, Clone, PartialEq)]
pub struct MidiContainer {
    pub ticks_per_beat: u32,
    /// Microseconds per quarter note
    pub tempo: u32,
    pub events: EventSequence,
}

impl MidiContainer {
    pub fn new(events: EventSequence) -> Self {
        MidiContainer {
            ticks_per_beat: TICKS_PER_BEAT as u32,
            tempo: DEFAULT_TEMPO,
            events,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let smf = Smf::parse(data)?;

        let ticks_per_beat = match smf.header.timing {
            Timing::Metrical(tpb) => tpb.as_int() as u32,
            Timing::Timecode(fps, subframe) => {
                // Convert timecode to ticks per beat approximation
                (fps.as_f32() * subframe as f32 * 4.0) as u32
            }
        };

        let tempo = Self::extract_tempo(&smf);
        let events = Self::collect_events(&smf);

        log::debug!(
            "parsed MIDI container: {} track(s), {} note event(s)",
            smf.tracks.len(),
            events.len()
        );

        Ok(MidiContainer {
            ticks_per_beat,
            tempo,
            events,
        })
    }

    fn extract_tempo(smf: &Smf) -> u32 {
        for track in &smf.tracks {
            for event in track {
                if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = event.kind {
                    return tempo.as_int();
                }
            }
        }
        DEFAULT_TEMPO
    }

    fn collect_events(smf: &Smf) -> EventSequence {
        let mut events: Vec<NoteEvent> = Vec::new();

        for track in &smf.tracks {
            let mut tick: u64 = 0;
            // key -> (event index, start tick) of notes still sounding
            let mut sounding: HashMap<u8, Vec<(usize, u64)>> = HashMap::new();

            for event in track {
                tick += event.delta.as_int() as u64;

                let TrackEventKind::Midi { message, .. } = event.kind else {
                    continue;
                };

                match message {
                    MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                        sounding
                            .entry(key.as_int())
                            .or_default()
                            .push((events.len(), tick));
                        events.push(NoteEvent::new(key.as_int(), vel.as_int(), 0));
                    }
                    // A note-on with velocity 0 is a note-off
                    MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                        if let Some(open) = sounding.get_mut(&key.as_int()) {
                            if !open.is_empty() {
                                let (index, start) = open.remove(0);
                                events[index].duration =
                                    (tick - start).min(u32::MAX as u64) as u32;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        EventSequence::new(events)
    }

    /// Serialize to SMF bytes without touching the filesystem
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let channel = u4::new(0);
        let mut track: Track<'static> = Vec::with_capacity(self.events.len() * 2 + 2);

        if self.tempo != DEFAULT_TEMPO {
            track.push(TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(self.tempo))),
            });
        }

        for event in &self.events {
            let key = to_u7(event.note)?;
            let vel = to_u7(event.velocity)?;

            track.push(TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn { key, vel },
                },
            });
            track.push(TrackEvent {
                delta: to_u28(event.duration)?,
                kind: TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff { key, vel },
                },
            });
        }

        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        let ticks = u15::new(self.ticks_per_beat.min(0x7fff) as u16);
        let mut smf = Smf::new(Header::new(Format::SingleTrack, Timing::Metrical(ticks)));
        smf.tracks.push(track);

        let mut buf = Vec::new();
        smf.write_std(&mut buf)?;
        Ok(buf)
    }

    /// Write the container to `path`, replacing any existing file.
    ///
    /// The whole file is encoded before the path is opened, so a failure
    /// leaves no partial file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        log::info!(
            "wrote {} note event(s) to {}",
            self.events.len(),
            path.display()
        );
        Ok(())
    }

    /// Length of an event in seconds under this container's tempo
    pub fn seconds(&self, event: &NoteEvent) -> f64 {
        tick_to_second(event.duration, self.ticks_per_beat, self.tempo)
    }
}

fn to_u7(value: u8) -> Result<u7> {
    if value > 0x7f {
        return Err(MelodyError::NoteOutOfRange(value));
    }
    Ok(u7::new(value))
}

fn to_u28(ticks: u32) -> Result<u28> {
    if ticks > MAX_DELTA_TICKS {
        return Err(MelodyError::DurationOutOfRange(ticks));
    }
    Ok(u28::new(ticks))
}

pub fn tick_to_second(ticks: u32, ticks_per_beat: u32, tempo: u32) -> f64 {
    if ticks_per_beat == 0 {
        return 0.0;
    }
    let seconds_per_tick = (tempo as f64 / 1_000_000.0) / ticks_per_beat as f64;
    ticks as f64 * seconds_per_tick
}
