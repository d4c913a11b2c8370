use crate::mapping::CharacterNoteMap;

/// A single note standing for one character of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    /// Note code (MIDI key number, or the sentinel)
    pub note: u8,
    /// Note-on velocity; 0 means the note is silent
    pub velocity: u8,
    /// Length in MIDI ticks
    pub duration: u32,
}

impl NoteEvent {
    pub fn new(note: u8, velocity: u8, duration: u32) -> Self {
        NoteEvent {
            note,
            velocity,
            duration,
        }
    }

    /// Whether this event produces sound when rendered
    pub fn is_audible(&self) -> bool {
        self.velocity > 0
    }
}

/// Ordered, write-once list of note events
///
/// Position is the only relationship between events: the n-th event stands
/// for the n-th in-domain character of the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSequence {
    events: Vec<NoteEvent>,
}

impl EventSequence {
    pub fn new(events: Vec<NoteEvent>) -> Self {
        EventSequence { events }
    }

    /// Build one event per in-domain character of `text`, in order.
    ///
    /// Characters the map has no note for are skipped.
    pub fn from_text<M: CharacterNoteMap + ?Sized>(
        text: &str,
        map: &M,
        duration: u32,
        velocity: u8,
    ) -> Self {
        let mut events = Vec::with_capacity(text.len());
        let mut skipped = 0usize;

        for ch in text.chars() {
            match map.note_for(ch) {
                Some(note) => events.push(NoteEvent::new(note, velocity, duration)),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!("skipped {} character(s) outside the note table", skipped);
        }

        EventSequence { events }
    }

    /// One character per event, in order
    pub fn decode_with<M: CharacterNoteMap + ?Sized>(&self, map: &M) -> String {
        self.events.iter().map(|event| map.char_for(event.note)).collect()
    }

    pub fn note_codes(&self) -> Vec<u8> {
        self.events.iter().map(|event| event.note).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NoteEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total length in ticks when events are played back to back
    pub fn total_ticks(&self) -> u64 {
        self.events.iter().map(|event| event.duration as u64).sum()
    }
}

impl<'a> IntoIterator for &'a EventSequence {
    type Item = &'a NoteEvent;
    type IntoIter = std::slice::Iter<'a, NoteEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromIterator<NoteEvent> for EventSequence {
    fn from_iter<I: IntoIterator<Item = NoteEvent>>(iter: I) -> Self {
        EventSequence {
            events: iter.into_iter().collect(),
        }
    }
}
