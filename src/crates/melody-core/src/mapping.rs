//! Fixed character ↔ note code tables

/// Note code standing in for any character the ASCII table cannot carry
pub const SENTINEL_NOTE: u8 = 128;

/// Character emitted when a note code has no direct character
pub const PLACEHOLDER: char = '^';

/// A fixed, deterministic mapping between characters and note codes
pub trait CharacterNoteMap {
    /// Note code for `ch`, or `None` when `ch` is outside this map's domain
    fn note_for(&self, ch: char) -> Option<u8>;

    /// Character for a note code; never fails, falling back to [`PLACEHOLDER`]
    fn char_for(&self, note: u8) -> char;
}

/// ASCII identity table: every ASCII code point is its own note code.
///
/// Total over `char`: anything above 127 maps to [`SENTINEL_NOTE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsciiMap;

impl AsciiMap {
    /// Position and value of the first non-ASCII character in `text`
    pub fn first_unsupported(text: &str) -> Option<(usize, char)> {
        text.chars().enumerate().find(|(_, ch)| !ch.is_ascii())
    }
}

impl CharacterNoteMap for AsciiMap {
    fn note_for(&self, ch: char) -> Option<u8> {
        if ch.is_ascii() {
            Some(ch as u8)
        } else {
            Some(SENTINEL_NOTE)
        }
    }

    fn char_for(&self, note: u8) -> char {
        if note == SENTINEL_NOTE || !note.is_ascii() {
            PLACEHOLDER
        } else {
            char::from(note)
        }
    }
}

/// C major pitches the letter table quantizes onto
pub const LETTER_PITCHES: [u8; 7] = [60, 62, 64, 65, 67, 69, 71];

/// Letter table in definition order; decoding picks the first letter per pitch
#[rustfmt::skip]
const LETTER_TABLE: [(char, u8); 26] = [
    ('a', 60), ('b', 60), ('c', 60), ('d', 60),
    ('e', 62), ('f', 62), ('g', 62), ('h', 62),
    ('i', 64), ('j', 64), ('k', 64), ('l', 64),
    ('m', 65), ('n', 65), ('o', 65), ('p', 65),
    ('q', 67), ('r', 67), ('s', 67), ('t', 67),
    ('u', 69), ('v', 69), ('w', 69), ('x', 69),
    ('y', 71), ('z', 71),
];

/// Lowercase letter table: letters folded many-to-one onto seven pitches.
///
/// The inverse is lossy: `b` encodes to 60 and 60 decodes to `a`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterMap;

impl CharacterNoteMap for LetterMap {
    fn note_for(&self, ch: char) -> Option<u8> {
        LETTER_TABLE
            .iter()
            .find(|(letter, _)| *letter == ch)
            .map(|(_, pitch)| *pitch)
    }

    fn char_for(&self, note: u8) -> char {
        LETTER_TABLE
            .iter()
            .find(|(_, pitch)| *pitch == note)
            .map(|(letter, _)| *letter)
            .unwrap_or(PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_identity() {
        assert_eq!(AsciiMap.note_for('A'), Some(65));
        assert_eq!(AsciiMap.note_for('\n'), Some(10));
        assert_eq!(AsciiMap.note_for('\0'), Some(0));
        assert_eq!(AsciiMap.note_for('\x7f'), Some(127));
        assert_eq!(AsciiMap.char_for(65), 'A');
        assert_eq!(AsciiMap.char_for(127), '\x7f');
    }

    #[test]
    fn test_ascii_sentinel() {
        assert_eq!(AsciiMap.note_for('é'), Some(SENTINEL_NOTE));
        assert_eq!(AsciiMap.note_for('日'), Some(SENTINEL_NOTE));
        assert_eq!(AsciiMap.char_for(SENTINEL_NOTE), PLACEHOLDER);
        assert_eq!(AsciiMap.char_for(200), PLACEHOLDER);
    }

    #[test]
    fn test_first_unsupported() {
        assert_eq!(AsciiMap::first_unsupported("plain text"), None);
        assert_eq!(AsciiMap::first_unsupported("café"), Some((3, 'é')));
        assert_eq!(AsciiMap::first_unsupported(""), None);
    }

    #[test]
    fn test_letter_pitches() {
        assert_eq!(LetterMap.note_for('a'), Some(60));
        assert_eq!(LetterMap.note_for('b'), Some(60));
        assert_eq!(LetterMap.note_for('e'), Some(62));
        assert_eq!(LetterMap.note_for('x'), Some(69));
        assert_eq!(LetterMap.note_for('z'), Some(71));
    }

    #[test]
    fn test_letter_domain() {
        assert_eq!(LetterMap.note_for('A'), None);
        assert_eq!(LetterMap.note_for(' '), None);
        assert_eq!(LetterMap.note_for('1'), None);
    }

    #[test]
    fn test_letter_table_uses_only_scale_pitches() {
        for (letter, pitch) in LETTER_TABLE {
            assert!(LETTER_PITCHES.contains(&pitch), "{} maps off-scale", letter);
        }
        for pitch in LETTER_PITCHES {
            assert!(LETTER_TABLE.iter().any(|(_, p)| *p == pitch));
        }
    }

    #[test]
    fn test_letter_inverse_is_first_in_table() {
        assert_eq!(LetterMap.char_for(60), 'a');
        assert_eq!(LetterMap.char_for(62), 'e');
        assert_eq!(LetterMap.char_for(65), 'm');
        assert_eq!(LetterMap.char_for(71), 'y');
        assert_eq!(LetterMap.char_for(61), PLACEHOLDER);
    }
}
