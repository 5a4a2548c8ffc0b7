//! Aggregate marking text.
//!
//! Markings are fixed-width on the wire. Text longer than 31 characters is
//! cut and shorter text is NUL-padded. `text` stops at the first NUL.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::Record;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Number of marking characters following the character set octet
pub const MARKING_CHARACTERS: usize = 31;

/// Character set value for plain ASCII markings
pub const CHARACTER_SET_ASCII: u8 = 1;

/// 32-octet aggregate marking: character set plus 31 NUL-padded characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateMarking {
    pub character_set: u8,
    pub characters: [u8; MARKING_CHARACTERS],
}

impl Default for AggregateMarking {
    fn default() -> Self {
        Self {
            character_set: CHARACTER_SET_ASCII,
            characters: [0; MARKING_CHARACTERS],
        }
    }
}

impl AggregateMarking {
    pub const LENGTH: usize = 1 + MARKING_CHARACTERS;

    /// ASCII marking, truncated to 31 characters.
    pub fn from_ascii(text: &str) -> Self {
        let mut marking = Self::default();
        marking.set_text(text);
        marking
    }

    pub fn set_text(&mut self, text: &str) {
        self.characters = [0; MARKING_CHARACTERS];
        for (slot, byte) in self.characters.iter_mut().zip(text.bytes()) {
            *slot = byte;
        }
    }

    /// Characters up to the first NUL, lossily decoded.
    pub fn text(&self) -> String {
        let end = self
            .characters
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(MARKING_CHARACTERS);
        String::from_utf8_lossy(&self.characters[..end]).into_owned()
    }
}

impl Record for AggregateMarking {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            character_set: r.read_u8()?,
            characters: r.read_array()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u8(self.character_set);
        w.write_bytes(&self.characters);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marking_text_round_trip() {
        let marking = AggregateMarking::from_ascii("ARMOR BN 1");
        assert_eq!(marking.text(), "ARMOR BN 1");
        assert_eq!(marking.characters[10], 0);
    }

    #[test]
    fn test_marking_truncates_long_text() {
        let long = "X".repeat(40);
        let marking = AggregateMarking::from_ascii(&long);
        assert_eq!(marking.text().len(), MARKING_CHARACTERS);
    }
}
