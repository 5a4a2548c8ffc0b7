//! Variable datum record.
//!
//! ```text
//! [DatumId(4)] [LengthBits(4)] [Value(ceil(bits/8))] [Padding to 8]
//! ```
//!
//! The length field counts bits, not octets, and excludes the padding.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::{padding_for, Record};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Free-form datum: id, length in bits, value padded to a 64-bit boundary.
///
/// The bit length is derived from the value unless set explicitly with
/// [`VariableDatum::with_bits`], which keeps sub-octet lengths intact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariableDatum {
    pub datum_id: u32,
    value: Vec<u8>,
    length_bits: u32,
}

impl VariableDatum {
    /// Id and length fields
    pub const BASE_LENGTH: usize = 8;

    pub fn new(datum_id: u32, value: Vec<u8>) -> Self {
        let length_bits = (value.len() as u32).saturating_mul(8);
        Self {
            datum_id,
            value,
            length_bits,
        }
    }

    /// Datum whose meaningful length is `bits`; `value` is trimmed or
    /// zero-extended to `ceil(bits / 8)` octets.
    pub fn with_bits(datum_id: u32, mut value: Vec<u8>, bits: u32) -> Self {
        value.resize(octets_for_bits(bits), 0);
        Self {
            datum_id,
            value,
            length_bits: bits,
        }
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn set_value(&mut self, value: Vec<u8>) {
        self.length_bits = (value.len() as u32).saturating_mul(8);
        self.value = value;
    }

    pub fn length_bits(&self) -> u32 {
        self.length_bits
    }

    fn padding(&self) -> usize {
        padding_for(self.value.len(), 8)
    }
}

fn octets_for_bits(bits: u32) -> usize {
    (bits as usize).div_ceil(8)
}

impl Record for VariableDatum {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        let datum_id = r.read_u32()?;
        let length_bits = r.read_u32()?;
        let octets = octets_for_bits(length_bits);
        let value = r.read_bytes(octets)?;
        r.skip(padding_for(octets, 8))?;
        Ok(Self {
            datum_id,
            value,
            length_bits,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u32(self.datum_id);
        w.write_u32(self.length_bits);
        w.write_bytes(&self.value);
        w.write_zeros(self.padding());
    }

    fn length(&self) -> usize {
        Self::BASE_LENGTH + self.value.len() + self.padding()
    }
}
