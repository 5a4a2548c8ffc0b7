//! # Records and Record Containers
//!
//! A record is a self-contained structured value nested inside a PDU or inside
//! another record. Some are fixed-size leaves (identifiers, entity types), others
//! own further records.
//!
//! ## Components
//! - [`Record`]: read/write/length/validity contract every record implements
//! - [`RecordList`]: ordered, owning container for records of one family
//! - [`RecordFamily`]: polymorphic families sharing a `(record_type, record_length)`
//!   header, decoded by reading the header once and dispatching on the type
//! - [`padding_for`]: zero-remainder-safe padding computation
//!
//! ## Ownership
//! Containers own their records outright. [`RecordList::take`] and
//! [`RecordList::move_to`] move a record out without destroying it; dropping a
//! removed record destroys it along with everything it owns.

use crate::core::cursor::{DisReader, DisWriter};
use crate::error::{DisError, Result};
use crate::utils::metrics::global_metrics;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Read/write contract shared by every record.
///
/// `read` consumes exactly the octets `write` produces, and both equal `length()`.
pub trait Record: Sized {
    /// Decode a record from the cursor.
    fn read(r: &mut DisReader<'_>) -> Result<Self>;

    /// Encode this record in wire order.
    fn write(&self, w: &mut DisWriter<'_>);

    /// Octets this record occupies on the wire, recomputed from its contents.
    fn length(&self) -> usize;

    /// Structural and numeric validity. Never blocks a decode.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Padding octets needed to bring `length` up to the next multiple of `alignment`.
///
/// A length already on the boundary needs no padding, not a full `alignment`.
pub fn padding_for(length: usize, alignment: usize) -> usize {
    if alignment == 0 {
        return 0;
    }
    match length % alignment {
        0 => 0,
        rem => alignment - rem,
    }
}

/// Ordered, owning collection of records of one family.
///
/// Count fields on the wire are always derived from [`RecordList::len`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordList<T> {
    records: Vec<T>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> RecordList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `record`, appending it.
    pub fn add(&mut self, record: T) {
        self.records.push(record);
    }

    /// Remove and destroy the record at `index`. Returns false when out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        self.take(index).is_some()
    }

    /// Detach the record at `index`, handing ownership to the caller.
    pub fn take(&mut self, index: usize) -> Option<T> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// Move the record at `index` to the end of `other`.
    pub fn move_to(&mut self, index: usize, other: &mut RecordList<T>) -> bool {
        match self.take(index) {
            Some(record) => {
                other.add(record);
                true
            }
            None => false,
        }
    }

    /// Destroy every record.
    pub fn remove_all(&mut self) {
        self.records.clear();
    }

    /// Detach every record, leaving the container empty.
    pub fn take_all(&mut self) -> Vec<T> {
        std::mem::take(&mut self.records)
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.records.retain(keep);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.records.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }
}

impl<T: Record> RecordList<T> {
    /// Read exactly `count` records.
    pub fn read_count(r: &mut DisReader<'_>, count: usize) -> Result<Self> {
        let mut records = Vec::with_capacity(count.min(r.remaining()));
        for _ in 0..count {
            records.push(T::read(r)?);
        }
        Ok(Self { records })
    }

    /// Read up to `count` records, stopping at the first one that fails.
    ///
    /// Returns the records read so far and the error that stopped the read,
    /// if any. The reader is left wherever the failed record stopped, so the
    /// caller must not trust anything after it.
    pub fn read_lenient(
        r: &mut DisReader<'_>,
        count: usize,
        what: &'static str,
    ) -> (Self, Option<DisError>) {
        let mut records = Vec::with_capacity(count.min(r.remaining()));
        for index in 0..count {
            match T::read(r) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        list = what,
                        index,
                        declared = count,
                        error = %e,
                        "Record list truncated"
                    );
                    global_metrics().records_skipped((count - index) as u64);
                    return (Self { records }, Some(e));
                }
            }
        }
        (Self { records }, None)
    }

    /// Write every record in order. The container adds no padding of its own.
    pub fn write(&self, w: &mut DisWriter<'_>) {
        for record in &self.records {
            record.write(w);
        }
    }

    /// Sum of member lengths
    pub fn length(&self) -> usize {
        self.records.iter().map(Record::length).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.records.iter().all(Record::is_valid)
    }
}

impl<F: RecordFamily> RecordList<F> {
    /// Read up to `count` members of a polymorphic family, degrading instead
    /// of failing.
    ///
    /// Unrecognised types are skipped by their declared length. A recognised
    /// record whose payload fails inside its declared span is dropped and the
    /// read continues after it. A record that cannot be framed loses the
    /// boundary to everything after it, so the read stops there.
    pub fn read_family(r: &mut DisReader<'_>, count: usize) -> Self {
        let mut records = Vec::with_capacity(count.min(r.remaining()));
        let mut skipped = 0u64;

        for index in 0..count {
            let start = r.clone();
            match F::read_dispatched(r) {
                Ok(Dispatched::Known(record)) => records.push(record),
                Ok(Dispatched::Skipped(_)) => skipped += 1,
                Err(e) if frames::<F>(&start) => {
                    debug!(family = F::WHAT, index, error = %e, "Dropped unreadable record");
                    skipped += 1;
                }
                Err(e) => {
                    warn!(
                        family = F::WHAT,
                        index,
                        declared = count,
                        error = %e,
                        "Record boundary lost, dropping remaining records"
                    );
                    skipped += (count - index) as u64;
                    break;
                }
            }
        }

        if skipped > 0 {
            global_metrics().records_skipped(skipped);
        }
        Self { records }
    }
}

/// Whether a whole family member can be framed at the reader's position.
fn frames<F: RecordFamily>(r: &DisReader<'_>) -> bool {
    let mut lookahead = r.clone();
    match F::read_header(&mut lookahead) {
        Ok(header) => {
            let declared = header.record_length as usize;
            declared >= F::HEADER_LENGTH && lookahead.remaining() >= declared - F::HEADER_LENGTH
        }
        Err(_) => false,
    }
}

impl<T> From<Vec<T>> for RecordList<T> {
    fn from(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T> FromIterator<T> for RecordList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for RecordList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RecordList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T> std::ops::Index<usize> for RecordList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

/// Common leading header of a polymorphic record family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub record_type: u32,
    pub record_length: u16,
}

/// Outcome of reading one member of a polymorphic family
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched<F> {
    /// Recognised type, fully decoded
    Known(F),
    /// Unrecognised type, skipped by its declared length
    Skipped(RecordHeader),
}

/// A closed family of records sharing a `(record_type, record_length)` header.
///
/// Members are modelled as one enum; `read_payload` matches the type code and
/// decodes the remainder of the record.
pub trait RecordFamily: Sized {
    /// Octets of the common header, included in `record_length`
    const HEADER_LENGTH: usize;
    /// Family name used in diagnostics
    const WHAT: &'static str;

    fn read_header(r: &mut DisReader<'_>) -> Result<RecordHeader>;

    fn write_header(w: &mut DisWriter<'_>, header: RecordHeader);

    /// Decode the type-specific payload, or `None` for an unrecognised type.
    /// The reader is bounded to the declared payload span.
    fn read_payload(record_type: u32, r: &mut DisReader<'_>) -> Result<Option<Self>>;

    fn record_type(&self) -> u32;

    /// Full record length including the common header
    fn record_length(&self) -> usize;

    fn write_payload(&self, w: &mut DisWriter<'_>);

    fn is_valid(&self) -> bool {
        true
    }

    /// Read one member: header once, then dispatch or skip.
    ///
    /// Errors only when the record cannot be framed (header truncated, declared
    /// length shorter than the header or longer than what remains) or when a
    /// recognised payload fails inside its declared span. In the latter case the
    /// reader has still advanced past the whole record.
    fn read_dispatched(r: &mut DisReader<'_>) -> Result<Dispatched<Self>> {
        let header = Self::read_header(r)?;
        let declared = header.record_length as usize;
        if declared < Self::HEADER_LENGTH {
            return Err(DisError::InconsistentLength {
                what: Self::WHAT,
                declared,
                minimum: Self::HEADER_LENGTH,
            });
        }

        let mut payload = r.take(declared - Self::HEADER_LENGTH)?;
        match Self::read_payload(header.record_type, &mut payload)? {
            Some(record) => {
                trace!(
                    family = Self::WHAT,
                    record_type = header.record_type,
                    record_length = declared,
                    "Decoded record"
                );
                Ok(Dispatched::Known(record))
            }
            None => {
                debug!(
                    family = Self::WHAT,
                    record_type = header.record_type,
                    record_length = declared,
                    "Skipped unrecognised record"
                );
                Ok(Dispatched::Skipped(header))
            }
        }
    }

    /// Read one member, treating an unrecognised type as an error.
    fn read_strict(r: &mut DisReader<'_>) -> Result<Self> {
        match Self::read_dispatched(r)? {
            Dispatched::Known(record) => Ok(record),
            Dispatched::Skipped(header) => Err(DisError::UnknownType {
                kind: Self::WHAT,
                value: header.record_type,
            }),
        }
    }

    /// Write the common header followed by the payload.
    fn write_record(&self, w: &mut DisWriter<'_>) {
        let record_length = w.narrow_u16(self.record_length(), Self::WHAT);
        Self::write_header(
            w,
            RecordHeader {
                record_type: self.record_type(),
                record_length,
            },
        );
        self.write_payload(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::ByteOrder;
    use bytes::BytesMut;

    #[derive(Debug, Clone, PartialEq)]
    struct Octet(u8);

    impl Record for Octet {
        fn read(r: &mut DisReader<'_>) -> Result<Self> {
            Ok(Octet(r.read_u8()?))
        }

        fn write(&self, w: &mut DisWriter<'_>) {
            w.write_u8(self.0);
        }

        fn length(&self) -> usize {
            1
        }

        fn is_valid(&self) -> bool {
            self.0 != 0xFF
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Tagged {
        Word(u16),
        /// Declares more octets than a 16-bit length can carry
        Oversized,
    }

    impl RecordFamily for Tagged {
        const HEADER_LENGTH: usize = 6;
        const WHAT: &'static str = "tagged record";

        fn read_header(r: &mut DisReader<'_>) -> Result<RecordHeader> {
            Ok(RecordHeader {
                record_type: r.read_u32()?,
                record_length: r.read_u16()?,
            })
        }

        fn write_header(w: &mut DisWriter<'_>, header: RecordHeader) {
            w.write_u32(header.record_type);
            w.write_u16(header.record_length);
        }

        fn read_payload(record_type: u32, r: &mut DisReader<'_>) -> Result<Option<Self>> {
            match record_type {
                1 => Ok(Some(Tagged::Word(r.read_u16()?))),
                _ => Ok(None),
            }
        }

        fn record_type(&self) -> u32 {
            1
        }

        fn record_length(&self) -> usize {
            match self {
                Tagged::Word(_) => 8,
                Tagged::Oversized => 70_000,
            }
        }

        fn write_payload(&self, w: &mut DisWriter<'_>) {
            if let Tagged::Word(value) = self {
                w.write_u16(*value);
            }
        }
    }

    #[test]
    fn test_family_skips_unknown_and_drops_unreadable() {
        let data = [
            0u8, 0, 0, 1, 0, 8, 0, 5, // known
            0, 0, 0, 9, 0, 7, 1, // unknown, skipped by length
            0, 0, 0, 1, 0, 7, 0xAA, // known type, payload too short for its span
            0, 0, 0, 1, 0, 8, 0, 6, // known
            0, 0, 0, 1, 0, 40, // cannot be framed
        ];
        let mut r = DisReader::new(&data, ByteOrder::BigEndian);
        let list: RecordList<Tagged> = RecordList::read_family(&mut r, 6);
        assert_eq!(list.as_slice(), &[Tagged::Word(5), Tagged::Word(6)]);
    }

    #[test]
    fn test_strict_read_rejects_unknown_type() {
        let data = [0u8, 0, 0, 9, 0, 8, 0, 0];
        let mut r = DisReader::new(&data, ByteOrder::BigEndian);
        assert!(matches!(
            Tagged::read_strict(&mut r),
            Err(DisError::UnknownType { value: 9, .. })
        ));
        // The unknown record was still consumed whole
        assert!(r.is_empty());

        let mut buf = BytesMut::new();
        Tagged::Word(7).write_record(&mut DisWriter::new(&mut buf, ByteOrder::BigEndian));
        assert_eq!(&buf[..], &[0u8, 0, 0, 1, 0, 8, 0, 7]);
    }

    #[test]
    fn test_record_length_overflow_is_reported() {
        let mut buf = BytesMut::new();
        let mut w = DisWriter::new(&mut buf, ByteOrder::BigEndian);
        Tagged::Word(1).write_record(&mut w);
        Tagged::Oversized.write_record(&mut w);
        match w.finish() {
            Err(DisError::FieldOverflow { what, value, .. }) => {
                assert_eq!(what, "tagged record");
                assert_eq!(value, 70_000);
            }
            other => panic!("Expected FieldOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_padding_zero_remainder_is_zero() {
        assert_eq!(padding_for(0, 4), 0);
        assert_eq!(padding_for(4, 4), 0);
        assert_eq!(padding_for(5, 4), 3);
        assert_eq!(padding_for(6, 4), 2);
        assert_eq!(padding_for(12, 8), 4);
        assert_eq!(padding_for(16, 8), 0);
        assert_eq!(padding_for(7, 0), 0);
    }

    #[test]
    fn test_container_length_and_validity() {
        let mut list: RecordList<Octet> = vec![Octet(1), Octet(2)].into();
        assert_eq!(list.length(), 2);
        assert!(list.is_valid());

        list.add(Octet(0xFF));
        assert_eq!(list.len(), 3);
        assert!(!list.is_valid());

        assert!(list.remove(2));
        assert!(!list.remove(2));
        assert!(list.is_valid());
    }

    #[test]
    fn test_take_and_move_transfer_ownership() {
        let mut source: RecordList<Octet> = vec![Octet(1), Octet(2), Octet(3)].into();
        let mut target = RecordList::new();

        assert!(source.move_to(1, &mut target));
        assert_eq!(target.as_slice(), &[Octet(2)]);
        assert_eq!(source.as_slice(), &[Octet(1), Octet(3)]);

        let detached = source.take(0).unwrap();
        assert_eq!(detached, Octet(1));
        assert_eq!(source.len(), 1);
        assert!(source.take(5).is_none());

        let all = source.take_all();
        assert_eq!(all, vec![Octet(3)]);
        assert!(source.is_empty());
    }

    #[test]
    fn test_read_count_and_write() {
        let data = [4u8, 5, 6];
        let mut r = DisReader::new(&data, ByteOrder::BigEndian);
        let list: RecordList<Octet> = RecordList::read_count(&mut r, 3).unwrap();
        assert_eq!(list[2], Octet(6));

        let mut buf = BytesMut::new();
        list.write(&mut DisWriter::new(&mut buf, ByteOrder::BigEndian));
        assert_eq!(&buf[..], &data[..]);

        let mut short = DisReader::new(&data[..2], ByteOrder::BigEndian);
        assert!(RecordList::<Octet>::read_count(&mut short, 3).is_err());
    }
}
