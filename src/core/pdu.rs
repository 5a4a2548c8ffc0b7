//! # PDU Framing
//!
//! Every PDU type implements [`DisPdu`]: body decode after the header has been
//! read, bottom-up length recomputation, header-then-body encode, and recursive
//! validity.
//!
//! [`Pdu`] is the sum of the PDU types this crate materialises plus an opaque
//! variant for everything else, with decode dispatching on the header's type.
//!
//! ## Framing rules
//! - The header is read first and its declared length bounds the body
//! - A body decodes from a reader limited to exactly `length - 12` octets;
//!   octets the body does not understand at its tail are ignored
//! - `length()` is recomputed from current contents every time it is asked
//!   and is what `put` writes into the header's length field
//! - A length or count too wide for its wire field fails the encode with
//!   [`DisError::OversizedPdu`] or [`DisError::FieldOverflow`]

use crate::core::cursor::{ByteOrder, DisReader, DisWriter};
use crate::core::header::{PduHeader, PduType, HEADER_LENGTH};
use crate::error::{DisError, Result};
use crate::pdu::aggregate_state::AggregateStatePdu;
use crate::pdu::directed_energy::DirectedEnergyFirePdu;
use crate::pdu::iff::IffPdu;
use crate::utils::metrics::global_metrics;
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Largest length representable in the header's 16-bit length field
pub const MAX_PDU_LENGTH: usize = u16::MAX as usize;

/// Framing contract shared by every PDU type
pub trait DisPdu: Sized {
    const PDU_TYPE: PduType;

    /// Octets of a PDU with every collection empty and every optional section absent
    const BASE_LENGTH: usize;

    fn header(&self) -> &PduHeader;

    /// Decode the body. The header has already been read by the caller and
    /// `r` is bounded to the body octets it declares.
    fn get(header: PduHeader, r: &mut DisReader<'_>) -> Result<Self>;

    /// Write body fields in wire order, deriving counts and padding.
    fn put_body(&self, w: &mut DisWriter<'_>);

    /// Total octets including the header, recomputed from current contents.
    fn length(&self) -> usize;

    fn is_body_valid(&self) -> bool;

    /// Length as carried in the header's 16-bit field.
    fn wire_length(&self) -> Result<u16> {
        checked_length(self.length())
    }

    /// Write header and body. On error the octets already appended to the
    /// writer's buffer are not a valid PDU.
    fn put(&self, w: &mut DisWriter<'_>) -> Result<()> {
        let length = self.wire_length()?;
        self.header().write(w, length);
        self.put_body(w);
        w.finish()
    }

    fn is_valid(&self) -> bool {
        self.header().is_valid() && self.length() <= MAX_PDU_LENGTH && self.is_body_valid()
    }

    /// Encode into a fresh buffer.
    fn encode(&self, order: ByteOrder) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.length());
        self.put(&mut DisWriter::new(&mut buf, order))?;
        global_metrics().pdu_encoded(buf.len() as u64);
        Ok(buf.freeze())
    }

    /// Decode a complete PDU of this type, header included.
    fn decode(bytes: &[u8], order: ByteOrder) -> Result<Self> {
        let mut r = DisReader::new(bytes, order);
        let result = read_frame(&mut r, MAX_PDU_LENGTH).and_then(|(header, mut body)| {
            if header.pdu_type != Self::PDU_TYPE as u8 {
                return Err(DisError::UnexpectedPduType {
                    expected: Self::PDU_TYPE as u8,
                    actual: header.pdu_type,
                });
            }
            Self::get(header, &mut body)
        });
        record_outcome(&result, bytes.len());
        result
    }
}

fn checked_length(length: usize) -> Result<u16> {
    u16::try_from(length).map_err(|_| DisError::OversizedPdu(length))
}

/// Read the header and split off a reader bounded to the declared body.
pub fn read_frame<'a>(
    r: &mut DisReader<'a>,
    max_length: usize,
) -> Result<(PduHeader, DisReader<'a>)> {
    let (header, declared) = PduHeader::read(r)?;
    if declared > max_length {
        return Err(DisError::OversizedPdu(declared));
    }
    let body = r.take(declared - HEADER_LENGTH)?;
    Ok((header, body))
}

fn record_outcome<T>(result: &Result<T>, octets: usize) {
    match result {
        Ok(_) => global_metrics().pdu_decoded(octets as u64),
        Err(e) => {
            debug!(error = %e, "Rejected inbound PDU");
            global_metrics().pdu_rejected();
        }
    }
}

/// PDU of a type this crate does not materialise, kept verbatim for relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedPdu {
    pub header: PduHeader,
    pub body: Vec<u8>,
}

impl UnsupportedPdu {
    pub fn length(&self) -> usize {
        HEADER_LENGTH + self.body.len()
    }

    pub fn put(&self, w: &mut DisWriter<'_>) -> Result<()> {
        self.header.write(w, checked_length(self.length())?);
        w.write_bytes(&self.body);
        Ok(())
    }
}

/// Any decoded PDU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pdu {
    AggregateState(AggregateStatePdu),
    DirectedEnergyFire(DirectedEnergyFirePdu),
    Iff(IffPdu),
    Unsupported(UnsupportedPdu),
}

impl Pdu {
    /// Decode one PDU from `bytes`, dispatching on the header's PDU type.
    pub fn decode(bytes: &[u8], order: ByteOrder) -> Result<Self> {
        Self::decode_with_limit(bytes, order, MAX_PDU_LENGTH)
    }

    /// Decode, rejecting PDUs whose declared length exceeds `max_length`.
    #[instrument(level = "trace", skip(bytes), fields(octets = bytes.len()))]
    pub fn decode_with_limit(bytes: &[u8], order: ByteOrder, max_length: usize) -> Result<Self> {
        let mut r = DisReader::new(bytes, order);
        let result = read_frame(&mut r, max_length).and_then(|(header, mut body)| {
            Ok(match header.kind() {
                Some(PduType::AggregateState) => {
                    Pdu::AggregateState(AggregateStatePdu::get(header, &mut body)?)
                }
                Some(PduType::DirectedEnergyFire) => {
                    Pdu::DirectedEnergyFire(DirectedEnergyFirePdu::get(header, &mut body)?)
                }
                Some(PduType::Iff) => Pdu::Iff(IffPdu::get(header, &mut body)?),
                None => {
                    global_metrics().unsupported_pdu();
                    Pdu::Unsupported(UnsupportedPdu {
                        header,
                        body: body.rest().to_vec(),
                    })
                }
            })
        });
        record_outcome(&result, bytes.len());
        result
    }

    pub fn header(&self) -> &PduHeader {
        match self {
            Pdu::AggregateState(p) => p.header(),
            Pdu::DirectedEnergyFire(p) => p.header(),
            Pdu::Iff(p) => p.header(),
            Pdu::Unsupported(p) => &p.header,
        }
    }

    pub fn pdu_type(&self) -> u8 {
        self.header().pdu_type
    }

    pub fn length(&self) -> usize {
        match self {
            Pdu::AggregateState(p) => p.length(),
            Pdu::DirectedEnergyFire(p) => p.length(),
            Pdu::Iff(p) => p.length(),
            Pdu::Unsupported(p) => p.length(),
        }
    }

    pub fn put(&self, w: &mut DisWriter<'_>) -> Result<()> {
        match self {
            Pdu::AggregateState(p) => p.put(w),
            Pdu::DirectedEnergyFire(p) => p.put(w),
            Pdu::Iff(p) => p.put(w),
            Pdu::Unsupported(p) => p.put(w),
        }
    }

    pub fn encode(&self, order: ByteOrder) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.length());
        self.put(&mut DisWriter::new(&mut buf, order))?;
        global_metrics().pdu_encoded(buf.len() as u64);
        Ok(buf.freeze())
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Pdu::AggregateState(p) => p.is_valid(),
            Pdu::DirectedEnergyFire(p) => p.is_valid(),
            Pdu::Iff(p) => p.is_valid(),
            Pdu::Unsupported(p) => p.header.is_valid() && p.length() <= MAX_PDU_LENGTH,
        }
    }
}

impl From<AggregateStatePdu> for Pdu {
    fn from(pdu: AggregateStatePdu) -> Self {
        Pdu::AggregateState(pdu)
    }
}

impl From<DirectedEnergyFirePdu> for Pdu {
    fn from(pdu: DirectedEnergyFirePdu) -> Self {
        Pdu::DirectedEnergyFire(pdu)
    }
}

impl From<IffPdu> for Pdu {
    fn from(pdu: IffPdu) -> Self {
        Pdu::Iff(pdu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsupported_bytes() -> Vec<u8> {
        // Entity State type (1), family 1, length 16 with a 4-octet body
        vec![7, 1, 1, 1, 0, 0, 0, 0, 0, 16, 0, 0, 0xDE, 0xAD, 0xBE, 0xEF]
    }

    #[test]
    fn test_unsupported_pdu_relays_verbatim() {
        let bytes = unsupported_bytes();
        let pdu = Pdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
        match &pdu {
            Pdu::Unsupported(p) => assert_eq!(p.body, vec![0xDE, 0xAD, 0xBE, 0xEF]),
            other => panic!("Expected unsupported PDU, got {other:?}"),
        }
        assert_eq!(pdu.length(), 16);
        assert_eq!(&pdu.encode(ByteOrder::BigEndian).unwrap()[..], &bytes[..]);
    }

    #[test]
    fn test_declared_length_beyond_buffer_is_truncation() {
        let mut bytes = unsupported_bytes();
        bytes[9] = 40;
        assert!(matches!(
            Pdu::decode(&bytes, ByteOrder::BigEndian),
            Err(DisError::Truncated { .. })
        ));
    }

    #[test]
    fn test_limit_rejects_oversized() {
        let bytes = unsupported_bytes();
        assert!(matches!(
            Pdu::decode_with_limit(&bytes, ByteOrder::BigEndian, 12),
            Err(DisError::OversizedPdu(16))
        ));
    }

    #[test]
    fn test_trailing_octets_after_declared_length_ignored() {
        let mut bytes = unsupported_bytes();
        bytes.extend_from_slice(&[1, 2, 3]);
        let pdu = Pdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
        assert_eq!(pdu.length(), 16);
    }

    #[test]
    fn test_oversized_unsupported_body_fails_encode() {
        let pdu = Pdu::Unsupported(UnsupportedPdu {
            header: PduHeader::new(PduType::AggregateState),
            body: vec![0; MAX_PDU_LENGTH],
        });
        assert!(!pdu.is_valid());
        assert!(matches!(
            pdu.encode(ByteOrder::BigEndian),
            Err(DisError::OversizedPdu(length)) if length == MAX_PDU_LENGTH + HEADER_LENGTH
        ));
    }
}
