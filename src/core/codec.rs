//! # PDU Stream Codec
//!
//! Frames PDUs over a byte stream using the header's self-reported length.
//! A frame is complete once `length` octets are buffered; the length field
//! sits at offset 8 of the header in the configured byte order.
//!
//! Datagram transports deliver one PDU per packet and can call
//! [`Pdu::decode`] directly. This codec is for stream transports and for
//! files of concatenated PDUs.

use crate::core::cursor::{ByteOrder, DisWriter};
use crate::core::header::HEADER_LENGTH;
use crate::core::pdu::{Pdu, MAX_PDU_LENGTH};
use crate::error::constants::WHAT_PDU;
use crate::error::DisError;
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

const LENGTH_OFFSET: usize = 8;

/// Frames [`Pdu`]s by header length with a size ceiling
#[derive(Debug, Clone, Copy)]
pub struct PduCodec {
    order: ByteOrder,
    max_length: usize,
}

impl Default for PduCodec {
    fn default() -> Self {
        Self::new(ByteOrder::BigEndian, MAX_PDU_LENGTH)
    }
}

impl PduCodec {
    pub fn new(order: ByteOrder, max_length: usize) -> Self {
        Self {
            order,
            max_length: max_length.min(MAX_PDU_LENGTH),
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn declared_length(&self, src: &[u8]) -> usize {
        let raw = [src[LENGTH_OFFSET], src[LENGTH_OFFSET + 1]];
        match self.order {
            ByteOrder::BigEndian => u16::from_be_bytes(raw) as usize,
            ByteOrder::LittleEndian => u16::from_le_bytes(raw) as usize,
        }
    }
}

impl Decoder for PduCodec {
    type Item = Pdu;
    type Error = DisError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < HEADER_LENGTH {
            return Ok(None);
        }

        let declared = self.declared_length(src);
        if declared < HEADER_LENGTH {
            return Err(DisError::InconsistentLength {
                what: WHAT_PDU,
                declared,
                minimum: HEADER_LENGTH,
            });
        }
        if declared > self.max_length {
            return Err(DisError::OversizedPdu(declared));
        }
        if src.len() < declared {
            src.reserve(declared - src.len());
            return Ok(None);
        }

        let frame = src.split_to(declared);
        Pdu::decode_with_limit(&frame, self.order, self.max_length).map(Some)
    }
}

impl Encoder<Pdu> for PduCodec {
    type Error = DisError;

    fn encode(&mut self, item: Pdu, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let length = item.length();
        if length > self.max_length {
            return Err(DisError::OversizedPdu(length));
        }
        dst.reserve(length);
        let start = dst.len();
        let result = item.put(&mut DisWriter::new(dst, self.order));
        if result.is_err() {
            dst.truncate(start);
        }
        result
    }
}
