//! # dis-codec
//!
//! Byte-exact encoder and decoder for IEEE 1278.1 Distributed Interactive
//! Simulation PDUs: Aggregate State, Directed Energy Fire and IFF/ATC/NAVAIDS,
//! plus opaque pass-through of every other PDU type.
//!
//! ## Modules
//! - [`core`]: binary cursor, header, record abstractions, PDU framing, stream codec
//! - [`records`]: leaf records shared by the PDUs
//! - [`pdu`]: the concrete PDU types
//! - [`config`]: wire and logging configuration
//! - [`utils`]: logging setup, metrics, numeric validation
//! - [`error`]: the error taxonomy
//!
//! ## Decode policy
//! A malformed header rejects the PDU. A malformed optional layer or nested
//! record is dropped and the rest of the PDU still decodes; the
//! `records_skipped` and `layers_reset` counters in [`utils::metrics`] record
//! how often that happens.
//!
//! ## Example
//! ```rust
//! use dis_codec::core::cursor::ByteOrder;
//! use dis_codec::pdu::AggregateStatePdu;
//! use dis_codec::records::{AggregateId, EntityId};
//! use dis_codec::{DisPdu, Pdu};
//!
//! let mut pdu = AggregateStatePdu::new(AggregateId::new(1, 1, 10));
//! pdu.add_entity_id(EntityId::new(1, 1, 11));
//!
//! let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
//! assert_eq!(bytes.len(), pdu.length());
//!
//! match Pdu::decode(&bytes, ByteOrder::BigEndian).unwrap() {
//!     Pdu::AggregateState(decoded) => assert_eq!(decoded, pdu),
//!     other => panic!("unexpected PDU: {other:?}"),
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod pdu;
pub mod records;
pub mod utils;

pub use crate::core::codec::PduCodec;
pub use crate::core::cursor::{ByteOrder, DisReader, DisWriter};
pub use crate::core::header::{PduHeader, PduType, ProtocolFamily};
pub use crate::core::pdu::{DisPdu, Pdu, UnsupportedPdu, MAX_PDU_LENGTH};
pub use crate::core::record::{Record, RecordFamily, RecordList};
pub use crate::error::{DisError, Result};
