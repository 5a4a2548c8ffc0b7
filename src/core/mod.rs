//! # Core Codec Components
//!
//! Binary cursor, PDU header, record abstractions and PDU framing.
//!
//! This module provides the foundation every PDU type is built on: typed
//! bounded reads and writes, the shared 12-octet header, the record and
//! record container contracts, and header-driven framing over byte streams.
//!
//! ## Components
//! - **Cursor**: bounds-checked reader/writer in a configurable byte order
//! - **Header**: PDU type, protocol family and self-reported length
//! - **Record**: record trait, owning containers, polymorphic family dispatch
//! - **Pdu**: framing contract and the decoded-PDU sum type
//! - **Codec**: Tokio codec for framing PDUs over byte streams
//! - **Serialization**: self-describing export of decoded PDUs
//!
//! ## Wire Format
//! ```text
//! [Version(1)] [Exercise(1)] [Type(1)] [Family(1)] [Timestamp(4)] [Length(2)] [Status(1)] [Pad(1)] [Body(N)]
//! ```
//!
//! ## Safety
//! - Every read is bounds-checked and fails with `Truncated` instead of panicking
//! - Declared lengths are checked against the remaining input before use
//! - Maximum PDU size is bounded by the 16-bit length field and the configured ceiling

pub mod codec;
pub mod cursor;
pub mod header;
pub mod pdu;
pub mod record;
pub mod serialization;
