//! # Error Types
//!
//! Error handling for the DIS codec.
//!
//! This module defines every failure a decode or encode operation can surface,
//! from a buffer that ends early to a self-framed record that lies about its size.
//!
//! ## Error Categories
//! - **Truncated input**: fewer octets remain than a field or declared length requires
//! - **Unknown type**: recognised framing around an unrecognised discriminator
//! - **Inconsistent length**: a declared record/layer/PDU length below its own minimum
//! - **Configuration**: invalid codec or logging settings
//! - **Export**: serde failures while exporting decoded PDUs
//!
//! Numeric values that fail domain validation (non-finite floats and the like) are
//! never errors. They are reported through `is_valid()` and left to the caller.
//!
//! Whether an error is fatal depends on where it happens: at the PDU header it
//! rejects the whole PDU, inside an optional layer or a single nested record the
//! decoder recovers and drops just that unit.
//!
//! ## Example Usage
//! ```rust
//! use dis_codec::core::cursor::{ByteOrder, DisReader};
//! use dis_codec::error::DisError;
//!
//! let mut reader = DisReader::new(&[0x01], ByteOrder::BigEndian);
//! match reader.read_u16() {
//!     Err(DisError::Truncated { needed, remaining }) => {
//!         assert_eq!((needed, remaining), (2, 1));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Record and layer names used in length and unknown-type diagnostics
    pub const WHAT_PDU: &str = "PDU";
    pub const WHAT_DE_RECORD: &str = "directed energy record";
    pub const WHAT_IFF_DATA_RECORD: &str = "IFF data record";
    pub const WHAT_IFF_LAYER: &str = "IFF layer";
    pub const WHAT_AGGREGATE_IDS: &str = "aggregate id count";
    pub const WHAT_ENTITY_IDS: &str = "entity id count";
    pub const WHAT_SILENT_AGGREGATES: &str = "silent aggregate system count";
    pub const WHAT_SILENT_ENTITIES: &str = "silent entity system count";
    pub const WHAT_APPEARANCES: &str = "entity appearance count";
    pub const WHAT_VARIABLE_DATA: &str = "variable datum count";
    pub const WHAT_DE_RECORDS: &str = "directed energy record count";
    pub const WHAT_BEAM_PATTERNS: &str = "beam antenna pattern count";
    pub const WHAT_DEPOSITIONS: &str = "target energy deposition count";
    pub const WHAT_IFF_DATA_RECORDS: &str = "IFF data record count";
    pub const WHAT_PARAMETER_DATA: &str = "fundamental parameter count";
}

/// DisError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum DisError {
    /// Surfaced by stream transports driving [`crate::PduCodec`]
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Truncated input: needed {needed} octets, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Unknown {kind} type: {value}")]
    UnknownType { kind: &'static str, value: u32 },

    #[error("Inconsistent {what} length: declared {declared} octets, minimum {minimum}")]
    InconsistentLength {
        what: &'static str,
        declared: usize,
        minimum: usize,
    },

    #[error("Unexpected PDU type: expected {expected}, found {actual}")]
    UnexpectedPduType { expected: u8, actual: u8 },

    #[error("PDU too large: {0} octets")]
    OversizedPdu(usize),

    /// A count or length does not fit the wire field that carries it
    #[error("{what} overflows its wire field: {value} exceeds {limit}")]
    FieldOverflow {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Deserialize error: {0}")]
    DeserializeError(String),
}

impl DisError {
    /// Shorthand for a truncation error.
    pub(crate) fn truncated(needed: usize, remaining: usize) -> Self {
        DisError::Truncated { needed, remaining }
    }

    /// True for errors caused by the shape of the input bytes rather than
    /// by configuration or export.
    pub fn is_wire_error(&self) -> bool {
        matches!(
            self,
            DisError::Truncated { .. }
                | DisError::UnknownType { .. }
                | DisError::InconsistentLength { .. }
                | DisError::UnexpectedPduType { .. }
                | DisError::OversizedPdu(_)
        )
    }
}

/// Type alias for Results using DisError
pub type Result<T> = std::result::Result<T, DisError>;
