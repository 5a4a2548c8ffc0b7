//! PDU header shared by every DIS PDU.
//!
//! ```text
//! [Version(1)] [Exercise(1)] [Type(1)] [Family(1)] [Timestamp(4)] [Length(2)] [Status(1)] [Pad(1)]
//! ```

use crate::core::cursor::{DisReader, DisWriter};
use crate::error::{constants, DisError, Result};
use serde::{Deserialize, Serialize};

/// Octets occupied by the PDU header
pub const HEADER_LENGTH: usize = 12;

/// Protocol version written by freshly constructed PDUs (IEEE 1278.1-2012)
pub const DIS_PROTOCOL_VERSION_7: u8 = 7;

/// PDU types this codec materialises. Everything else travels as an opaque body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PduType {
    Iff = 28,
    AggregateState = 33,
    DirectedEnergyFire = 68,
}

impl PduType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            28 => Some(PduType::Iff),
            33 => Some(PduType::AggregateState),
            68 => Some(PduType::DirectedEnergyFire),
            _ => None,
        }
    }

    /// Family each PDU type belongs to
    pub fn family(self) -> ProtocolFamily {
        match self {
            PduType::Iff => ProtocolFamily::DistributedEmissionRegeneration,
            PduType::AggregateState => ProtocolFamily::EntityManagement,
            PduType::DirectedEnergyFire => ProtocolFamily::Warfare,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PduType::Iff => "IFF",
            PduType::AggregateState => "AggregateState",
            PduType::DirectedEnergyFire => "DirectedEnergyFire",
        }
    }
}

/// Protocol family enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProtocolFamily {
    Other = 0,
    EntityInformation = 1,
    Warfare = 2,
    Logistics = 3,
    RadioCommunications = 4,
    SimulationManagement = 5,
    DistributedEmissionRegeneration = 6,
    EntityManagement = 7,
    Minefield = 8,
    SyntheticEnvironment = 9,
    SimulationManagementReliable = 10,
    LiveEntity = 11,
    NonRealTime = 12,
    InformationOperations = 13,
}

impl ProtocolFamily {
    pub fn from_u8(value: u8) -> Option<Self> {
        use ProtocolFamily::*;
        Some(match value {
            0 => Other,
            1 => EntityInformation,
            2 => Warfare,
            3 => Logistics,
            4 => RadioCommunications,
            5 => SimulationManagement,
            6 => DistributedEmissionRegeneration,
            7 => EntityManagement,
            8 => Minefield,
            9 => SyntheticEnvironment,
            10 => SimulationManagementReliable,
            11 => LiveEntity,
            12 => NonRealTime,
            13 => InformationOperations,
            _ => return None,
        })
    }
}

/// The 12-octet header preceding every PDU body.
///
/// The length field is not stored: it is a function of the PDU contents and
/// is computed each time the PDU is written, so a constructed, cloned or
/// edited PDU can never carry a stale value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PduHeader {
    pub protocol_version: u8,
    pub exercise_id: u8,
    pub pdu_type: u8,
    pub protocol_family: u8,
    pub timestamp: u32,
    pub pdu_status: u8,
}

impl PduHeader {
    /// Header for a freshly constructed PDU of the given type
    pub fn new(pdu_type: PduType) -> Self {
        Self {
            protocol_version: DIS_PROTOCOL_VERSION_7,
            exercise_id: 1,
            pdu_type: pdu_type as u8,
            protocol_family: pdu_type.family() as u8,
            timestamp: 0,
            pdu_status: 0,
        }
    }

    pub fn kind(&self) -> Option<PduType> {
        PduType::from_u8(self.pdu_type)
    }

    pub fn family(&self) -> Option<ProtocolFamily> {
        ProtocolFamily::from_u8(self.protocol_family)
    }

    /// Read a header together with the total PDU length it declares.
    pub fn read(r: &mut DisReader<'_>) -> Result<(Self, usize)> {
        if r.remaining() < HEADER_LENGTH {
            return Err(DisError::truncated(HEADER_LENGTH, r.remaining()));
        }
        let protocol_version = r.read_u8()?;
        let exercise_id = r.read_u8()?;
        let pdu_type = r.read_u8()?;
        let protocol_family = r.read_u8()?;
        let timestamp = r.read_u32()?;
        let length = r.read_u16()? as usize;
        let pdu_status = r.read_u8()?;
        r.skip(1)?;

        if length < HEADER_LENGTH {
            return Err(DisError::InconsistentLength {
                what: constants::WHAT_PDU,
                declared: length,
                minimum: HEADER_LENGTH,
            });
        }
        let header = Self {
            protocol_version,
            exercise_id,
            pdu_type,
            protocol_family,
            timestamp,
            pdu_status,
        };
        Ok((header, length))
    }

    /// Write the header declaring `length` total octets.
    pub fn write(&self, w: &mut DisWriter<'_>, length: u16) {
        w.write_u8(self.protocol_version);
        w.write_u8(self.exercise_id);
        w.write_u8(self.pdu_type);
        w.write_u8(self.protocol_family);
        w.write_u32(self.timestamp);
        w.write_u16(length);
        w.write_u8(self.pdu_status);
        w.write_zeros(1);
    }

    pub fn is_valid(&self) -> bool {
        self.protocol_version != 0
    }
}
