//! # Aggregate State PDU
//!
//! Describes a group of entities and sub-aggregates represented at reduced
//! fidelity. The body carries fixed identification and kinematics, two flat
//! arrays of referenced ids, two silent-system containers and a variable
//! datum container.
//!
//! ## Wire Format
//! ```text
//! [Header(12)] [Id(6)] [Force(1)] [State(1)] [Type(8)] [Formation(4)] [Marking(32)]
//! [Dimensions(12)] [Orientation(12)] [CenterOfMass(24)] [Velocity(12)]
//! [#AggIds(2)] [#EntIds(2)] [#SilentAgg(2)] [#SilentEnt(2)]
//! [AggIds(6n)] [EntIds(6m)] [Padding] [SilentAgg...] [SilentEnt...] [#Datums(4)] [Datums...]
//! ```
//!
//! The padding after the id arrays is `padding_for(n + m, 4)` octets: zero when
//! the id count is already a multiple of four. It sits in the middle of the
//! body, ahead of the silent systems, on both read and write.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::header::{PduHeader, PduType};
use crate::core::pdu::DisPdu;
use crate::core::record::{padding_for, Record, RecordList};
use crate::error::constants::{
    WHAT_AGGREGATE_IDS, WHAT_ENTITY_IDS, WHAT_SILENT_AGGREGATES, WHAT_SILENT_ENTITIES,
    WHAT_VARIABLE_DATA,
};
use crate::error::Result;
use crate::records::{
    AggregateId, AggregateMarking, AggregateType, EntityId, EulerAngles, SilentAggregateSystem,
    SilentEntitySystem, Vector32, Vector64, VariableDatum,
};
use serde::{Deserialize, Serialize};

/// Force id values
pub mod force {
    pub const OTHER: u8 = 0;
    pub const FRIENDLY: u8 = 1;
    pub const OPPOSING: u8 = 2;
    pub const NEUTRAL: u8 = 3;
}

/// Aggregate state values
pub mod state {
    pub const OTHER: u8 = 0;
    pub const AGGREGATED: u8 = 1;
    pub const DISAGGREGATED: u8 = 2;
    pub const FULLY_DISAGGREGATED: u8 = 3;
    pub const PSEUDO_DISAGGREGATED: u8 = 4;
    pub const PARTIALLY_DISAGGREGATED: u8 = 5;
}

/// Formation values
pub mod formation {
    pub const OTHER: u32 = 0;
    pub const ASSEMBLY: u32 = 1;
    pub const VEE: u32 = 2;
    pub const WEDGE: u32 = 3;
    pub const LINE: u32 = 4;
    pub const COLUMN: u32 = 5;
}

const ID_ALIGNMENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatePdu {
    pub header: PduHeader,
    pub aggregate_id: AggregateId,
    pub force_id: u8,
    pub aggregate_state: u8,
    pub aggregate_type: AggregateType,
    pub formation: u32,
    pub marking: AggregateMarking,
    pub dimensions: Vector32,
    pub orientation: EulerAngles,
    pub center_of_mass: Vector64,
    pub velocity: Vector32,
    pub aggregate_ids: Vec<AggregateId>,
    pub entity_ids: Vec<EntityId>,
    pub silent_aggregate_systems: RecordList<SilentAggregateSystem>,
    pub silent_entity_systems: RecordList<SilentEntitySystem>,
    pub variable_data: RecordList<VariableDatum>,
}

impl Default for AggregateStatePdu {
    fn default() -> Self {
        Self {
            header: PduHeader::new(PduType::AggregateState),
            aggregate_id: AggregateId::default(),
            force_id: force::OTHER,
            aggregate_state: state::OTHER,
            aggregate_type: AggregateType::default(),
            formation: formation::OTHER,
            marking: AggregateMarking::default(),
            dimensions: Vector32::default(),
            orientation: EulerAngles::default(),
            center_of_mass: Vector64::default(),
            velocity: Vector32::default(),
            aggregate_ids: Vec::new(),
            entity_ids: Vec::new(),
            silent_aggregate_systems: RecordList::new(),
            silent_entity_systems: RecordList::new(),
            variable_data: RecordList::new(),
        }
    }
}

impl AggregateStatePdu {
    pub fn new(aggregate_id: AggregateId) -> Self {
        Self {
            aggregate_id,
            ..Self::default()
        }
    }

    pub fn number_of_aggregate_ids(&self) -> usize {
        self.aggregate_ids.len()
    }

    pub fn number_of_entity_ids(&self) -> usize {
        self.entity_ids.len()
    }

    pub fn number_of_silent_aggregate_systems(&self) -> usize {
        self.silent_aggregate_systems.len()
    }

    pub fn number_of_silent_entity_systems(&self) -> usize {
        self.silent_entity_systems.len()
    }

    pub fn number_of_variable_datums(&self) -> usize {
        self.variable_data.len()
    }

    /// Filler octets between the id arrays and the silent systems
    pub fn id_padding(&self) -> usize {
        padding_for(self.aggregate_ids.len() + self.entity_ids.len(), ID_ALIGNMENT)
    }

    pub fn add_aggregate_id(&mut self, id: AggregateId) {
        self.aggregate_ids.push(id);
    }

    pub fn add_entity_id(&mut self, id: EntityId) {
        self.entity_ids.push(id);
    }

    fn counts_fit(&self) -> bool {
        let max = u16::MAX as usize;
        self.aggregate_ids.len() <= max
            && self.entity_ids.len() <= max
            && self.silent_aggregate_systems.len() <= max
            && self.silent_entity_systems.len() <= max
    }
}

impl DisPdu for AggregateStatePdu {
    const PDU_TYPE: PduType = PduType::AggregateState;
    const BASE_LENGTH: usize = 136;

    fn header(&self) -> &PduHeader {
        &self.header
    }

    fn get(header: PduHeader, r: &mut DisReader<'_>) -> Result<Self> {
        let mut pdu = Self {
            header,
            aggregate_id: AggregateId::read(r)?,
            force_id: r.read_u8()?,
            aggregate_state: r.read_u8()?,
            aggregate_type: AggregateType::read(r)?,
            formation: r.read_u32()?,
            marking: AggregateMarking::read(r)?,
            dimensions: Vector32::read(r)?,
            orientation: EulerAngles::read(r)?,
            center_of_mass: Vector64::read(r)?,
            velocity: Vector32::read(r)?,
            ..Self::default()
        };

        let aggregate_count = r.read_u16()? as usize;
        let entity_count = r.read_u16()? as usize;
        let silent_aggregate_count = r.read_u16()? as usize;
        let silent_entity_count = r.read_u16()? as usize;

        r.ensure((aggregate_count + entity_count) * AggregateId::LENGTH)?;
        pdu.aggregate_ids = (0..aggregate_count)
            .map(|_| AggregateId::read(r))
            .collect::<Result<_>>()?;
        pdu.entity_ids = (0..entity_count)
            .map(|_| EntityId::read(r))
            .collect::<Result<_>>()?;
        r.skip(padding_for(aggregate_count + entity_count, ID_ALIGNMENT))?;

        // Sections past the id arrays degrade: keep what decoded, drop the rest.
        let (silent_aggregates, failed) =
            RecordList::read_lenient(r, silent_aggregate_count, "silent aggregate systems");
        pdu.silent_aggregate_systems = silent_aggregates;
        if failed.is_some() {
            return Ok(pdu);
        }

        let (silent_entities, failed) =
            RecordList::read_lenient(r, silent_entity_count, "silent entity systems");
        pdu.silent_entity_systems = silent_entities;
        if failed.is_some() {
            return Ok(pdu);
        }

        let datum_count = match r.read_u32() {
            Ok(count) => count as usize,
            Err(_) => return Ok(pdu),
        };
        let (variable_data, _) = RecordList::read_lenient(r, datum_count, "variable datums");
        pdu.variable_data = variable_data;

        Ok(pdu)
    }

    fn put_body(&self, w: &mut DisWriter<'_>) {
        self.aggregate_id.write(w);
        w.write_u8(self.force_id);
        w.write_u8(self.aggregate_state);
        self.aggregate_type.write(w);
        w.write_u32(self.formation);
        self.marking.write(w);
        self.dimensions.write(w);
        self.orientation.write(w);
        self.center_of_mass.write(w);
        self.velocity.write(w);

        w.write_count_u16(self.number_of_aggregate_ids(), WHAT_AGGREGATE_IDS);
        w.write_count_u16(self.number_of_entity_ids(), WHAT_ENTITY_IDS);
        w.write_count_u16(
            self.number_of_silent_aggregate_systems(),
            WHAT_SILENT_AGGREGATES,
        );
        w.write_count_u16(self.number_of_silent_entity_systems(), WHAT_SILENT_ENTITIES);

        for id in &self.aggregate_ids {
            id.write(w);
        }
        for id in &self.entity_ids {
            id.write(w);
        }
        w.write_zeros(self.id_padding());

        self.silent_aggregate_systems.write(w);
        self.silent_entity_systems.write(w);
        w.write_count_u32(self.number_of_variable_datums(), WHAT_VARIABLE_DATA);
        self.variable_data.write(w);
    }

    fn length(&self) -> usize {
        Self::BASE_LENGTH
            + AggregateId::LENGTH * self.aggregate_ids.len()
            + EntityId::LENGTH * self.entity_ids.len()
            + self.id_padding()
            + self.silent_aggregate_systems.length()
            + self.silent_entity_systems.length()
            + self.variable_data.length()
    }

    fn is_body_valid(&self) -> bool {
        self.counts_fit()
            && self.dimensions.is_valid()
            && self.orientation.is_valid()
            && self.center_of_mass.is_valid()
            && self.velocity.is_valid()
            && self.silent_aggregate_systems.is_valid()
            && self.silent_entity_systems.is_valid()
            && self.variable_data.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::ByteOrder;
    use crate::error::DisError;
    use crate::records::EntityType;

    /// Offset of the first id octet in an encoded Aggregate State PDU
    const IDS_OFFSET: usize = 132;

    fn sample(aggregates: u16, entities: u16) -> AggregateStatePdu {
        let mut pdu = AggregateStatePdu::new(AggregateId::new(1, 2, 3));
        pdu.force_id = force::FRIENDLY;
        pdu.aggregate_state = state::AGGREGATED;
        pdu.formation = formation::WEDGE;
        pdu.marking = AggregateMarking::from_ascii("1/A/2-7");
        pdu.center_of_mass = Vector64::new(1.0e6, -2.0e6, 3.0e6);
        for i in 0..aggregates {
            pdu.add_aggregate_id(AggregateId::new(1, 2, 100 + i));
        }
        for i in 0..entities {
            pdu.add_entity_id(EntityId::new(1, 2, 200 + i));
        }
        pdu.silent_aggregate_systems
            .add(SilentAggregateSystem::new(2, AggregateType::new(1, 1, 225, 3, 0, 0, 0)));
        let mut silent = SilentEntitySystem::new(5, EntityType::new(1, 1, 225, 1, 1, 3, 0));
        silent.appearances = vec![0x0001_0000, 0x0002_0000];
        pdu.silent_entity_systems.add(silent);
        pdu.variable_data.add(VariableDatum::new(52_000, b"ECHELON".to_vec()));
        pdu
    }

    #[test]
    fn test_empty_pdu_length() {
        let pdu = AggregateStatePdu::default();
        assert_eq!(pdu.length(), AggregateStatePdu::BASE_LENGTH);
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        assert_eq!(bytes.len(), 136);
        assert_eq!(&bytes[8..10], &[0u8, 136]);
    }

    #[test]
    fn test_length_beyond_header_field_fails_encode() {
        let mut pdu = AggregateStatePdu::default();
        for i in 0..11_000u16 {
            pdu.add_entity_id(EntityId::new(1, 1, i));
        }
        assert_eq!(pdu.length(), 66_136);
        assert!(!pdu.is_valid());
        assert!(matches!(
            pdu.encode(ByteOrder::BigEndian),
            Err(DisError::OversizedPdu(66_136))
        ));

        // 136 + 6 * 10_899 + 1 octet of padding
        pdu.entity_ids.truncate(10_899);
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        assert_eq!(bytes.len(), 65_531);
        assert_eq!(&bytes[8..10], &[0xFFu8, 0xFB]);
        assert_eq!(
            AggregateStatePdu::decode(&bytes, ByteOrder::BigEndian).unwrap(),
            pdu
        );
    }

    #[test]
    fn test_five_ids_emit_three_padding_octets() {
        let pdu = sample(3, 2);
        assert_eq!(pdu.id_padding(), 3);

        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        assert_eq!(bytes.len(), pdu.length());

        let pad_start = IDS_OFFSET + 5 * 6;
        assert_eq!(&bytes[pad_start..pad_start + 3], &[0u8, 0, 0]);
        // Silent aggregate system count follows the padding immediately
        assert_eq!(&bytes[pad_start + 3..pad_start + 5], &[0u8, 2]);

        let decoded = AggregateStatePdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
        assert_eq!(decoded, pdu);
    }

    #[test]
    fn test_aligned_id_count_emits_no_padding() {
        let pdu = sample(2, 2);
        assert_eq!(pdu.id_padding(), 0);

        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        let after_ids = IDS_OFFSET + 4 * 6;
        assert_eq!(&bytes[after_ids..after_ids + 2], &[0u8, 2]);
        assert_eq!(
            AggregateStatePdu::decode(&bytes, ByteOrder::BigEndian).unwrap(),
            pdu
        );
    }

    #[test]
    fn test_counts_derived_from_collections() {
        let mut pdu = sample(1, 0);
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        assert_eq!(&bytes[124..132], &[0u8, 1, 0, 0, 0, 1, 0, 1]);

        pdu.aggregate_ids.clear();
        pdu.silent_entity_systems.remove_all();
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        assert_eq!(&bytes[124..132], &[0u8, 0, 0, 0, 0, 1, 0, 0]);
        assert_eq!(bytes.len(), pdu.length());
    }

    #[test]
    fn test_truncated_variable_data_degrades() {
        let mut pdu = sample(3, 2);
        pdu.variable_data.add(VariableDatum::new(52_001, vec![9; 20]));
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();

        // Cut into the second datum and patch the header length to match
        let cut = bytes.len() - 10;
        let mut truncated = bytes[..cut].to_vec();
        truncated[8..10].copy_from_slice(&(cut as u16).to_be_bytes());

        let decoded = AggregateStatePdu::decode(&truncated, ByteOrder::BigEndian).unwrap();
        assert_eq!(decoded.variable_data.len(), 1);
        assert_eq!(decoded.entity_ids, pdu.entity_ids);
        assert_eq!(decoded.silent_entity_systems, pdu.silent_entity_systems);
    }

    #[test]
    fn test_truncated_id_array_rejects_pdu() {
        let pdu = sample(3, 2);
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        let cut = IDS_OFFSET + 10;
        let mut truncated = bytes[..cut].to_vec();
        truncated[8..10].copy_from_slice(&(cut as u16).to_be_bytes());
        assert!(AggregateStatePdu::decode(&truncated, ByteOrder::BigEndian).is_err());
    }

    #[test]
    fn test_validity_tracks_kinematics() {
        let mut pdu = sample(0, 0);
        assert!(pdu.is_valid());
        pdu.velocity.x = f32::NAN;
        assert!(!pdu.is_valid());
    }
}
