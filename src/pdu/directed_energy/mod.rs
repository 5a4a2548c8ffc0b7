//! # Directed Energy Fire PDU
//!
//! Reports the firing of a directed energy weapon: fixed emitter, shot and
//! beam physics fields followed by a list of directed energy records, each
//! either an area aimpoint or a precision aimpoint.
//!
//! ## Wire Format
//! ```text
//! [Header(12)] [FiringEntity(6)] [Event(6)] [MunitionType(8)] [ShotStart(8)]
//! [CumulativeShotTime(4)] [ApertureLocation(12)] [Diameter(4)] [Wavelength(4)]
//! [PeakIrradiance(4)] [PRF(4)] [PulseWidth(4)] [Flags(2)] [PulseShape(1)] [Pad(7)]
//! [#Records(2)] [DE Records...]
//! ```
//!
//! Records of a type this crate does not model are skipped by their declared
//! length and the rest of the list still decodes.

pub mod records;

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::header::{PduHeader, PduType};
use crate::core::pdu::DisPdu;
use crate::core::record::{Record, RecordList};
use crate::error::constants::WHAT_DE_RECORDS;
use crate::error::Result;
use crate::records::{ClockTime, EntityId, EntityType, EventId, Vector32};
use crate::utils::validation::all_valid_f32;
use serde::{Deserialize, Serialize};

pub use records::{
    AreaAimpoint, BeamAntennaPattern, DirectedEnergyRecord, PrecisionAimpoint,
    TargetEnergyDeposition,
};

/// Bits of the `flags` field
pub mod flags {
    pub const WEAPON_ON: u16 = 0x0001;
    pub const STATE_UPDATE: u16 = 0x0002;
}

/// Pulse shape values
pub mod pulse_shape {
    pub const OTHER: u8 = 0;
    pub const SQUARE_WAVE: u8 = 1;
    pub const CONTINUOUS_WAVE: u8 = 2;
    pub const GAUSSIAN: u8 = 3;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectedEnergyFirePdu {
    pub header: PduHeader,
    pub firing_entity_id: EntityId,
    pub event_id: EventId,
    pub munition_type: EntityType,
    pub shot_start_time: ClockTime,
    pub cumulative_shot_time: f32,
    pub aperture_emitter_location: Vector32,
    pub aperture_diameter: f32,
    pub wavelength: f32,
    pub peak_irradiance: f32,
    pub pulse_repetition_frequency: f32,
    pub pulse_width: f32,
    pub flags: u16,
    pub pulse_shape: u8,
    pub de_records: RecordList<DirectedEnergyRecord>,
}

impl Default for DirectedEnergyFirePdu {
    fn default() -> Self {
        Self {
            header: PduHeader::new(PduType::DirectedEnergyFire),
            firing_entity_id: EntityId::default(),
            event_id: EventId::default(),
            munition_type: EntityType::default(),
            shot_start_time: ClockTime::default(),
            cumulative_shot_time: 0.0,
            aperture_emitter_location: Vector32::default(),
            aperture_diameter: 0.0,
            wavelength: 0.0,
            peak_irradiance: 0.0,
            pulse_repetition_frequency: 0.0,
            pulse_width: 0.0,
            flags: 0,
            pulse_shape: pulse_shape::OTHER,
            de_records: RecordList::new(),
        }
    }
}

impl DirectedEnergyFirePdu {
    pub fn new(firing_entity_id: EntityId, event_id: EventId) -> Self {
        Self {
            firing_entity_id,
            event_id,
            ..Self::default()
        }
    }

    pub fn number_of_de_records(&self) -> usize {
        self.de_records.len()
    }

    pub fn add_record(&mut self, record: impl Into<DirectedEnergyRecord>) {
        self.de_records.add(record.into());
    }

    pub fn weapon_on(&self) -> bool {
        self.flags & flags::WEAPON_ON != 0
    }

    pub fn set_weapon_on(&mut self, on: bool) {
        if on {
            self.flags |= flags::WEAPON_ON;
        } else {
            self.flags &= !flags::WEAPON_ON;
        }
    }

    pub fn area_aimpoints(&self) -> impl Iterator<Item = &AreaAimpoint> {
        self.de_records.iter().filter_map(|record| match record {
            DirectedEnergyRecord::AreaAimpoint(area) => Some(area),
            _ => None,
        })
    }

    pub fn precision_aimpoints(&self) -> impl Iterator<Item = &PrecisionAimpoint> {
        self.de_records.iter().filter_map(|record| match record {
            DirectedEnergyRecord::PrecisionAimpoint(precision) => Some(precision),
            _ => None,
        })
    }
}

impl DisPdu for DirectedEnergyFirePdu {
    const PDU_TYPE: PduType = PduType::DirectedEnergyFire;
    const BASE_LENGTH: usize = 88;

    fn header(&self) -> &PduHeader {
        &self.header
    }

    fn get(header: PduHeader, r: &mut DisReader<'_>) -> Result<Self> {
        let firing_entity_id = EntityId::read(r)?;
        let event_id = EventId::read(r)?;
        let munition_type = EntityType::read(r)?;
        let shot_start_time = ClockTime::read(r)?;
        let cumulative_shot_time = r.read_f32()?;
        let aperture_emitter_location = Vector32::read(r)?;
        let aperture_diameter = r.read_f32()?;
        let wavelength = r.read_f32()?;
        let peak_irradiance = r.read_f32()?;
        let pulse_repetition_frequency = r.read_f32()?;
        let pulse_width = r.read_f32()?;
        let flags = r.read_u16()?;
        let pulse_shape = r.read_u8()?;
        r.skip(7)?;
        let record_count = r.read_u16()? as usize;

        Ok(Self {
            header,
            firing_entity_id,
            event_id,
            munition_type,
            shot_start_time,
            cumulative_shot_time,
            aperture_emitter_location,
            aperture_diameter,
            wavelength,
            peak_irradiance,
            pulse_repetition_frequency,
            pulse_width,
            flags,
            pulse_shape,
            de_records: RecordList::read_family(r, record_count),
        })
    }

    fn put_body(&self, w: &mut DisWriter<'_>) {
        self.firing_entity_id.write(w);
        self.event_id.write(w);
        self.munition_type.write(w);
        self.shot_start_time.write(w);
        w.write_f32(self.cumulative_shot_time);
        self.aperture_emitter_location.write(w);
        w.write_f32(self.aperture_diameter);
        w.write_f32(self.wavelength);
        w.write_f32(self.peak_irradiance);
        w.write_f32(self.pulse_repetition_frequency);
        w.write_f32(self.pulse_width);
        w.write_u16(self.flags);
        w.write_u8(self.pulse_shape);
        w.write_zeros(7);
        w.write_count_u16(self.number_of_de_records(), WHAT_DE_RECORDS);
        self.de_records.write(w);
    }

    fn length(&self) -> usize {
        Self::BASE_LENGTH + self.de_records.length()
    }

    fn is_body_valid(&self) -> bool {
        self.de_records.len() <= u16::MAX as usize
            && all_valid_f32(&[
                self.cumulative_shot_time,
                self.aperture_diameter,
                self.wavelength,
                self.peak_irradiance,
                self.pulse_repetition_frequency,
                self.pulse_width,
            ])
            && self.aperture_emitter_location.is_valid()
            && self.de_records.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::ByteOrder;

    fn fire() -> DirectedEnergyFirePdu {
        let mut pdu = DirectedEnergyFirePdu::new(EntityId::new(1, 3, 17), EventId::new(1, 3, 900));
        pdu.munition_type = EntityType::new(2, 9, 225, 1, 0, 0, 0);
        pdu.shot_start_time = ClockTime::new(412_000, 1_200);
        pdu.wavelength = 1.064e-6;
        pdu.peak_irradiance = 4.0e7;
        pdu.pulse_shape = pulse_shape::CONTINUOUS_WAVE;
        pdu.set_weapon_on(true);
        pdu
    }

    #[test]
    fn test_empty_fire_is_base_length() {
        let pdu = DirectedEnergyFirePdu::default();
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        assert_eq!(bytes.len(), DirectedEnergyFirePdu::BASE_LENGTH);
        assert_eq!(bytes[2], 68);
        assert_eq!(bytes[3], 2);
        assert_eq!(&bytes[86..88], &[0u8, 0]);
    }

    #[test]
    fn test_length_sums_records() {
        let mut pdu = fire();
        pdu.add_record(PrecisionAimpoint::default());
        let mut area = AreaAimpoint::new();
        area.target_energy_depositions
            .add(TargetEnergyDeposition::new(EntityId::new(1, 3, 40), 1.0e5));
        pdu.add_record(area);

        assert_eq!(pdu.length(), 88 + 96 + 24);
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
        assert_eq!(bytes.len(), 208);
        assert_eq!(&bytes[8..10], &[0u8, 208]);
        assert_eq!(&bytes[86..88], &[0u8, 2]);

        let back = DirectedEnergyFirePdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
        assert_eq!(back, pdu);
        assert!(back.weapon_on());
        assert_eq!(back.area_aimpoints().count(), 1);
        assert_eq!(back.precision_aimpoints().count(), 1);
    }

    #[test]
    fn test_unframeable_record_drops_tail_only() {
        let mut pdu = fire();
        pdu.add_record(AreaAimpoint::new());
        let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();

        // Claim a second record that is not there
        let mut patched = bytes.to_vec();
        patched[87] = 2;
        let back = DirectedEnergyFirePdu::decode(&patched, ByteOrder::BigEndian).unwrap();
        assert_eq!(back.de_records.len(), 1);
    }

    #[test]
    fn test_little_endian_round_trip() {
        let mut pdu = fire();
        pdu.add_record(PrecisionAimpoint {
            peak_irradiance: 2.5,
            ..PrecisionAimpoint::default()
        });
        let bytes = pdu.encode(ByteOrder::LittleEndian).unwrap();
        assert_eq!(&bytes[8..10], &(bytes.len() as u16).to_le_bytes());
        assert_eq!(
            DirectedEnergyFirePdu::decode(&bytes, ByteOrder::LittleEndian).unwrap(),
            pdu
        );
    }
}
