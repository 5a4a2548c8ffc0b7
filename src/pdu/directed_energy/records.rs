//! Directed energy record family.
//!
//! Every member starts with an 8-octet header: `record_type` u32,
//! `record_length` u16 and two octets of padding. The length covers the header.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::{padding_for, Record, RecordFamily, RecordHeader, RecordList};
use crate::error::constants::{WHAT_BEAM_PATTERNS, WHAT_DEPOSITIONS, WHAT_DE_RECORD};
use crate::error::Result;
use crate::records::{EntityId, EulerAngles, Vector32, Vector64};
use crate::utils::validation::valid_f32;
use serde::{Deserialize, Serialize};

pub const RECORD_TYPE_PRECISION_AIMPOINT: u32 = 4000;
pub const RECORD_TYPE_AREA_AIMPOINT: u32 = 4001;
pub const RECORD_TYPE_DAMAGE_DESCRIPTION: u32 = 4002;

const DE_RECORD_HEADER_LENGTH: usize = 8;
const AREA_AIMPOINT_ALIGNMENT: usize = 8;

/// Antenna pattern of one beam illuminating an area aimpoint
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamAntennaPattern {
    pub beam_direction: EulerAngles,
    pub azimuth_beamwidth: f32,
    pub elevation_beamwidth: f32,
    pub reference_system: u8,
    pub ez: f32,
    pub ex: f32,
    pub phase: f32,
}

impl BeamAntennaPattern {
    pub const LENGTH: usize = 40;
}

impl Record for BeamAntennaPattern {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        let beam_direction = EulerAngles::read(r)?;
        let azimuth_beamwidth = r.read_f32()?;
        let elevation_beamwidth = r.read_f32()?;
        let reference_system = r.read_u8()?;
        r.skip(3)?;
        let pattern = Self {
            beam_direction,
            azimuth_beamwidth,
            elevation_beamwidth,
            reference_system,
            ez: r.read_f32()?,
            ex: r.read_f32()?,
            phase: r.read_f32()?,
        };
        r.skip(4)?;
        Ok(pattern)
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        self.beam_direction.write(w);
        w.write_f32(self.azimuth_beamwidth);
        w.write_f32(self.elevation_beamwidth);
        w.write_u8(self.reference_system);
        w.write_zeros(3);
        w.write_f32(self.ez);
        w.write_f32(self.ex);
        w.write_f32(self.phase);
        w.write_zeros(4);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn is_valid(&self) -> bool {
        self.beam_direction.is_valid()
            && [
                self.azimuth_beamwidth,
                self.elevation_beamwidth,
                self.ez,
                self.ex,
                self.phase,
            ]
            .into_iter()
            .all(valid_f32)
    }
}

/// Peak irradiance deposited on one target entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetEnergyDeposition {
    pub target_entity_id: EntityId,
    pub peak_irradiance: f32,
}

impl TargetEnergyDeposition {
    pub const LENGTH: usize = 12;

    pub const fn new(target_entity_id: EntityId, peak_irradiance: f32) -> Self {
        Self {
            target_entity_id,
            peak_irradiance,
        }
    }
}

impl Record for TargetEnergyDeposition {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        let target_entity_id = EntityId::read(r)?;
        r.skip(2)?;
        Ok(Self {
            target_entity_id,
            peak_irradiance: r.read_f32()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        self.target_entity_id.write(w);
        w.write_zeros(2);
        w.write_f32(self.peak_irradiance);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn is_valid(&self) -> bool {
        valid_f32(self.peak_irradiance)
    }
}

/// Beam spread over an area, described by its antenna patterns and the
/// energy it deposits on each target.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaAimpoint {
    pub beam_antenna_patterns: RecordList<BeamAntennaPattern>,
    pub target_energy_depositions: RecordList<TargetEnergyDeposition>,
}

impl AreaAimpoint {
    /// Header plus the two count fields
    pub const BASE_LENGTH: usize = DE_RECORD_HEADER_LENGTH + 4;

    pub fn new() -> Self {
        Self::default()
    }

    fn unpadded_length(&self) -> usize {
        Self::BASE_LENGTH
            + self.beam_antenna_patterns.length()
            + self.target_energy_depositions.length()
    }

    pub fn padding(&self) -> usize {
        padding_for(self.unpadded_length(), AREA_AIMPOINT_ALIGNMENT)
    }

    pub fn length(&self) -> usize {
        self.unpadded_length() + self.padding()
    }

    fn read_payload(r: &mut DisReader<'_>) -> Result<Self> {
        let pattern_count = r.read_u16()? as usize;
        let deposition_count = r.read_u16()? as usize;
        // Trailing alignment octets stay unread in the bounded payload reader
        Ok(Self {
            beam_antenna_patterns: RecordList::read_count(r, pattern_count)?,
            target_energy_depositions: RecordList::read_count(r, deposition_count)?,
        })
    }

    fn write_payload(&self, w: &mut DisWriter<'_>) {
        w.write_count_u16(self.beam_antenna_patterns.len(), WHAT_BEAM_PATTERNS);
        w.write_count_u16(self.target_energy_depositions.len(), WHAT_DEPOSITIONS);
        self.beam_antenna_patterns.write(w);
        self.target_energy_depositions.write(w);
        w.write_zeros(self.padding());
    }

    pub fn is_valid(&self) -> bool {
        self.beam_antenna_patterns.len() <= u16::MAX as usize
            && self.target_energy_depositions.len() <= u16::MAX as usize
            && self.beam_antenna_patterns.is_valid()
            && self.target_energy_depositions.is_valid()
    }
}

/// Beam focused on a single spot of a single target.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PrecisionAimpoint {
    pub target_spot_location: Vector64,
    pub target_spot_entity_location: Vector32,
    pub target_spot_velocity: Vector32,
    pub target_spot_acceleration: Vector32,
    pub target_entity_id: EntityId,
    pub target_component_id: u8,
    pub beam_spot_type: u8,
    pub beam_spot_semi_major_axis: f32,
    pub beam_spot_semi_minor_axis: f32,
    pub beam_spot_orientation: f32,
    pub peak_irradiance: f32,
}

impl PrecisionAimpoint {
    pub const PAYLOAD_LENGTH: usize = 88;
    pub const LENGTH: usize = DE_RECORD_HEADER_LENGTH + Self::PAYLOAD_LENGTH;

    fn read_payload(r: &mut DisReader<'_>) -> Result<Self> {
        r.ensure(Self::PAYLOAD_LENGTH)?;
        let aimpoint = Self {
            target_spot_location: Vector64::read(r)?,
            target_spot_entity_location: Vector32::read(r)?,
            target_spot_velocity: Vector32::read(r)?,
            target_spot_acceleration: Vector32::read(r)?,
            target_entity_id: EntityId::read(r)?,
            target_component_id: r.read_u8()?,
            beam_spot_type: r.read_u8()?,
            beam_spot_semi_major_axis: r.read_f32()?,
            beam_spot_semi_minor_axis: r.read_f32()?,
            beam_spot_orientation: r.read_f32()?,
            peak_irradiance: r.read_f32()?,
        };
        r.skip(4)?;
        Ok(aimpoint)
    }

    fn write_payload(&self, w: &mut DisWriter<'_>) {
        self.target_spot_location.write(w);
        self.target_spot_entity_location.write(w);
        self.target_spot_velocity.write(w);
        self.target_spot_acceleration.write(w);
        self.target_entity_id.write(w);
        w.write_u8(self.target_component_id);
        w.write_u8(self.beam_spot_type);
        w.write_f32(self.beam_spot_semi_major_axis);
        w.write_f32(self.beam_spot_semi_minor_axis);
        w.write_f32(self.beam_spot_orientation);
        w.write_f32(self.peak_irradiance);
        w.write_zeros(4);
    }

    pub fn is_valid(&self) -> bool {
        self.target_spot_location.is_valid()
            && self.target_spot_entity_location.is_valid()
            && self.target_spot_velocity.is_valid()
            && self.target_spot_acceleration.is_valid()
            && [
                self.beam_spot_semi_major_axis,
                self.beam_spot_semi_minor_axis,
                self.beam_spot_orientation,
                self.peak_irradiance,
            ]
            .into_iter()
            .all(valid_f32)
    }
}

/// Member of the directed energy record family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DirectedEnergyRecord {
    AreaAimpoint(AreaAimpoint),
    PrecisionAimpoint(PrecisionAimpoint),
}

impl RecordFamily for DirectedEnergyRecord {
    const HEADER_LENGTH: usize = DE_RECORD_HEADER_LENGTH;
    const WHAT: &'static str = WHAT_DE_RECORD;

    fn read_header(r: &mut DisReader<'_>) -> Result<RecordHeader> {
        let header = RecordHeader {
            record_type: r.read_u32()?,
            record_length: r.read_u16()?,
        };
        r.skip(2)?;
        Ok(header)
    }

    fn write_header(w: &mut DisWriter<'_>, header: RecordHeader) {
        w.write_u32(header.record_type);
        w.write_u16(header.record_length);
        w.write_zeros(2);
    }

    fn read_payload(record_type: u32, r: &mut DisReader<'_>) -> Result<Option<Self>> {
        Ok(match record_type {
            RECORD_TYPE_AREA_AIMPOINT => Some(Self::AreaAimpoint(AreaAimpoint::read_payload(r)?)),
            RECORD_TYPE_PRECISION_AIMPOINT => {
                Some(Self::PrecisionAimpoint(PrecisionAimpoint::read_payload(r)?))
            }
            _ => None,
        })
    }

    fn record_type(&self) -> u32 {
        match self {
            Self::AreaAimpoint(_) => RECORD_TYPE_AREA_AIMPOINT,
            Self::PrecisionAimpoint(_) => RECORD_TYPE_PRECISION_AIMPOINT,
        }
    }

    fn record_length(&self) -> usize {
        match self {
            Self::AreaAimpoint(a) => a.length(),
            Self::PrecisionAimpoint(_) => PrecisionAimpoint::LENGTH,
        }
    }

    fn write_payload(&self, w: &mut DisWriter<'_>) {
        match self {
            Self::AreaAimpoint(a) => a.write_payload(w),
            Self::PrecisionAimpoint(p) => p.write_payload(w),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::AreaAimpoint(a) => a.is_valid(),
            Self::PrecisionAimpoint(p) => p.is_valid(),
        }
    }
}

impl Record for DirectedEnergyRecord {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Self::read_strict(r)
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        self.write_record(w);
    }

    fn length(&self) -> usize {
        self.record_length()
    }

    fn is_valid(&self) -> bool {
        RecordFamily::is_valid(self)
    }
}

impl From<AreaAimpoint> for DirectedEnergyRecord {
    fn from(record: AreaAimpoint) -> Self {
        Self::AreaAimpoint(record)
    }
}

impl From<PrecisionAimpoint> for DirectedEnergyRecord {
    fn from(record: PrecisionAimpoint) -> Self {
        Self::PrecisionAimpoint(record)
    }
}
