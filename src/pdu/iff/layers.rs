//! IFF layers and the records they are built from.
//!
//! Every layer past the first starts with a 4-octet [`LayerHeader`] whose
//! `layer_length` covers the header itself. Lengths are always recomputed from
//! the layer's contents before writing.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::{Record, RecordList};
use crate::error::constants::{WHAT_IFF_DATA_RECORDS, WHAT_IFF_LAYER, WHAT_PARAMETER_DATA};
use crate::error::Result;
use crate::pdu::iff::data_records::IffDataRecord;
use crate::records::SimulationAddress;
use crate::utils::validation::all_valid_f32;
use serde::{Deserialize, Serialize};

pub const LAYER_HEADER_LENGTH: usize = 4;

/// Bitmask of present layers: bit `n` set means layer `n` is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InformationLayers(u8);

impl InformationLayers {
    /// Highest layer number the bitmask can describe
    pub const MAX_LAYER: u8 = 7;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, layer: u8) -> bool {
        layer <= Self::MAX_LAYER && self.0 & (1 << layer) != 0
    }

    pub fn insert(&mut self, layer: u8) {
        if layer <= Self::MAX_LAYER {
            self.0 |= 1 << layer;
        }
    }

    pub fn remove(&mut self, layer: u8) {
        if layer <= Self::MAX_LAYER {
            self.0 &= !(1 << layer);
        }
    }

    /// Layer numbers above the first whose bit is set, in ascending order
    pub fn higher_layers(self) -> impl Iterator<Item = u8> {
        (2..=Self::MAX_LAYER).filter(move |&layer| self.contains(layer))
    }
}

/// Sub-header framing every layer above the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerHeader {
    pub layer_number: u8,
    pub layer_specific_information: u8,
    pub layer_length: u16,
}

impl Record for LayerHeader {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            layer_number: r.read_u8()?,
            layer_specific_information: r.read_u8()?,
            layer_length: r.read_u16()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u8(self.layer_number);
        w.write_u8(self.layer_specific_information);
        w.write_u16(self.layer_length);
    }

    fn length(&self) -> usize {
        LAYER_HEADER_LENGTH
    }
}

/// Status, data fields and mode parameters of layer 1.
///
/// The information layers octet that sits between `data_field_1` and
/// `data_field_2` on the wire is not stored here; the PDU derives it from the
/// layers it actually holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FundamentalOperationalData {
    pub system_status: u8,
    pub data_field_1: u8,
    pub data_field_2: u8,
    pub parameters: [u16; 6],
}

impl FundamentalOperationalData {
    pub const LENGTH: usize = 16;

    /// System is operational
    pub const STATUS_SYSTEM_ON: u8 = 0x01;

    pub fn read(r: &mut DisReader<'_>) -> Result<(Self, InformationLayers)> {
        let system_status = r.read_u8()?;
        let data_field_1 = r.read_u8()?;
        let layers = InformationLayers::from_bits(r.read_u8()?);
        let data_field_2 = r.read_u8()?;
        let mut parameters = [0u16; 6];
        for parameter in &mut parameters {
            *parameter = r.read_u16()?;
        }
        Ok((
            Self {
                system_status,
                data_field_1,
                data_field_2,
                parameters,
            },
            layers,
        ))
    }

    pub fn write(&self, w: &mut DisWriter<'_>, layers: InformationLayers) {
        w.write_u8(self.system_status);
        w.write_u8(self.data_field_1);
        w.write_u8(layers.bits());
        w.write_u8(self.data_field_2);
        for parameter in self.parameters {
            w.write_u16(parameter);
        }
    }
}

/// Beam sweep geometry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamData {
    pub azimuth_center: f32,
    pub azimuth_sweep: f32,
    pub elevation_center: f32,
    pub elevation_sweep: f32,
    pub sweep_sync: f32,
}

impl Record for BeamData {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            azimuth_center: r.read_f32()?,
            azimuth_sweep: r.read_f32()?,
            elevation_center: r.read_f32()?,
            elevation_sweep: r.read_f32()?,
            sweep_sync: r.read_f32()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_f32(self.azimuth_center);
        w.write_f32(self.azimuth_sweep);
        w.write_f32(self.elevation_center);
        w.write_f32(self.elevation_sweep);
        w.write_f32(self.sweep_sync);
    }

    fn length(&self) -> usize {
        20
    }

    fn is_valid(&self) -> bool {
        all_valid_f32(&[
            self.azimuth_center,
            self.azimuth_sweep,
            self.elevation_center,
            self.elevation_sweep,
            self.sweep_sync,
        ])
    }
}

/// Emission parameters of one IFF mode
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FundamentalParameterData {
    pub effective_radiated_power: f32,
    pub frequency: f32,
    pub pulse_repetition_frequency: f32,
    pub pulse_width: f32,
    pub burst_length: u32,
    pub applicable_modes: u8,
    pub system_specific_data: [u8; 3],
}

impl FundamentalParameterData {
    pub const LENGTH: usize = 24;
}

impl Record for FundamentalParameterData {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            effective_radiated_power: r.read_f32()?,
            frequency: r.read_f32()?,
            pulse_repetition_frequency: r.read_f32()?,
            pulse_width: r.read_f32()?,
            burst_length: r.read_u32()?,
            applicable_modes: r.read_u8()?,
            system_specific_data: r.read_array()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_f32(self.effective_radiated_power);
        w.write_f32(self.frequency);
        w.write_f32(self.pulse_repetition_frequency);
        w.write_f32(self.pulse_width);
        w.write_u32(self.burst_length);
        w.write_u8(self.applicable_modes);
        w.write_bytes(&self.system_specific_data);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn is_valid(&self) -> bool {
        all_valid_f32(&[
            self.effective_radiated_power,
            self.frequency,
            self.pulse_repetition_frequency,
            self.pulse_width,
        ])
    }
}

/// Layer 2: beam data and per-mode emission parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionsLayer {
    pub layer_specific_information: u8,
    pub beam_data: BeamData,
    pub operational_parameter_1: u8,
    pub operational_parameter_2: u8,
    pub parameter_data: RecordList<FundamentalParameterData>,
}

impl EmissionsLayer {
    pub const LAYER_NUMBER: u8 = 2;
    pub const MIN_LENGTH: usize = 28;

    pub fn length(&self) -> usize {
        Self::MIN_LENGTH + self.parameter_data.length()
    }

    pub(crate) fn read_body(header: LayerHeader, r: &mut DisReader<'_>) -> Result<Self> {
        let beam_data = BeamData::read(r)?;
        let operational_parameter_1 = r.read_u8()?;
        let operational_parameter_2 = r.read_u8()?;
        let count = r.read_u16()? as usize;
        Ok(Self {
            layer_specific_information: header.layer_specific_information,
            beam_data,
            operational_parameter_1,
            operational_parameter_2,
            parameter_data: RecordList::read_count(r, count)?,
        })
    }

    pub fn write(&self, w: &mut DisWriter<'_>) {
        layer_header(w, Self::LAYER_NUMBER, self.layer_specific_information, self.length()).write(w);
        self.beam_data.write(w);
        w.write_u8(self.operational_parameter_1);
        w.write_u8(self.operational_parameter_2);
        w.write_count_u16(self.parameter_data.len(), WHAT_PARAMETER_DATA);
        self.parameter_data.write(w);
    }

    pub fn is_valid(&self) -> bool {
        self.length() <= u16::MAX as usize
            && self.beam_data.is_valid()
            && self.parameter_data.is_valid()
    }
}

/// Mode 5 basic interrogator/transponder data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mode5BasicData {
    pub status: u16,
    pub pin: u16,
    pub message_formats: u32,
    pub enhanced_mode_1: u16,
    pub national_origin: u16,
    pub supplemental_data: u8,
    pub navigation_source: u8,
    pub figure_of_merit: u8,
}

impl Record for Mode5BasicData {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        let data = Self {
            status: r.read_u16()?,
            pin: r.read_u16()?,
            message_formats: r.read_u32()?,
            enhanced_mode_1: r.read_u16()?,
            national_origin: r.read_u16()?,
            supplemental_data: r.read_u8()?,
            navigation_source: r.read_u8()?,
            figure_of_merit: r.read_u8()?,
        };
        r.skip(1)?;
        Ok(data)
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u16(self.status);
        w.write_u16(self.pin);
        w.write_u32(self.message_formats);
        w.write_u16(self.enhanced_mode_1);
        w.write_u16(self.national_origin);
        w.write_u8(self.supplemental_data);
        w.write_u8(self.navigation_source);
        w.write_u8(self.figure_of_merit);
        w.write_zeros(1);
    }

    fn length(&self) -> usize {
        16
    }
}

/// Layer 3: Mode 5 functional data with optional IFF data records
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mode5Layer {
    pub layer_specific_information: u8,
    pub reporting_simulation: SimulationAddress,
    pub basic_data: Mode5BasicData,
    pub data_records: RecordList<IffDataRecord>,
}

impl Mode5Layer {
    pub const LAYER_NUMBER: u8 = 3;
    pub const MIN_LENGTH: usize = 28;

    pub fn length(&self) -> usize {
        Self::MIN_LENGTH + self.data_records.length()
    }

    pub(crate) fn read_body(header: LayerHeader, r: &mut DisReader<'_>) -> Result<Self> {
        let reporting_simulation = SimulationAddress::read(r)?;
        let basic_data = Mode5BasicData::read(r)?;
        r.skip(2)?;
        let count = r.read_u16()? as usize;
        Ok(Self {
            layer_specific_information: header.layer_specific_information,
            reporting_simulation,
            basic_data,
            data_records: RecordList::read_count(r, count)?,
        })
    }

    pub fn write(&self, w: &mut DisWriter<'_>) {
        layer_header(w, Self::LAYER_NUMBER, self.layer_specific_information, self.length()).write(w);
        self.reporting_simulation.write(w);
        self.basic_data.write(w);
        w.write_zeros(2);
        w.write_count_u16(self.data_records.len(), WHAT_IFF_DATA_RECORDS);
        self.data_records.write(w);
    }

    pub fn is_valid(&self) -> bool {
        self.length() <= u16::MAX as usize && self.data_records.is_valid()
    }
}

/// Layer 5: data communications with optional IFF data records
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataCommunicationsLayer {
    pub layer_specific_information: u8,
    pub reporting_simulation: SimulationAddress,
    pub application_status: u8,
    pub data_records: RecordList<IffDataRecord>,
}

impl DataCommunicationsLayer {
    pub const LAYER_NUMBER: u8 = 5;
    pub const MIN_LENGTH: usize = 12;

    pub fn length(&self) -> usize {
        Self::MIN_LENGTH + self.data_records.length()
    }

    pub(crate) fn read_body(header: LayerHeader, r: &mut DisReader<'_>) -> Result<Self> {
        let reporting_simulation = SimulationAddress::read(r)?;
        let application_status = r.read_u8()?;
        r.skip(1)?;
        let count = r.read_u16()? as usize;
        Ok(Self {
            layer_specific_information: header.layer_specific_information,
            reporting_simulation,
            application_status,
            data_records: RecordList::read_count(r, count)?,
        })
    }

    pub fn write(&self, w: &mut DisWriter<'_>) {
        layer_header(w, Self::LAYER_NUMBER, self.layer_specific_information, self.length()).write(w);
        self.reporting_simulation.write(w);
        w.write_u8(self.application_status);
        w.write_zeros(1);
        w.write_count_u16(self.data_records.len(), WHAT_IFF_DATA_RECORDS);
        self.data_records.write(w);
    }

    pub fn is_valid(&self) -> bool {
        self.length() <= u16::MAX as usize && self.data_records.is_valid()
    }
}

fn layer_header(
    w: &mut DisWriter<'_>,
    layer_number: u8,
    layer_specific_information: u8,
    length: usize,
) -> LayerHeader {
    LayerHeader {
        layer_number,
        layer_specific_information,
        layer_length: w.narrow_u16(length, WHAT_IFF_LAYER),
    }
}
