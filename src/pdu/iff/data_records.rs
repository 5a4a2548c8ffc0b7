//! IFF data records carried inside layers 3 and 5.
//!
//! Each record starts with `record_type` u32 and `record_length` u16 and is
//! padded to a 4-octet boundary. The length covers header and padding.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::{padding_for, Record, RecordFamily, RecordHeader};
use crate::error::constants::WHAT_IFF_DATA_RECORD;
use crate::error::Result;
use crate::utils::validation::{all_valid_f64, valid_f32};
use serde::{Deserialize, Serialize};

pub const RECORD_TYPE_AIS_POSITION_REPORT: u32 = 3200;
pub const RECORD_TYPE_AIS_STATIC_VOYAGE: u32 = 3201;

const IFF_RECORD_HEADER_LENGTH: usize = 6;
const IFF_RECORD_ALIGNMENT: usize = 4;

pub const CALL_SIGN_LENGTH: usize = 7;
pub const SHIP_NAME_LENGTH: usize = 20;
pub const DESTINATION_LENGTH: usize = 20;

/// Automatic identification position report
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AisPositionReport {
    pub mmsi: u32,
    pub navigation_status: u8,
    pub position_accuracy: u8,
    pub rate_of_turn: i16,
    pub speed_over_ground: f32,
    pub course_over_ground: f32,
    pub true_heading: u16,
    pub timestamp_second: u8,
    pub latitude: f64,
    pub longitude: f64,
}

impl AisPositionReport {
    pub const PAYLOAD_LENGTH: usize = 36;

    /// Latitude reported when no position fix is available
    pub const LATITUDE_NOT_AVAILABLE: f64 = 91.0;
    /// Longitude reported when no position fix is available
    pub const LONGITUDE_NOT_AVAILABLE: f64 = 181.0;

    fn read_payload(r: &mut DisReader<'_>) -> Result<Self> {
        r.ensure(Self::PAYLOAD_LENGTH)?;
        let mmsi = r.read_u32()?;
        let navigation_status = r.read_u8()?;
        let position_accuracy = r.read_u8()?;
        let rate_of_turn = r.read_i16()?;
        let speed_over_ground = r.read_f32()?;
        let course_over_ground = r.read_f32()?;
        let true_heading = r.read_u16()?;
        let timestamp_second = r.read_u8()?;
        r.skip(1)?;
        Ok(Self {
            mmsi,
            navigation_status,
            position_accuracy,
            rate_of_turn,
            speed_over_ground,
            course_over_ground,
            true_heading,
            timestamp_second,
            latitude: r.read_f64()?,
            longitude: r.read_f64()?,
        })
    }

    fn write_payload(&self, w: &mut DisWriter<'_>) {
        w.write_u32(self.mmsi);
        w.write_u8(self.navigation_status);
        w.write_u8(self.position_accuracy);
        w.write_i16(self.rate_of_turn);
        w.write_f32(self.speed_over_ground);
        w.write_f32(self.course_over_ground);
        w.write_u16(self.true_heading);
        w.write_u8(self.timestamp_second);
        w.write_zeros(1);
        w.write_f64(self.latitude);
        w.write_f64(self.longitude);
    }

    pub fn is_valid(&self) -> bool {
        valid_f32(self.speed_over_ground)
            && valid_f32(self.course_over_ground)
            && all_valid_f64(&[self.latitude, self.longitude])
            && ((-90.0..=90.0).contains(&self.latitude)
                || self.latitude == Self::LATITUDE_NOT_AVAILABLE)
            && ((-180.0..=180.0).contains(&self.longitude)
                || self.longitude == Self::LONGITUDE_NOT_AVAILABLE)
    }
}

/// Automatic identification static and voyage data
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AisStaticVoyage {
    pub mmsi: u32,
    pub imo_number: u32,
    pub call_sign: [u8; CALL_SIGN_LENGTH],
    pub ship_name: [u8; SHIP_NAME_LENGTH],
    pub ship_type: u8,
    pub dimension_to_bow: u16,
    pub dimension_to_stern: u16,
    pub dimension_to_port: u8,
    pub dimension_to_starboard: u8,
    pub draught: f32,
    pub destination: [u8; DESTINATION_LENGTH],
    pub eta_month: u8,
    pub eta_day: u8,
    pub eta_hour: u8,
    pub eta_minute: u8,
}

impl AisStaticVoyage {
    pub const PAYLOAD_LENGTH: usize = 70;

    pub fn ship_name(&self) -> String {
        text_field(&self.ship_name)
    }

    pub fn set_ship_name(&mut self, name: &str) {
        fill_text_field(&mut self.ship_name, name);
    }

    pub fn call_sign(&self) -> String {
        text_field(&self.call_sign)
    }

    pub fn set_call_sign(&mut self, call_sign: &str) {
        fill_text_field(&mut self.call_sign, call_sign);
    }

    pub fn destination(&self) -> String {
        text_field(&self.destination)
    }

    pub fn set_destination(&mut self, destination: &str) {
        fill_text_field(&mut self.destination, destination);
    }

    fn read_payload(r: &mut DisReader<'_>) -> Result<Self> {
        r.ensure(Self::PAYLOAD_LENGTH)?;
        Ok(Self {
            mmsi: r.read_u32()?,
            imo_number: r.read_u32()?,
            call_sign: r.read_array()?,
            ship_name: r.read_array()?,
            ship_type: r.read_u8()?,
            dimension_to_bow: r.read_u16()?,
            dimension_to_stern: r.read_u16()?,
            dimension_to_port: r.read_u8()?,
            dimension_to_starboard: r.read_u8()?,
            draught: r.read_f32()?,
            destination: r.read_array()?,
            eta_month: r.read_u8()?,
            eta_day: r.read_u8()?,
            eta_hour: r.read_u8()?,
            eta_minute: r.read_u8()?,
        })
    }

    fn write_payload(&self, w: &mut DisWriter<'_>) {
        w.write_u32(self.mmsi);
        w.write_u32(self.imo_number);
        w.write_bytes(&self.call_sign);
        w.write_bytes(&self.ship_name);
        w.write_u8(self.ship_type);
        w.write_u16(self.dimension_to_bow);
        w.write_u16(self.dimension_to_stern);
        w.write_u8(self.dimension_to_port);
        w.write_u8(self.dimension_to_starboard);
        w.write_f32(self.draught);
        w.write_bytes(&self.destination);
        w.write_u8(self.eta_month);
        w.write_u8(self.eta_day);
        w.write_u8(self.eta_hour);
        w.write_u8(self.eta_minute);
    }

    pub fn is_valid(&self) -> bool {
        valid_f32(self.draught) && self.eta_month <= 12 && self.eta_hour <= 24 && self.eta_minute <= 60
    }
}

fn text_field(field: &[u8]) -> String {
    let end = field.iter().position(|&c| c == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn fill_text_field(field: &mut [u8], text: &str) {
    field.fill(0);
    for (slot, byte) in field.iter_mut().zip(text.bytes()) {
        *slot = byte;
    }
}

/// Member of the IFF data record family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IffDataRecord {
    AisPositionReport(AisPositionReport),
    AisStaticVoyage(AisStaticVoyage),
}

impl IffDataRecord {
    fn payload_length(&self) -> usize {
        match self {
            Self::AisPositionReport(_) => AisPositionReport::PAYLOAD_LENGTH,
            Self::AisStaticVoyage(_) => AisStaticVoyage::PAYLOAD_LENGTH,
        }
    }

    fn padding(&self) -> usize {
        padding_for(
            IFF_RECORD_HEADER_LENGTH + self.payload_length(),
            IFF_RECORD_ALIGNMENT,
        )
    }
}

impl RecordFamily for IffDataRecord {
    const HEADER_LENGTH: usize = IFF_RECORD_HEADER_LENGTH;
    const WHAT: &'static str = WHAT_IFF_DATA_RECORD;

    fn read_header(r: &mut DisReader<'_>) -> Result<RecordHeader> {
        Ok(RecordHeader {
            record_type: r.read_u32()?,
            record_length: r.read_u16()?,
        })
    }

    fn write_header(w: &mut DisWriter<'_>, header: RecordHeader) {
        w.write_u32(header.record_type);
        w.write_u16(header.record_length);
    }

    fn read_payload(record_type: u32, r: &mut DisReader<'_>) -> Result<Option<Self>> {
        Ok(match record_type {
            RECORD_TYPE_AIS_POSITION_REPORT => {
                Some(Self::AisPositionReport(AisPositionReport::read_payload(r)?))
            }
            RECORD_TYPE_AIS_STATIC_VOYAGE => {
                Some(Self::AisStaticVoyage(AisStaticVoyage::read_payload(r)?))
            }
            _ => None,
        })
    }

    fn record_type(&self) -> u32 {
        match self {
            Self::AisPositionReport(_) => RECORD_TYPE_AIS_POSITION_REPORT,
            Self::AisStaticVoyage(_) => RECORD_TYPE_AIS_STATIC_VOYAGE,
        }
    }

    fn record_length(&self) -> usize {
        IFF_RECORD_HEADER_LENGTH + self.payload_length() + self.padding()
    }

    fn write_payload(&self, w: &mut DisWriter<'_>) {
        match self {
            Self::AisPositionReport(p) => p.write_payload(w),
            Self::AisStaticVoyage(s) => s.write_payload(w),
        }
        w.write_zeros(self.padding());
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::AisPositionReport(p) => p.is_valid(),
            Self::AisStaticVoyage(s) => s.is_valid(),
        }
    }
}

impl Record for IffDataRecord {
    /// Unknown or short records are errors here: they fail the enclosing layer.
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

impl From<AisPositionReport> for IffDataRecord {
    fn from(record: AisPositionReport) -> Self {
        Self::AisPositionReport(record)
    }
}

impl From<AisStaticVoyage> for IffDataRecord {
    fn from(record: AisStaticVoyage) -> Self {
        Self::AisStaticVoyage(record)
    }
}
