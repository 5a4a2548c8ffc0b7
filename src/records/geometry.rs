//! Vectors, orientations and clock time.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::Record;
use crate::error::Result;
use crate::utils::validation::{all_valid_f32, all_valid_f64};
use serde::{Deserialize, Serialize};

/// Single-precision vector (entity coordinates, velocities, dimensions)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector32 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector32 {
    pub const LENGTH: usize = 12;

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Record for Vector32 {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            x: r.read_f32()?,
            y: r.read_f32()?,
            z: r.read_f32()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn is_valid(&self) -> bool {
        all_valid_f32(&[self.x, self.y, self.z])
    }
}

/// Double-precision vector (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector64 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector64 {
    pub const LENGTH: usize = 24;

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Record for Vector64 {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_f64(self.x);
        w.write_f64(self.y);
        w.write_f64(self.z);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn is_valid(&self) -> bool {
        all_valid_f64(&[self.x, self.y, self.z])
    }
}

/// Euler angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub psi: f32,
    pub theta: f32,
    pub phi: f32,
}

impl EulerAngles {
    pub const LENGTH: usize = 12;

    pub const fn new(psi: f32, theta: f32, phi: f32) -> Self {
        Self { psi, theta, phi }
    }
}

impl Record for EulerAngles {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            psi: r.read_f32()?,
            theta: r.read_f32()?,
            phi: r.read_f32()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_f32(self.psi);
        w.write_f32(self.theta);
        w.write_f32(self.phi);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }

    fn is_valid(&self) -> bool {
        all_valid_f32(&[self.psi, self.theta, self.phi])
    }
}

/// Hours since 0000 1 January 1970 UTC plus time past the hour in DIS time units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: i32,
    pub time_past_hour: u32,
}

impl ClockTime {
    pub const LENGTH: usize = 8;

    pub const fn new(hour: i32, time_past_hour: u32) -> Self {
        Self {
            hour,
            time_past_hour,
        }
    }
}

impl Record for ClockTime {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            hour: r.read_i32()?,
            time_past_hour: r.read_u32()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_i32(self.hour);
        w.write_u32(self.time_past_hour);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::ByteOrder;
    use bytes::BytesMut;

    #[test]
    fn test_vector_validity() {
        assert!(Vector32::new(1.0, 2.0, 3.0).is_valid());
        assert!(!Vector32::new(f32::NAN, 0.0, 0.0).is_valid());
        assert!(!Vector64::new(0.0, f64::INFINITY, 0.0).is_valid());
        assert!(!EulerAngles::new(0.0, 0.0, f32::NAN).is_valid());
    }

    #[test]
    fn test_clock_time_negative_hour() {
        let t = ClockTime::new(-3, 1_000);
        let mut buf = BytesMut::new();
        t.write(&mut DisWriter::new(&mut buf, ByteOrder::BigEndian));
        assert_eq!(buf.len(), ClockTime::LENGTH);
        assert_eq!(&buf[..4], &[0xFFu8, 0xFF, 0xFF, 0xFD]);
        assert_eq!(
            ClockTime::read(&mut DisReader::new(&buf, ByteOrder::BigEndian)).unwrap(),
            t
        );
    }

    #[test]
    fn test_vector64_layout_length() {
        let v = Vector64::new(1.5, -2.5, 1e7);
        let mut buf = BytesMut::new();
        v.write(&mut DisWriter::new(&mut buf, ByteOrder::LittleEndian));
        assert_eq!(buf.len(), v.length());
        let back = Vector64::read(&mut DisReader::new(&buf, ByteOrder::LittleEndian)).unwrap();
        assert_eq!(back, v);
    }
}
