//! IFF system identification record.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::Record;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identifies the IFF/ATC/NAVAIDS system an IFF PDU describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemId {
    pub system_type: u16,
    pub system_name: u16,
    pub system_mode: u8,
    pub change_options: u8,
}

impl SystemId {
    pub const LENGTH: usize = 6;

    /// Mark X/XII/ATCRBS/Mode S transponder
    pub const TYPE_MARK_X_XII_ATCRBS_MODE_S_TRANSPONDER: u16 = 1;
    /// Mark X/XII/ATCRBS/Mode S interrogator
    pub const TYPE_MARK_X_XII_ATCRBS_MODE_S_INTERROGATOR: u16 = 2;

    pub const fn new(system_type: u16, system_name: u16, system_mode: u8, change_options: u8) -> Self {
        Self {
            system_type,
            system_name,
            system_mode,
            change_options,
        }
    }

    /// Change indicator bit: the system's state changed since the last PDU.
    pub fn change_indicator(&self) -> bool {
        self.change_options & 0x01 != 0
    }

    pub fn set_change_indicator(&mut self, changed: bool) {
        if changed {
            self.change_options |= 0x01;
        } else {
            self.change_options &= !0x01;
        }
    }
}

impl Record for SystemId {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            system_type: r.read_u16()?,
            system_name: r.read_u16()?,
            system_mode: r.read_u8()?,
            change_options: r.read_u8()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u16(self.system_type);
        w.write_u16(self.system_name);
        w.write_u8(self.system_mode);
        w.write_u8(self.change_options);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }
}
