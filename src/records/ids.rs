//! Fixed-width compound identifiers.
//!
//! These are referenced, never owned: an Aggregate State PDU lists the
//! entities it aggregates by id, it does not carry them.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::Record;
use crate::error::Result;
use serde::{Deserialize, Serialize};

macro_rules! triple_id {
    ($(#[$doc:meta])* $name:ident, $third:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name {
            pub site: u16,
            pub application: u16,
            pub $third: u16,
        }

        impl $name {
            pub const LENGTH: usize = 6;

            pub const fn new(site: u16, application: u16, $third: u16) -> Self {
                Self {
                    site,
                    application,
                    $third,
                }
            }
        }

        impl Record for $name {
            fn read(r: &mut DisReader<'_>) -> Result<Self> {
                Ok(Self {
                    site: r.read_u16()?,
                    application: r.read_u16()?,
                    $third: r.read_u16()?,
                })
            }

            fn write(&self, w: &mut DisWriter<'_>) {
                w.write_u16(self.site);
                w.write_u16(self.application);
                w.write_u16(self.$third);
            }

            fn length(&self) -> usize {
                Self::LENGTH
            }
        }
    };
}

triple_id!(
    /// Site / application / entity
    EntityId,
    entity
);

triple_id!(
    /// Site / application / aggregate
    AggregateId,
    aggregate
);

triple_id!(
    /// Site / application / event number
    EventId,
    event_number
);

/// Site / application pair identifying a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SimulationAddress {
    pub site: u16,
    pub application: u16,
}

impl SimulationAddress {
    pub const LENGTH: usize = 4;

    pub const fn new(site: u16, application: u16) -> Self {
        Self { site, application }
    }
}

impl Record for SimulationAddress {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        Ok(Self {
            site: r.read_u16()?,
            application: r.read_u16()?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u16(self.site);
        w.write_u16(self.application);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }
}
