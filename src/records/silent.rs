//! Silent aggregate and silent entity system records.
//!
//! A silent system summarises members of an aggregate that do not publish
//! their own state: how many of a given type exist, and for entities the
//! appearance of each.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::Record;
use crate::error::constants::WHAT_APPEARANCES;
use crate::error::Result;
use crate::records::types::{AggregateType, EntityType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SilentAggregateSystem {
    pub number_of_aggregates: u16,
    pub aggregate_type: AggregateType,
}

impl SilentAggregateSystem {
    pub const LENGTH: usize = 12;

    pub const fn new(number_of_aggregates: u16, aggregate_type: AggregateType) -> Self {
        Self {
            number_of_aggregates,
            aggregate_type,
        }
    }
}

impl Record for SilentAggregateSystem {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        let number_of_aggregates = r.read_u16()?;
        r.skip(2)?;
        Ok(Self {
            number_of_aggregates,
            aggregate_type: AggregateType::read(r)?,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u16(self.number_of_aggregates);
        w.write_zeros(2);
        self.aggregate_type.write(w);
    }

    fn length(&self) -> usize {
        Self::LENGTH
    }
}

/// Entity count and type, followed by one 32-bit appearance per listed entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SilentEntitySystem {
    pub number_of_entities: u16,
    pub entity_type: EntityType,
    pub appearances: Vec<u32>,
}

impl SilentEntitySystem {
    pub const BASE_LENGTH: usize = 12;

    pub fn new(number_of_entities: u16, entity_type: EntityType) -> Self {
        Self {
            number_of_entities,
            entity_type,
            appearances: Vec::new(),
        }
    }
}

impl Record for SilentEntitySystem {
    fn read(r: &mut DisReader<'_>) -> Result<Self> {
        let number_of_entities = r.read_u16()?;
        let appearance_count = r.read_u16()? as usize;
        let entity_type = EntityType::read(r)?;
        r.ensure(appearance_count * 4)?;
        let appearances = (0..appearance_count)
            .map(|_| r.read_u32())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            number_of_entities,
            entity_type,
            appearances,
        })
    }

    fn write(&self, w: &mut DisWriter<'_>) {
        w.write_u16(self.number_of_entities);
        w.write_count_u16(self.appearances.len(), WHAT_APPEARANCES);
        self.entity_type.write(w);
        for appearance in &self.appearances {
            w.write_u32(*appearance);
        }
    }

    fn length(&self) -> usize {
        Self::BASE_LENGTH + 4 * self.appearances.len()
    }

    fn is_valid(&self) -> bool {
        self.appearances.len() <= u16::MAX as usize
    }
}
