//! # IFF/ATC/NAVAIDS PDU
//!
//! Identification friend or foe, air traffic control and navigation aid
//! emissions. Layer 1 is always present; layers 2, 3 and 5 are optional
//! sections selected by the information layers bitmask in layer 1's
//! fundamental operational data.
//!
//! ## Wire Format
//! ```text
//! Layer 1: [Header(12)] [EmittingEntity(6)] [Event(6)] [AntennaLocation(12)]
//!          [SystemId(6)] [Designator(1)] [SpecificData(1)] [FundamentalOpData(16)]
//! Layer n: [LayerNumber(1)] [LayerInfo(1)] [LayerLength(2)] [Body...]
//! ```
//!
//! ## Layer decode
//! Each layer whose bit is set is read in ascending order. A layer that fails
//! in any way is reset to absent and its bit cleared; the PDU still decodes.
//! - Header unreadable, number mismatch or length outside `4..=remaining`:
//!   nothing is consumed, so the next expected layer is tried at the same place
//! - Length below the layer's minimum or a body that fails to decode: the
//!   declared length is consumed and decoding continues after it
//!
//! Layers 4, 6 and 7 are not modelled. A present one is skipped by its
//! declared length and its bit cleared.

pub mod data_records;
pub mod layers;

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::header::{PduHeader, PduType};
use crate::core::pdu::DisPdu;
use crate::core::record::Record;
use crate::error::constants::WHAT_IFF_LAYER;
use crate::error::{DisError, Result};
use crate::records::{EntityId, EventId, SystemId, Vector32};
use crate::utils::metrics::global_metrics;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use data_records::{AisPositionReport, AisStaticVoyage, IffDataRecord};
pub use layers::{
    BeamData, DataCommunicationsLayer, EmissionsLayer, FundamentalOperationalData,
    FundamentalParameterData, InformationLayers, LayerHeader, Mode5BasicData, Mode5Layer,
    LAYER_HEADER_LENGTH,
};

const LAYER_1: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IffPdu {
    pub header: PduHeader,
    pub emitting_entity_id: EntityId,
    pub event_id: EventId,
    pub relative_antenna_location: Vector32,
    pub system_id: SystemId,
    pub system_designator: u8,
    pub system_specific_data: u8,
    pub fundamental_operational_data: FundamentalOperationalData,
    pub layer2: Option<EmissionsLayer>,
    pub layer3: Option<Mode5Layer>,
    pub layer5: Option<DataCommunicationsLayer>,
}

impl Default for IffPdu {
    fn default() -> Self {
        Self {
            header: PduHeader::new(PduType::Iff),
            emitting_entity_id: EntityId::default(),
            event_id: EventId::default(),
            relative_antenna_location: Vector32::default(),
            system_id: SystemId::default(),
            system_designator: 0,
            system_specific_data: 0,
            fundamental_operational_data: FundamentalOperationalData::default(),
            layer2: None,
            layer3: None,
            layer5: None,
        }
    }
}

impl IffPdu {
    pub fn new(emitting_entity_id: EntityId, event_id: EventId, system_id: SystemId) -> Self {
        Self {
            emitting_entity_id,
            event_id,
            system_id,
            ..Self::default()
        }
    }

    /// Bitmask derived from the layers currently held
    pub fn information_layers(&self) -> InformationLayers {
        let mut layers = InformationLayers::default();
        layers.insert(LAYER_1);
        if self.layer2.is_some() {
            layers.insert(EmissionsLayer::LAYER_NUMBER);
        }
        if self.layer3.is_some() {
            layers.insert(Mode5Layer::LAYER_NUMBER);
        }
        if self.layer5.is_some() {
            layers.insert(DataCommunicationsLayer::LAYER_NUMBER);
        }
        layers
    }

    pub fn has_layer(&self, layer: u8) -> bool {
        self.information_layers().contains(layer)
    }

    /// Drop an optional layer. Layer 1 cannot be removed.
    pub fn clear_layer(&mut self, layer: u8) {
        match layer {
            EmissionsLayer::LAYER_NUMBER => self.layer2 = None,
            Mode5Layer::LAYER_NUMBER => self.layer3 = None,
            DataCommunicationsLayer::LAYER_NUMBER => self.layer5 = None,
            _ => {}
        }
    }

    fn read_layers(&mut self, declared: InformationLayers, r: &mut DisReader<'_>) {
        for layer in declared.higher_layers() {
            match layer {
                EmissionsLayer::LAYER_NUMBER => {
                    self.layer2 = read_layer(
                        r,
                        layer,
                        EmissionsLayer::MIN_LENGTH,
                        EmissionsLayer::read_body,
                    );
                }
                Mode5Layer::LAYER_NUMBER => {
                    self.layer3 = read_layer(r, layer, Mode5Layer::MIN_LENGTH, Mode5Layer::read_body);
                }
                DataCommunicationsLayer::LAYER_NUMBER => {
                    self.layer5 = read_layer(
                        r,
                        layer,
                        DataCommunicationsLayer::MIN_LENGTH,
                        DataCommunicationsLayer::read_body,
                    );
                }
                _ => skip_layer(r, layer),
            }
        }
    }
}

/// Split one layer's span off the reader, leaving the reader untouched when
/// the layer cannot be framed.
fn frame_layer<'a>(
    r: &mut DisReader<'a>,
    layer: u8,
) -> Result<(LayerHeader, DisReader<'a>)> {
    let mut lookahead = r.clone();
    let header = LayerHeader::read(&mut lookahead)?;
    if header.layer_number != layer {
        return Err(DisError::UnknownType {
            kind: WHAT_IFF_LAYER,
            value: u32::from(header.layer_number),
        });
    }
    let declared = header.layer_length as usize;
    if declared < LAYER_HEADER_LENGTH {
        return Err(DisError::InconsistentLength {
            what: WHAT_IFF_LAYER,
            declared,
            minimum: LAYER_HEADER_LENGTH,
        });
    }
    let body = lookahead.take(declared - LAYER_HEADER_LENGTH)?;
    *r = lookahead;
    Ok((header, body))
}

fn read_layer<L>(
    r: &mut DisReader<'_>,
    layer: u8,
    minimum: usize,
    read_body: fn(LayerHeader, &mut DisReader<'_>) -> Result<L>,
) -> Option<L> {
    let result = frame_layer(r, layer).and_then(|(header, mut body)| {
        let declared = header.layer_length as usize;
        if declared < minimum {
            return Err(DisError::InconsistentLength {
                what: WHAT_IFF_LAYER,
                declared,
                minimum,
            });
        }
        read_body(header, &mut body)
    });

    match result {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(layer, error = %e, "IFF layer reset to absent");
            global_metrics().layer_reset();
            None
        }
    }
}

fn skip_layer(r: &mut DisReader<'_>, layer: u8) {
    match frame_layer(r, layer) {
        Ok((header, _)) => {
            debug!(layer, layer_length = header.layer_length, "Skipped unmodelled IFF layer");
        }
        Err(e) => {
            warn!(layer, error = %e, "Unmodelled IFF layer could not be framed");
            global_metrics().layer_reset();
        }
    }
}

impl DisPdu for IffPdu {
    const PDU_TYPE: PduType = PduType::Iff;
    const BASE_LENGTH: usize = 60;

    fn header(&self) -> &PduHeader {
        &self.header
    }

    fn get(header: PduHeader, r: &mut DisReader<'_>) -> Result<Self> {
        let emitting_entity_id = EntityId::read(r)?;
        let event_id = EventId::read(r)?;
        let relative_antenna_location = Vector32::read(r)?;
        let system_id = SystemId::read(r)?;
        let system_designator = r.read_u8()?;
        let system_specific_data = r.read_u8()?;
        let (fundamental_operational_data, declared) = FundamentalOperationalData::read(r)?;

        let mut pdu = Self {
            header,
            emitting_entity_id,
            event_id,
            relative_antenna_location,
            system_id,
            system_designator,
            system_specific_data,
            fundamental_operational_data,
            ..Self::default()
        };
        pdu.read_layers(declared, r);
        Ok(pdu)
    }

    fn put_body(&self, w: &mut DisWriter<'_>) {
        self.emitting_entity_id.write(w);
        self.event_id.write(w);
        self.relative_antenna_location.write(w);
        self.system_id.write(w);
        w.write_u8(self.system_designator);
        w.write_u8(self.system_specific_data);
        self.fundamental_operational_data
            .write(w, self.information_layers());

        if let Some(layer) = &self.layer2 {
            layer.write(w);
        }
        if let Some(layer) = &self.layer3 {
            layer.write(w);
        }
        if let Some(layer) = &self.layer5 {
            layer.write(w);
        }
    }

    fn length(&self) -> usize {
        Self::BASE_LENGTH
            + self.layer2.as_ref().map_or(0, EmissionsLayer::length)
            + self.layer3.as_ref().map_or(0, Mode5Layer::length)
            + self.layer5.as_ref().map_or(0, DataCommunicationsLayer::length)
    }

    fn is_body_valid(&self) -> bool {
        self.relative_antenna_location.is_valid()
            && self.layer2.as_ref().map_or(true, EmissionsLayer::is_valid)
            && self.layer3.as_ref().map_or(true, Mode5Layer::is_valid)
            && self.layer5.as_ref().map_or(true, DataCommunicationsLayer::is_valid)
    }
}
