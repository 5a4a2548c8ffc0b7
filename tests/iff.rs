//! Integration tests for the IFF/ATC/NAVAIDS PDU
//!
//! Exercise the layer presence state machine: layers that fail to decode are
//! reset to absent while the rest of the PDU decodes normally.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use dis_codec::pdu::iff::{
    AisPositionReport, AisStaticVoyage, BeamData, DataCommunicationsLayer, EmissionsLayer,
    FundamentalParameterData, IffDataRecord, Mode5BasicData, Mode5Layer,
};
use dis_codec::pdu::IffPdu;
use dis_codec::records::{EntityId, EventId, SimulationAddress, SystemId, Vector32};
use dis_codec::utils::metrics::global_metrics;
use dis_codec::{ByteOrder, DisError, DisPdu, Pdu};

const LAYER_2_OFFSET: usize = 60;
/// Layer 2 with one parameter set
const LAYER_2_LENGTH: usize = 52;
const LAYER_3_OFFSET: usize = LAYER_2_OFFSET + LAYER_2_LENGTH;
/// Layer 3 with one AIS position report
const LAYER_3_LENGTH: usize = 72;
const LAYER_5_OFFSET: usize = LAYER_3_OFFSET + LAYER_3_LENGTH;

fn vessel() -> IffPdu {
    let mut pdu = IffPdu::new(
        EntityId::new(7, 1, 300),
        EventId::new(7, 1, 12),
        SystemId::new(SystemId::TYPE_MARK_X_XII_ATCRBS_MODE_S_TRANSPONDER, 4, 1, 0),
    );
    pdu.relative_antenna_location = Vector32::new(0.0, 0.0, 12.0);
    pdu.fundamental_operational_data.system_status = 0x01;
    pdu.fundamental_operational_data.parameters = [0x1200, 0x2000, 0, 0, 0, 0];

    let mut emissions = EmissionsLayer {
        beam_data: BeamData {
            azimuth_center: 0.0,
            azimuth_sweep: 6.28,
            elevation_center: 0.0,
            elevation_sweep: 0.5,
            sweep_sync: 0.0,
        },
        ..EmissionsLayer::default()
    };
    emissions.parameter_data.add(FundamentalParameterData {
        effective_radiated_power: 27.0,
        frequency: 1.09e9,
        pulse_repetition_frequency: 450.0,
        pulse_width: 0.45,
        burst_length: 3,
        applicable_modes: 0x03,
        system_specific_data: [0; 3],
    });
    pdu.layer2 = Some(emissions);

    let mut mode5 = Mode5Layer {
        reporting_simulation: SimulationAddress::new(7, 1),
        basic_data: Mode5BasicData {
            status: 0x8001,
            pin: 1234,
            message_formats: 0x0000_00FF,
            national_origin: 225,
            ..Mode5BasicData::default()
        },
        ..Mode5Layer::default()
    };
    mode5.data_records.add(IffDataRecord::from(AisPositionReport {
        mmsi: 366_123_000,
        speed_over_ground: 14.2,
        course_over_ground: 88.0,
        true_heading: 90,
        latitude: 37.80,
        longitude: -122.41,
        ..AisPositionReport::default()
    }));
    pdu.layer3 = Some(mode5);

    let mut voyage = AisStaticVoyage {
        mmsi: 366_123_000,
        imo_number: 9_321_483,
        ship_type: 70,
        draught: 11.2,
        ..AisStaticVoyage::default()
    };
    voyage.set_ship_name("PACIFIC TRADER");
    let mut comms = DataCommunicationsLayer {
        reporting_simulation: SimulationAddress::new(7, 1),
        application_status: 1,
        ..DataCommunicationsLayer::default()
    };
    comms.data_records.add(IffDataRecord::from(voyage));
    pdu.layer5 = Some(comms);

    pdu
}

fn set_length(bytes: &mut [u8]) {
    let total = bytes.len() as u16;
    bytes[8..10].copy_from_slice(&total.to_be_bytes());
}

#[test]
fn test_all_layers_round_trip() {
    let pdu = vessel();
    assert_eq!(pdu.information_layers().bits(), 0b0010_1110);

    let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
    assert_eq!(bytes.len(), 60 + 52 + 72 + 88);
    assert_eq!(&bytes[LAYER_2_OFFSET..LAYER_2_OFFSET + 4], &[2u8, 0, 0, 52]);
    assert_eq!(&bytes[LAYER_3_OFFSET..LAYER_3_OFFSET + 4], &[3u8, 0, 0, 72]);
    assert_eq!(&bytes[LAYER_5_OFFSET..LAYER_5_OFFSET + 4], &[5u8, 0, 0, 88]);

    match Pdu::decode(&bytes, ByteOrder::BigEndian).unwrap() {
        Pdu::Iff(decoded) => assert_eq!(decoded, pdu),
        other => panic!("Expected IFF, got {other:?}"),
    }
}

#[test]
fn test_truncated_layer_three_resets_only_layer_three() {
    let pdu = vessel();
    let mut bytes = pdu.encode(ByteOrder::BigEndian).unwrap().to_vec();

    // Layer 3 claims a second data record that its span cannot hold
    bytes[LAYER_3_OFFSET + 27] = 2;

    let before = global_metrics().snapshot().layers_reset;
    let decoded = IffPdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
    assert!(global_metrics().snapshot().layers_reset > before);

    assert!(decoded.layer3.is_none());
    assert!(!decoded.has_layer(3));
    assert_eq!(decoded.layer2, pdu.layer2);
    assert_eq!(decoded.layer5, pdu.layer5);
    assert_eq!(decoded.emitting_entity_id, pdu.emitting_entity_id);
    assert_eq!(decoded.information_layers().bits(), 0b0010_0110);

    // Re-encoding emits only what survived
    assert_eq!(decoded.encode(ByteOrder::BigEndian).unwrap().len(), 60 + 52 + 88);
}

#[test]
fn test_layer_three_below_minimum_consumed_and_reset() {
    let pdu = vessel();
    let encoded = pdu.encode(ByteOrder::BigEndian).unwrap();

    let mut bytes = encoded[..LAYER_3_OFFSET].to_vec();
    bytes.extend_from_slice(&[3, 0, 0, 20]);
    bytes.extend_from_slice(&[0; 16]);
    bytes.extend_from_slice(&encoded[LAYER_5_OFFSET..]);
    set_length(&mut bytes);

    let decoded = IffPdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
    assert!(decoded.layer3.is_none());
    assert_eq!(decoded.layer2, pdu.layer2);
    assert_eq!(decoded.layer5, pdu.layer5);
}

#[test]
fn test_layer_cut_off_by_pdu_end() {
    let mut pdu = vessel();
    pdu.layer5 = None;
    let encoded = pdu.encode(ByteOrder::BigEndian).unwrap();

    let mut bytes = encoded[..encoded.len() - 10].to_vec();
    set_length(&mut bytes);

    let decoded = IffPdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
    assert_eq!(decoded.layer2, pdu.layer2);
    assert!(decoded.layer3.is_none());
    assert_eq!(decoded.information_layers().bits(), 0b0000_0110);
}

#[test]
fn test_unknown_record_in_layer_five_resets_layer_five() {
    let pdu = vessel();
    let mut bytes = pdu.encode(ByteOrder::BigEndian).unwrap().to_vec();

    // Retype the static voyage record to something unrecognised
    let record = LAYER_5_OFFSET + 12;
    bytes[record..record + 4].copy_from_slice(&3300u32.to_be_bytes());

    let decoded = IffPdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
    assert!(decoded.layer5.is_none());
    assert_eq!(decoded.layer2, pdu.layer2);
    assert_eq!(decoded.layer3, pdu.layer3);
}

#[test]
fn test_missing_middle_layer_does_not_consume_next() {
    let mut pdu = vessel();
    pdu.layer3 = None;
    let mut bytes = pdu.encode(ByteOrder::BigEndian).unwrap().to_vec();

    // Bitmask claims layer 3 but the bytes go straight to layer 5
    bytes[46] |= 1 << 3;

    let decoded = IffPdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
    assert!(decoded.layer3.is_none());
    assert_eq!(decoded.layer2, pdu.layer2);
    assert_eq!(decoded.layer5, pdu.layer5);
}

#[test]
fn test_little_endian_layers() {
    let pdu = vessel();
    let bytes = pdu.encode(ByteOrder::LittleEndian).unwrap();
    assert_eq!(&bytes[LAYER_2_OFFSET..LAYER_2_OFFSET + 4], &[2u8, 0, 52, 0]);
    assert_eq!(IffPdu::decode(&bytes, ByteOrder::LittleEndian).unwrap(), pdu);
}

#[test]
fn test_validity_covers_layer_records() {
    let mut pdu = vessel();
    assert!(pdu.is_valid());
    if let Some(layer) = pdu.layer3.as_mut() {
        layer.data_records.add(IffDataRecord::from(AisPositionReport {
            latitude: 123.0,
            ..AisPositionReport::default()
        }));
    }
    assert!(!pdu.is_valid());
}

#[test]
fn test_all_layers_with_many_ais_records_round_trip() {
    let mut pdu = vessel();
    for i in 0..741u32 {
        let report = IffDataRecord::from(AisPositionReport {
            mmsi: 366_000_000 + i,
            speed_over_ground: 12.0,
            latitude: -89.0 + f64::from(i) * 0.2,
            longitude: 179.0 - f64::from(i) * 0.4,
            ..AisPositionReport::default()
        });
        if let Some(layer) = pdu.layer3.as_mut() {
            layer.data_records.add(report.clone());
        }
        if let Some(layer) = pdu.layer5.as_mut() {
            layer.data_records.add(report);
        }
    }
    // Layer 3: 28 + 742 reports; layer 5: 12 + voyage 76 + 741 reports
    assert_eq!(pdu.length(), 60 + 52 + 32_676 + 32_692);
    assert!(pdu.is_valid());

    let bytes = pdu.encode(ByteOrder::BigEndian).unwrap();
    assert_eq!(bytes.len(), 65_480);
    assert_eq!(&bytes[LAYER_3_OFFSET + 2..LAYER_3_OFFSET + 4], &32_676u16.to_be_bytes());
    assert_eq!(&bytes[LAYER_3_OFFSET + 26..LAYER_3_OFFSET + 28], &742u16.to_be_bytes());
    let layer5 = LAYER_3_OFFSET + 32_676;
    assert_eq!(&bytes[layer5..layer5 + 4], &[5u8, 0, 0x7F, 0xB4]);

    let decoded = IffPdu::decode(&bytes, ByteOrder::BigEndian).unwrap();
    assert_eq!(decoded.information_layers().bits(), 0b0010_1110);
    assert_eq!(decoded, pdu);

    // Two more reports no longer fit the 16-bit PDU length
    for _ in 0..2 {
        if let Some(layer) = pdu.layer5.as_mut() {
            layer.data_records.add(IffDataRecord::from(AisPositionReport::default()));
        }
    }
    assert!(matches!(
        pdu.encode(ByteOrder::BigEndian),
        Err(DisError::OversizedPdu(65_568))
    ));
}
