//! Integration tests for alternative serialization formats
//!
//! Decoded PDUs are exported to Bincode, JSON and MessagePack for recorders
//! and debugging tools. These formats sit beside the DIS wire format and
//! must carry every field the wire decode produced.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::uninlined_format_args
)]

use dis_codec::core::serialization::{MultiFormat, SerializationFormat};
use dis_codec::pdu::directed_energy::{AreaAimpoint, PrecisionAimpoint, TargetEnergyDeposition};
use dis_codec::pdu::iff::{AisPositionReport, IffDataRecord, Mode5Layer};
use dis_codec::pdu::{AggregateStatePdu, DirectedEnergyFirePdu, IffPdu};
use dis_codec::records::{AggregateId, AggregateMarking, EntityId, EventId, VariableDatum};
use dis_codec::{ByteOrder, DisPdu, Pdu};

const ALL_FORMATS: [SerializationFormat; 3] = [
    SerializationFormat::Bincode,
    SerializationFormat::Json,
    SerializationFormat::MessagePack,
];

fn sample_pdus() -> Vec<Pdu> {
    let mut aggregate = AggregateStatePdu::new(AggregateId::new(4, 4, 40));
    aggregate.marking = AggregateMarking::from_ascii("ALPHA");
    aggregate.add_entity_id(EntityId::new(4, 4, 41));
    aggregate
        .variable_data
        .add(VariableDatum::new(60_000, b"notes".to_vec()));

    let mut fire = DirectedEnergyFirePdu::new(EntityId::new(4, 4, 50), EventId::new(4, 4, 1));
    fire.wavelength = 1.5;
    fire.add_record(PrecisionAimpoint {
        target_entity_id: EntityId::new(4, 4, 41),
        peak_irradiance: 250.0,
        ..PrecisionAimpoint::default()
    });
    let mut area = AreaAimpoint::new();
    area.target_energy_depositions
        .add(TargetEnergyDeposition::new(EntityId::new(4, 4, 41), 12.25));
    fire.add_record(area);

    let mut iff = IffPdu::default();
    let mut mode5 = Mode5Layer::default();
    mode5.data_records.add(IffDataRecord::from(AisPositionReport {
        mmsi: 211_000_111,
        latitude: 54.5,
        longitude: 10.25,
        ..AisPositionReport::default()
    }));
    iff.layer3 = Some(mode5);

    vec![Pdu::from(aggregate), Pdu::from(fire), Pdu::from(iff)]
}

#[test]
fn test_every_format_round_trips_every_pdu() {
    for pdu in sample_pdus() {
        for format in ALL_FORMATS {
            let bytes = pdu
                .serialize_format(format)
                .unwrap_or_else(|e| panic!("{} serialize failed: {}", format.name(), e));
            let recovered = Pdu::deserialize_format(&bytes, format)
                .unwrap_or_else(|e| panic!("{} deserialize failed: {}", format.name(), e));
            assert_eq!(recovered, pdu, "format {}", format.name());
        }
    }
}

#[test]
fn test_header_byte_identifies_format() {
    let pdu = sample_pdus().remove(1);
    for format in ALL_FORMATS {
        let bytes = pdu.serialize_with_header(format).expect("serialize");
        assert_eq!(bytes[0], format.format_byte());

        let (recovered, detected) = Pdu::deserialize_with_header(&bytes).expect("deserialize");
        assert_eq!(detected, format);
        assert_eq!(recovered, pdu);
    }
}

#[test]
fn test_json_is_human_readable() {
    let pdu = sample_pdus().remove(2);
    let bytes = pdu
        .serialize_format(SerializationFormat::Json)
        .expect("serialize");
    let text = String::from_utf8(bytes).expect("utf-8");

    assert!(text.contains("Iff"));
    assert!(text.contains("211000111"));
}

#[test]
fn test_exported_pdu_still_encodes_on_the_wire() {
    let pdu = sample_pdus().remove(0);
    let bytes = pdu
        .serialize_format(SerializationFormat::MessagePack)
        .expect("serialize");
    let recovered = Pdu::deserialize_format(&bytes, SerializationFormat::MessagePack)
        .expect("deserialize");

    let wire = recovered.encode(ByteOrder::BigEndian).unwrap();
    match Pdu::decode(&wire, ByteOrder::BigEndian).expect("decode") {
        Pdu::AggregateState(decoded) => {
            assert_eq!(decoded.marking.text(), "ALPHA");
            assert_eq!(decoded.length(), wire.len());
        }
        other => panic!("Expected Aggregate State, got {other:?}"),
    }
}

#[test]
fn test_export_of_fresh_pdu_matches_export_of_its_wire_decode() {
    for pdu in sample_pdus() {
        let wire = pdu.encode(ByteOrder::BigEndian).unwrap();
        let decoded = Pdu::decode(&wire, ByteOrder::BigEndian).unwrap();
        assert_eq!(decoded, pdu);

        let json = pdu.serialize_format(SerializationFormat::Json).unwrap();
        assert_eq!(
            json,
            decoded.serialize_format(SerializationFormat::Json).unwrap()
        );
        // The length is derived on encode and never exported
        let text = String::from_utf8(json).unwrap();
        assert!(!text.contains("\"length\""), "{text}");
    }
}

#[test]
fn test_format_byte_detection() {
    for format in ALL_FORMATS {
        assert_eq!(
            SerializationFormat::from_byte(format.format_byte()),
            Some(format)
        );
    }
    assert_eq!(SerializationFormat::from_byte(0x00), None);
    assert_eq!(SerializationFormat::from_byte(0xFF), None);
    assert_eq!(SerializationFormat::default(), SerializationFormat::Bincode);
}

#[test]
fn test_empty_and_unknown_headers_rejected() {
    assert!(Pdu::deserialize_with_header(&[]).is_err());
    assert!(Pdu::deserialize_with_header(&[0x7F, 1, 2, 3]).is_err());
}

#[test]
fn test_corrupted_payload_rejected() {
    let pdu = sample_pdus().remove(1);
    let mut bytes = pdu
        .serialize_format(SerializationFormat::Json)
        .expect("serialize");
    bytes.truncate(bytes.len() / 2);
    assert!(Pdu::deserialize_format(&bytes, SerializationFormat::Json).is_err());
}
