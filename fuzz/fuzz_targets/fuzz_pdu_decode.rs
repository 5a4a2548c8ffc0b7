#![no_main]

use dis_codec::{ByteOrder, Pdu, MAX_PDU_LENGTH};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode must never panic, whatever the input
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        if let Ok(pdu) = Pdu::decode(data, order) {
            // Whatever decoded must re-encode to exactly its computed length,
            // or be refused because that length no longer fits the header
            let length = pdu.length();
            match pdu.encode(order) {
                Ok(wire) => assert_eq!(wire.len(), length),
                Err(_) => assert!(length > MAX_PDU_LENGTH),
            }
        }
    }
});
