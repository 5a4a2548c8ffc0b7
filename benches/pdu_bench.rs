use bytes::BytesMut;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use dis_codec::pdu::directed_energy::{AreaAimpoint, TargetEnergyDeposition};
use dis_codec::pdu::{AggregateStatePdu, DirectedEnergyFirePdu};
use dis_codec::records::{AggregateId, EntityId, EventId};
use dis_codec::{ByteOrder, DisPdu, Pdu, PduCodec};
use tokio_util::codec::{Decoder, Encoder};

fn aggregate(entities: u16) -> AggregateStatePdu {
    let mut pdu = AggregateStatePdu::new(AggregateId::new(1, 1, 1));
    for i in 0..entities {
        pdu.add_entity_id(EntityId::new(1, 1, i));
    }
    pdu
}

fn fire(depositions: u16) -> DirectedEnergyFirePdu {
    let mut pdu = DirectedEnergyFirePdu::new(EntityId::new(1, 1, 1), EventId::new(1, 1, 1));
    let mut area = AreaAimpoint::new();
    for i in 0..depositions {
        area.target_energy_depositions
            .add(TargetEnergyDeposition::new(EntityId::new(1, 1, i), 1.0e6));
    }
    pdu.add_record(area);
    pdu
}

#[allow(clippy::unwrap_used)]
fn bench_aggregate_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_state");
    let entity_counts = [0u16, 16, 256, 4096];

    for &count in &entity_counts {
        let pdu = aggregate(count);
        let wire = pdu.encode(ByteOrder::BigEndian).unwrap();
        group.throughput(Throughput::Bytes(wire.len() as u64));

        group.bench_function(format!("encode_{count}_ids"), |b| {
            b.iter(|| pdu.encode(ByteOrder::BigEndian))
        });
        group.bench_function(format!("decode_{count}_ids"), |b| {
            b.iter(|| {
                let decoded = AggregateStatePdu::decode(&wire, ByteOrder::BigEndian);
                assert!(decoded.is_ok());
            })
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_directed_energy_fire(c: &mut Criterion) {
    let mut group = c.benchmark_group("directed_energy_fire");

    for &count in &[1u16, 64, 1024] {
        let pdu = fire(count);
        let wire = pdu.encode(ByteOrder::LittleEndian).unwrap();
        group.throughput(Throughput::Bytes(wire.len() as u64));

        group.bench_function(format!("decode_{count}_depositions"), |b| {
            b.iter(|| {
                let decoded = Pdu::decode(&wire, ByteOrder::LittleEndian);
                assert!(decoded.is_ok());
            })
        });
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_stream_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_framing");
    let mut codec = PduCodec::default();
    let mut stream = BytesMut::new();
    for i in 0..64u16 {
        let pdu = if i % 2 == 0 {
            Pdu::from(aggregate(i))
        } else {
            Pdu::from(fire(i))
        };
        codec.encode(pdu, &mut stream).unwrap();
    }
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("decode_64_mixed", |b| {
        b.iter_batched(
            || stream.clone(),
            |mut buf| {
                let mut frames = 0;
                while let Some(_pdu) = codec.decode(&mut buf).unwrap() {
                    frames += 1;
                }
                assert_eq!(frames, 64);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_aggregate_state,
    bench_directed_energy_fire,
    bench_stream_framing
);
criterion_main!(benches);
