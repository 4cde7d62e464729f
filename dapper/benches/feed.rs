// benches/feed.rs

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dapper::{Node, Progress, Record, Session, Value, emit, feed};

fn telemetry_frame() -> (Arc<Node>, Value) {
    let node = Node::struct_of([
        ("source", Node::uint24()),
        ("kind", Node::uint8()),
        (
            "readings",
            Node::sequence_of((0..8).map(|_| Node::int16()).collect::<Vec<_>>()),
        ),
        ("checksum_seed", Node::uint32()),
    ]);
    let value = Value::Record(
        Record::new()
            .with("source", 0x00AB_CD)
            .with("kind", 3)
            .with(
                "readings",
                (0i64..8).map(|i| Value::Int(i * 100 - 400)).collect::<Vec<_>>(),
            )
            .with("checksum_seed", 0xDEAD_BEEF_i64),
    );
    (node, value)
}

fn bench_feed_chunked(c: &mut Criterion) {
    let (node, value) = telemetry_frame();
    let bytes = emit(&node, &value).unwrap();

    let mut group = c.benchmark_group("feed_chunked");
    for chunk_size in [1usize, 4, bytes.len()] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut session = Session::new();
                    let mut decoded = None;
                    for chunk in bytes.chunks(chunk_size) {
                        if let Progress::Complete(v) =
                            feed(&node, black_box(chunk), &mut session).unwrap()
                        {
                            decoded = Some(v);
                        }
                    }
                    decoded
                });
            },
        );
    }
    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let (node, value) = telemetry_frame();

    c.bench_function("emit", |b| {
        b.iter(|| emit(black_box(&node), black_box(&value)).unwrap());
    });
}

criterion_group!(benches, bench_feed_chunked, bench_emit);
criterion_main!(benches);
