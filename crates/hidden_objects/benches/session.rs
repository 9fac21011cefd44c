mod common;

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hidden_objects::scene::{compose_round, ObjectId};
use hidden_objects::session::{SessionController, VecSink};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn compose_round_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene/compose_round");

    for (key, theme) in common::themes() {
        group.throughput(common::elements_throughput(theme.decor_count));
        let mut rng = StdRng::seed_from_u64(0x5EED);
        group.bench_with_input(BenchmarkId::from_parameter(&key), &theme, |b, theme| {
            b.iter(|| {
                let scene = compose_round(theme, &mut rng).expect("built-in theme composes");
                black_box(scene.len());
            });
        });
    }

    group.finish();
}

/// A full round: ten-second frames, clicking one target per frame until won.
fn full_round_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("session/full_round");

    for (key, theme) in common::themes() {
        let mut rng = StdRng::seed_from_u64(0xF00D);
        let scene = compose_round(&theme, &mut rng).expect("built-in theme composes");

        group.bench_with_input(BenchmarkId::from_parameter(&key), &scene, |b, scene| {
            b.iter_batched(
                || SessionController::new(&theme, scene.clone()),
                |mut session| {
                    let mut sink = VecSink::new();
                    session.start(&mut sink);
                    let mut next = 0u32;
                    while !session.state().is_over() {
                        session.advance(Duration::from_secs(10), &mut sink);
                        session.on_target_clicked(ObjectId(next), &mut sink);
                        next += 1;
                    }
                    session.advance(Duration::from_secs(3), &mut sink);
                    black_box(sink.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = compose_round_benches, full_round_benches
}
criterion_main!(benches);
