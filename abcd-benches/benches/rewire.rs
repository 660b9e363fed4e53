//! Whole-graph rewiring benchmarks on hub-dominated multigraphs.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use abcd_benches::{params::RewireBenchParams, sequences::hub_multigraph};
use abcd_core::{DEFAULT_MAX_REWIRE_PASSES, rewire_until_simple};

const SEED: u64 = 7;

const CASES: &[RewireBenchParams] = &[
    RewireBenchParams {
        vcount: 500,
        hub_degree: 100,
    },
    RewireBenchParams {
        vcount: 2_000,
        hub_degree: 400,
    },
];

fn rewire(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewire_until_simple");
    group.sample_size(20);

    for &params in CASES {
        let multigraph = hub_multigraph(params, SEED);
        group.bench_with_input(
            BenchmarkId::from_parameter(params),
            &multigraph,
            |b, input| {
                b.iter_batched(
                    || (input.clone(), SmallRng::seed_from_u64(SEED)),
                    |(mut edges, mut rng)| {
                        rewire_until_simple(&mut edges, &mut rng, DEFAULT_MAX_REWIRE_PASSES)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, rewire);
criterion_main!(benches);
