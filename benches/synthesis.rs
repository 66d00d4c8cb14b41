//! Synthesis benchmarks.
//!
//! Measures building the constraints alone, the CNF translation, and a full
//! encode-solve-decode round on a two-bit table.
//!
//! Run with:
//! ```bash
//! cargo bench --bench synthesis
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use revsynth::encoder::{Encoder, SynthesisConfig};
use revsynth::oracle::VarisatOracle;
use revsynth::synth::synthesize;
use revsynth::table::TruthTable;

fn two_bit_table() -> TruthTable {
    TruthTable::from_csv("00,1,1\n01,1,0\n10,1,1\n11,0,1\n").unwrap()
}

// ============================================================================
// Benchmark: Encoding
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis/encode");
    let table = two_bit_table();

    for num_gates in [4, 6, 8, 10] {
        group.bench_with_input(BenchmarkId::new("constraints", num_gates), &num_gates, |b, &n| {
            b.iter(|| Encoder::new(&table, n).encode().unwrap().num_assertions());
        });
        group.bench_with_input(BenchmarkId::new("cnf", num_gates), &num_gates, |b, &n| {
            b.iter(|| Encoder::new(&table, n).encode().unwrap().to_cnf().len());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Encode + solve
// ============================================================================

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis/solve");
    group.sample_size(10);
    let table = two_bit_table();
    let config = SynthesisConfig::default();

    for num_gates in [4, 5, 6] {
        group.bench_with_input(BenchmarkId::new("varisat", num_gates), &num_gates, |b, &n| {
            b.iter(|| {
                let res = synthesize(&table, n, &config, VarisatOracle).unwrap();
                res.solution().map(|solution| solution.decode().unwrap().gate_counts().total())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_solve);

criterion_main!(benches);
