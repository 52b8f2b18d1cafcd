/// Criterion benchmark suite.
///
/// Covers:
///   - Toffoli / Fredkin / MCX / MCZ throughput at several register sizes
///   - Direct-matrix vs controlled-phase vs decomposed QFT
///   - Grover search at the optimal iteration count
///   - Circuit text pipeline (lex → parse → execute)
use astragate::algorithms::GroverSearch;
use astragate::compiler;
use astragate::config::SimConfig;
use astragate::core::gates::{
    apply_fredkin, apply_multi_controlled_x, apply_multi_controlled_z, apply_toffoli,
};
use astragate::core::qft::{apply_qft_with, QftMode};
use astragate::core::StateVector;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ── Controlled gate throughput ────────────────────────────────────────────

fn bench_toffoli_fredkin(c: &mut Criterion) {
    let mut group = c.benchmark_group("three_qubit_gates");
    for n in [4usize, 8, 12, 16] {
        group.bench_with_input(BenchmarkId::new("Toffoli", n), &n, |b, &n| {
            let mut state = StateVector::new(n).unwrap();
            b.iter(|| apply_toffoli(&mut state, black_box(0), black_box(1), black_box(n - 1)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("Fredkin", n), &n, |b, &n| {
            let mut state = StateVector::new(n).unwrap();
            b.iter(|| apply_fredkin(&mut state, black_box(0), black_box(1), black_box(n - 1)).unwrap());
        });
    }
    group.finish();
}

fn bench_multi_controlled(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_controlled");
    for n in [4usize, 8, 12, 16] {
        let controls: Vec<usize> = (0..n - 1).collect();
        group.bench_with_input(BenchmarkId::new("MCX", n), &n, |b, &n| {
            let mut state = StateVector::new(n).unwrap();
            b.iter(|| apply_multi_controlled_x(&mut state, black_box(&controls), n - 1).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("MCZ", n), &n, |b, &n| {
            let mut state = StateVector::new(n).unwrap();
            b.iter(|| apply_multi_controlled_z(&mut state, black_box(&controls), n - 1).unwrap());
        });
    }
    group.finish();
}

// ── QFT constructions ─────────────────────────────────────────────────────

fn bench_qft(c: &mut Criterion) {
    let mut group = c.benchmark_group("qft");
    for n in [4usize, 6, 8, 10] {
        let qubits: Vec<usize> = (0..n).collect();
        for mode in [QftMode::Matrix, QftMode::Controlled, QftMode::Decomposed] {
            group.bench_with_input(BenchmarkId::new(mode.to_string(), n), &n, |b, &n| {
                let mut state = StateVector::basis(n, 1).unwrap();
                b.iter(|| apply_qft_with(&mut state, black_box(&qubits), false, mode).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_qft_subset(c: &mut Criterion) {
    // 4-qubit transform inside a 12-qubit register: spectator loop dominates
    c.bench_function("qft_4_of_12_matrix", |b| {
        let mut state = StateVector::new(12).unwrap();
        let qubits = [2usize, 5, 7, 11];
        b.iter(|| apply_qft_with(&mut state, black_box(&qubits[..]), false, QftMode::Matrix).unwrap());
    });
}

// ── Grover ────────────────────────────────────────────────────────────────

fn bench_grover(c: &mut Criterion) {
    let mut group = c.benchmark_group("grover_optimal");
    for n in [2usize, 4, 6, 8, 10] {
        group.bench_with_input(BenchmarkId::new("n", n), &n, |b, &n| {
            let target = (1 << n) - 1;
            b.iter(|| GroverSearch::new(n, black_box(target)).run().unwrap());
        });
    }
    group.finish();
}

// ── Circuit text pipeline ─────────────────────────────────────────────────

fn bench_pipeline(c: &mut Criterion) {
    let src = "\
n:5
@
type:single
gateType:H
qubit:0
@
type:toffoli
control1:0
control2:1
target:2
@
type:mcnot
controls:0,1,2
target:3
@
type:qft
qubits:0,1,2,3,4
inverse:false
@
type:measurenth
qubit:4
@
";
    let config = SimConfig::deterministic(1);
    c.bench_function("circuit_pipeline_5qubits", |b| {
        b.iter(|| compiler::run(black_box(src), &config).unwrap())
    });
}

// ── Groups ────────────────────────────────────────────────────────────────

criterion_group!(gate_benches, bench_toffoli_fredkin, bench_multi_controlled);
criterion_group!(transform_benches, bench_qft, bench_qft_subset);
criterion_group!(algorithm_benches, bench_grover, bench_pipeline);

criterion_main!(gate_benches, transform_benches, algorithm_benches);
