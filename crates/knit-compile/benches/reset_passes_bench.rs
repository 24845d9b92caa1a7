//! Benchmarks for the reset cleanup passes
//!
//! Run with: cargo bench -p knit-compile

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use knit_compile::{ConsolidateResets, Pass, PassManagerBuilder, PropertySet, RemoveFinalReset};
use knit_ir::{Circuit, QubitId};

/// Layered circuit where every qubit gets a run of resets between gate layers
/// and ends in a reset, the shape a wire cut leaves behind.
fn reset_heavy_circuit(num_qubits: u32, layers: u32) -> Circuit {
    let mut circuit = Circuit::with_size("bench", num_qubits, 0);
    for _ in 0..layers {
        for q in 0..num_qubits {
            circuit.h(QubitId(q)).unwrap();
            circuit.reset(QubitId(q)).unwrap();
            circuit.reset(QubitId(q)).unwrap();
            circuit.reset(QubitId(q)).unwrap();
        }
        for q in 0..num_qubits.saturating_sub(1) {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
    }
    for q in 0..num_qubits {
        circuit.reset(QubitId(q)).unwrap();
    }
    circuit
}

fn bench_consolidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("consolidate_resets");

    for num_qubits in &[5u32, 20, 50] {
        let circuit = reset_heavy_circuit(*num_qubits, 10);
        group.bench_with_input(
            BenchmarkId::new("qubits", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    let mut dag = circuit.dag().clone();
                    let mut props = PropertySet::new();
                    ConsolidateResets
                        .run(black_box(&mut dag), &mut props)
                        .unwrap();
                    dag
                });
            },
        );
    }

    group.finish();
}

fn bench_final_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_final_reset");

    for num_qubits in &[5u32, 20, 50] {
        let circuit = reset_heavy_circuit(*num_qubits, 10);
        group.bench_with_input(
            BenchmarkId::new("qubits", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    let mut dag = circuit.dag().clone();
                    let mut props = PropertySet::new();
                    RemoveFinalReset
                        .run(black_box(&mut dag), &mut props)
                        .unwrap();
                    dag
                });
            },
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let circuit = reset_heavy_circuit(20, 20);
    let (pm, _) = PassManagerBuilder::new().build();

    c.bench_function("reset_cleanup_pipeline", |b| {
        b.iter(|| {
            let mut dag = circuit.dag().clone();
            let mut props = PropertySet::new();
            pm.run(black_box(&mut dag), &mut props).unwrap();
            dag
        });
    });
}

criterion_group!(benches, bench_consolidate, bench_final_reset, bench_pipeline);
criterion_main!(benches);
