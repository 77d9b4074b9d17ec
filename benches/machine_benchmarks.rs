//! Cipher throughput benchmarks.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigmatic::prelude::*;

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    let config = KeyRng::new(42).daily_key();

    for len in [64usize, 1024, 16_384] {
        let message = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG"
            .chars()
            .cycle()
            .take(len)
            .collect::<String>();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("letters", len), &message, |b, message| {
            b.iter(|| {
                let mut machine = EnigmaMachine::new(config.clone()).unwrap();
                black_box(machine.process(black_box(message)))
            });
        });
    }

    group.finish();
}

fn bench_step_rotors(c: &mut Criterion) {
    let mut machine = EnigmaMachine::new(MachineConfig::default()).unwrap();
    c.bench_function("step_rotors", |b| {
        b.iter(|| {
            machine.step_rotors();
            black_box(machine.positions())
        });
    });
}

criterion_group!(benches, bench_process, bench_step_rotors);
criterion_main!(benches);
