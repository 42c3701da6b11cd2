//! Criterion benchmarks for full simulation steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use flurry_bench::{reference_profile, run_to_steady_state, stress_profile, PROFILE_DT};
use flurry_engine::Simulation;

fn bench_step_30k(c: &mut Criterion) {
    let mut sim = Simulation::new(reference_profile(42)).unwrap();
    run_to_steady_state(&mut sim, 3.0);

    c.bench_function("step_30k", |b| {
        b.iter(|| {
            let result = sim.step(PROFILE_DT).unwrap();
            black_box(&result);
        });
    });
}

fn bench_step_300k_parallel(c: &mut Criterion) {
    let mut sim = Simulation::new(stress_profile(42)).unwrap();
    run_to_steady_state(&mut sim, 3.0);

    c.bench_function("step_300k_parallel", |b| {
        b.iter(|| {
            let result = sim.step(PROFILE_DT).unwrap();
            black_box(&result);
        });
    });
}

fn bench_step_300k_serial(c: &mut Criterion) {
    let mut config = stress_profile(42);
    config.parallel = false;
    let mut sim = Simulation::new(config).unwrap();
    run_to_steady_state(&mut sim, 3.0);

    c.bench_function("step_300k_serial", |b| {
        b.iter(|| {
            let result = sim.step(PROFILE_DT).unwrap();
            black_box(&result);
        });
    });
}

fn bench_get_positions_30k(c: &mut Criterion) {
    let mut sim = Simulation::new(reference_profile(42)).unwrap();
    run_to_steady_state(&mut sim, 3.0);
    let mut out = vec![flurry_core::Vec3::ZERO; sim.particle_amount()];

    c.bench_function("get_positions_30k", |b| {
        b.iter(|| {
            let written = sim.get_positions(&mut out).unwrap();
            black_box(written);
        });
    });
}

criterion_group!(
    benches,
    bench_step_30k,
    bench_step_300k_parallel,
    bench_step_300k_serial,
    bench_get_positions_30k
);
criterion_main!(benches);
