//! Integration test: particle conservation and block invariants.
//!
//! For arbitrary step sequences, every step must satisfy
//! `after = before - culled + emitted`, and the container must come out
//! of every step packed: no empty block and at most one partial block.

use flurry_behavior::Emitter;
use flurry_core::Vec3;
use flurry_engine::{Simulation, SimulationConfig};
use flurry_library::{Gravity, PointEmitter};
use flurry_test_utils::BurstEmitter;
use proptest::prelude::*;

fn assert_packed(sim: &Simulation) {
    let blocks = sim.particles().active_blocks();
    let capacity = sim.particles().block_capacity();
    let mut partial = 0;
    for block in blocks {
        assert!(!block.is_empty(), "block {} left empty", block.id());
        assert!(block.active_count() <= capacity);
        if !block.is_full() {
            partial += 1;
        }
    }
    assert!(partial <= 1, "{partial} partial blocks");
    assert_eq!(sim.block_amount(), sim.particle_amount().div_ceil(capacity));
}

fn mixed_simulation(capacity: usize, lifetime: f32, burst: usize, rate: f32) -> Simulation {
    let point = PointEmitter::builder()
        .origin(Vec3::new(0.0, 5.0, 0.0))
        .rate(rate)
        .seed(9)
        .build()
        .unwrap();
    let emitters: Vec<Box<dyn Emitter>> = vec![Box::new(BurstEmitter::new(burst)), Box::new(point)];
    Simulation::new(SimulationConfig {
        forces: vec![Box::new(Gravity::earth())],
        emitters,
        block_capacity: capacity,
        particle_lifetime: lifetime,
        parallel: false,
    })
    .unwrap()
}

#[test]
fn conservation_over_a_long_run() {
    let mut sim = mixed_simulation(64, 1.0, 7, 300.0);
    for step in 0..600 {
        let before = sim.particle_amount();
        let dt = if step % 3 == 0 { 0.05 } else { 1.0 / 60.0 };
        let m = sim.step(dt).unwrap().metrics;
        assert_eq!(
            sim.particle_amount(),
            before - m.particles_culled + m.particles_emitted,
            "step {step}"
        );
        assert_eq!(m.particle_amount, sim.particle_amount());
        assert_eq!(m.block_amount, sim.block_amount());
        assert_packed(&sim);
    }
}

#[test]
fn empty_simulation_stays_empty() {
    let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    for _ in 0..10 {
        let m = sim.step(0.1).unwrap().metrics;
        assert_eq!(m.particles_emitted, 0);
        assert_eq!(m.blocks_allocated, 0);
    }
    assert_eq!(sim.particle_amount(), 0);
    assert_eq!(sim.block_amount(), 0);
    assert_eq!(sim.positions(), Vec::<Vec3>::new());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_step_conserves_and_packs(
        capacity in 1usize..48,
        lifetime in 0.1f32..2.0,
        burst in 0usize..40,
        rate in 0.0f32..400.0,
        dts in proptest::collection::vec(0.0f32..0.4, 1..40),
    ) {
        let mut sim = mixed_simulation(capacity, lifetime, burst, rate);
        for dt in dts {
            let before = sim.particle_amount();
            let m = sim.step(dt).unwrap().metrics;
            prop_assert_eq!(
                sim.particle_amount(),
                before - m.particles_culled + m.particles_emitted
            );
            assert_packed(&sim);
            prop_assert_eq!(
                sim.particles().memory_bytes(),
                sim.block_amount() * capacity * sim.schema().bytes_per_particle()
            );
        }
    }

    #[test]
    fn no_particle_outlives_its_lifetime(
        lifetime in 0.1f32..1.5,
        dts in proptest::collection::vec(0.01f32..0.3, 1..60),
    ) {
        let mut sim = mixed_simulation(16, lifetime, 3, 50.0);
        for dt in dts {
            sim.step(dt).unwrap();
            let oldest_allowed = sim.time() - lifetime;
            for block in sim.particles().active_blocks() {
                for &born in block.birth_times() {
                    prop_assert!(born >= oldest_allowed);
                }
            }
        }
    }
}
