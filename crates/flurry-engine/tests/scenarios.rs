//! Integration test: end-to-end step scenarios.
//!
//! Each test drives a [`Simulation`] through a short, hand-checked
//! sequence of steps and asserts on particle counts, block counts and
//! attribute values.

use flurry_behavior::{EmitContext, Emitter};
use flurry_core::{Vec3, BIRTH_TIME};
use flurry_engine::{Simulation, SimulationConfig};
use flurry_test_utils::{
    BurstEmitter, ConstantForce, CountingForce, CustomAttributeEmitter, ZeroForce,
};

fn simulation(emitters: Vec<Box<dyn Emitter>>, block_capacity: usize) -> Simulation {
    Simulation::new(SimulationConfig {
        forces: vec![Box::new(ZeroForce)],
        emitters,
        block_capacity,
        ..Default::default()
    })
    .unwrap()
}

// ── Scenario A: steady emission ──────────────────────────────────────

#[test]
fn five_per_step_accumulates_before_lifetime() {
    let mut sim = simulation(vec![Box::new(BurstEmitter::new(5))], 1000);

    sim.step(0.5).unwrap();
    assert_eq!(sim.particle_amount(), 5);
    assert_eq!(sim.block_amount(), 1);

    for _ in 0..3 {
        sim.step(0.5).unwrap();
    }
    assert_eq!(sim.time(), 2.0);
    assert_eq!(sim.particle_amount(), 20);
    assert_eq!(sim.block_amount(), 1);
}

#[test]
fn steady_emission_plateaus_at_lifetime() {
    let mut sim = simulation(vec![Box::new(BurstEmitter::new(5))], 16);
    for _ in 0..20 {
        sim.step(0.5).unwrap();
    }
    // Particles born at t survive while now - 3 <= t: seven emissions.
    assert_eq!(sim.particle_amount(), 35);
    assert_eq!(sim.block_amount(), 3);
}

// ── Scenario B: death ────────────────────────────────────────────────

#[test]
fn particles_born_at_zero_die_after_lifetime() {
    let emitter = BurstEmitter::new(3).born_at(0.0).once();
    let mut sim = simulation(vec![Box::new(emitter)], 1000);

    sim.step(1.0).unwrap();
    assert_eq!(sim.particle_amount(), 3);
    assert!(sim
        .particles()
        .active_blocks()
        .iter()
        .all(|b| b.birth_times().iter().all(|&t| t == 0.0)));

    sim.step(1.0).unwrap();
    sim.step(1.0).unwrap();
    // At exactly t = 3.0 the cull condition is not yet met.
    assert_eq!(sim.time(), 3.0);
    assert_eq!(sim.particle_amount(), 3);

    let result = sim.step(0.5).unwrap();
    assert_eq!(result.metrics.particles_culled, 3);
    assert_eq!(result.metrics.blocks_released, 1);
    assert_eq!(sim.particle_amount(), 0);
    assert_eq!(sim.block_amount(), 0);
}

#[test]
fn custom_lifetime_is_honored() {
    let mut sim = Simulation::new(SimulationConfig {
        emitters: vec![Box::new(BurstEmitter::new(2).once())],
        particle_lifetime: 0.25,
        ..Default::default()
    })
    .unwrap();

    sim.step(0.1).unwrap();
    sim.step(0.1).unwrap();
    assert_eq!(sim.particle_amount(), 2);
    sim.step(0.1).unwrap();
    sim.step(0.1).unwrap();
    assert_eq!(sim.particle_amount(), 0);
}

// ── Scenario C: force integration ────────────────────────────────────

#[test]
fn constant_force_changes_velocity_not_position_in_first_step() {
    let g = 9.81;
    let dt = 0.1;
    let mut sim = Simulation::new(SimulationConfig {
        forces: vec![Box::new(ConstantForce::new("down", Vec3::new(0.0, -g, 0.0)))],
        emitters: vec![Box::new(BurstEmitter::new(1).once())],
        ..Default::default()
    })
    .unwrap();

    // Emission runs after integration, so the particle is untouched by
    // the step that creates it.
    sim.step(dt).unwrap();
    let block = &sim.particles().active_blocks()[0];
    assert_eq!(block.positions()[0], Vec3::ZERO);
    assert_eq!(block.velocities()[0], Vec3::ZERO);

    sim.step(dt).unwrap();
    let block = &sim.particles().active_blocks()[0];
    assert_eq!(block.velocities()[0].y, -g * dt);
    assert_eq!(block.positions()[0].y, 0.0);

    sim.step(dt).unwrap();
    let block = &sim.particles().active_blocks()[0];
    assert_eq!(block.positions()[0].y, -g * dt * dt);
}

#[test]
fn initial_velocity_moves_particles() {
    let emitter = BurstEmitter::new(4)
        .at(Vec3::new(1.0, 1.0, 1.0))
        .with_velocity(Vec3::new(2.0, 0.0, 0.0))
        .once();
    let mut sim = simulation(vec![Box::new(emitter)], 1000);
    sim.step(0.5).unwrap();
    sim.step(0.5).unwrap();
    for p in sim.positions() {
        assert_eq!(p, Vec3::new(2.0, 1.0, 1.0));
    }
}

#[test]
fn forces_see_every_live_particle_once_per_step() {
    let counting = CountingForce::new();
    let counters = counting.counters();
    let mut sim = Simulation::new(SimulationConfig {
        forces: vec![Box::new(counting)],
        emitters: vec![Box::new(BurstEmitter::new(10))],
        block_capacity: 4,
        ..Default::default()
    })
    .unwrap();

    sim.step(0.1).unwrap();
    // Nothing was alive during the first integration pass.
    assert_eq!(counters.calls(), 0);

    sim.step(0.1).unwrap();
    assert_eq!(counters.calls(), 3);
    assert_eq!(counters.particles(), 10);

    sim.step(0.1).unwrap();
    assert_eq!(counters.calls(), 3 + 5);
    assert_eq!(counters.particles(), 10 + 20);
}

// ── Scenario D: compaction after emission ────────────────────────────

/// Fills two destinations to 60% each in a single emission.
struct TwoPartialDestinations;

impl Emitter for TwoPartialDestinations {
    fn name(&self) -> &str {
        "two_partial"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) {
        for _ in 0..2 {
            let mut dest = ctx.request_destination();
            let n = dest.capacity() * 6 / 10;
            dest.set_emitted_amount(n);
        }
    }
}

#[test]
fn two_sixty_percent_blocks_compact_to_one_full() {
    let mut sim = Simulation::new(SimulationConfig {
        emitters: vec![Box::new(TwoPartialDestinations)],
        block_capacity: 10,
        particle_lifetime: 100.0,
        ..Default::default()
    })
    .unwrap();

    let result = sim.step(0.1).unwrap();
    assert_eq!(result.metrics.blocks_allocated, 2);
    assert_eq!(result.metrics.particles_emitted, 12);
    let counts: Vec<usize> = sim
        .particles()
        .active_blocks()
        .iter()
        .map(|b| b.active_count())
        .collect();
    assert_eq!(counts, vec![10, 2]);
    assert_eq!(sim.particle_amount(), 12);
}

// ── Attributes ───────────────────────────────────────────────────────

#[test]
fn undeclared_attributes_receive_defaults() {
    let custom = CustomAttributeEmitter::new(2)
        .scalar("Size", 2.0)
        .vector("Color", Vec3::X);
    let mut sim = simulation(vec![Box::new(custom), Box::new(BurstEmitter::new(3))], 1000);
    assert!(sim.schema().contains_scalar("Size"));
    assert!(sim.schema().contains_vector("Color"));

    sim.step(0.75).unwrap();
    assert_eq!(sim.particle_amount(), 5);
    assert_eq!(sim.block_amount(), 1);

    let block = &sim.particles().active_blocks()[0];
    let mut sizes: Vec<f32> = block.scalars("Size")[..5].to_vec();
    sizes.sort_by(f32::total_cmp);
    // Burst particles get the current time for the undeclared scalar.
    assert_eq!(sizes, vec![0.75, 0.75, 0.75, 2.0, 2.0]);
    let colors = &block.vectors("Color")[..5];
    assert_eq!(colors.iter().filter(|&&c| c == Vec3::X).count(), 2);
    assert_eq!(colors.iter().filter(|&&c| c == Vec3::ZERO).count(), 3);
    assert!(block.scalars(BIRTH_TIME)[..5].iter().all(|&t| t == 0.75));
}

#[test]
fn steps_are_logged_under_a_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();

    let mut sim = simulation(vec![Box::new(BurstEmitter::new(3))], 2);
    for _ in 0..3 {
        sim.step(0.1).unwrap();
    }
    assert_eq!(sim.particle_amount(), 9);
    assert_eq!(sim.block_amount(), 5);
}
