//! Benchmark profiles for the Flurry particle framework.
//!
//! Provides pre-built [`SimulationConfig`] profiles:
//!
//! - [`reference_profile`]: 10K particles/s, roughly 30K live at steady state
//! - [`stress_profile`]: 100K particles/s on the rayon pool, roughly 300K live
//! - [`run_to_steady_state`]: step until emission and culling balance

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use flurry_core::Vec3;
use flurry_engine::{Simulation, SimulationConfig};
use flurry_library::{Gravity, LinearDrag, PointEmitter};

/// Step length used by every profile: 60 steps per second.
pub const PROFILE_DT: f32 = 1.0 / 60.0;

fn profile(seed: u64, rate: f32, parallel: bool) -> SimulationConfig {
    let emitter = PointEmitter::builder()
        .origin(Vec3::ZERO)
        .rate(rate)
        .speed(5.0)
        .seed(seed)
        .build()
        .expect("profile emitter parameters are valid");
    let drag = LinearDrag::new(0.1).expect("profile drag coefficient is valid");

    SimulationConfig {
        forces: vec![Box::new(Gravity::earth()), Box::new(drag)],
        emitters: vec![Box::new(emitter)],
        block_capacity: 1000,
        particle_lifetime: 3.0,
        parallel,
    }
}

/// Build a reference benchmark profile: 10K particles per second.
///
/// Forces: Earth gravity and linear drag (k=0.1). Serial block passes.
pub fn reference_profile(seed: u64) -> SimulationConfig {
    profile(seed, 10_000.0, false)
}

/// Build a stress benchmark profile: 100K particles per second.
///
/// Same forces as [`reference_profile`] at 10x the emission rate, with
/// per-block passes on the rayon pool.
pub fn stress_profile(seed: u64) -> SimulationConfig {
    profile(seed, 100_000.0, true)
}

/// Step `sim` at [`PROFILE_DT`] for one particle lifetime plus one step,
/// after which every step culls about as many particles as it emits.
///
/// Returns the number of steps taken.
pub fn run_to_steady_state(sim: &mut Simulation, particle_lifetime: f32) -> usize {
    let steps = (particle_lifetime / PROFILE_DT).ceil() as usize + 1;
    for _ in 0..steps {
        sim.step(PROFILE_DT).expect("profile step length is valid");
    }
    steps
}
