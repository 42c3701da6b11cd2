//! Test fixtures for Flurry development.
//!
//! Deterministic forces and emitters for engine tests and benches, plus
//! [`container_with_counts`] for building pre-filled containers without
//! running a simulation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;

use flurry_core::{AttributeSchema, Vec3, BIRTH_TIME, POSITION};
use flurry_storage::{ContainerConfig, ParticleContainer};

/// A container with one block per entry of `counts`, each holding that
/// many live particles.
///
/// Particle `k` (counting across blocks) gets position `(k, 0, 0)` and
/// birth time `birth_time`, so tests can track particles through moves.
///
/// # Panics
///
/// Panics if `capacity` is zero or any count exceeds it.
pub fn container_with_counts(
    capacity: usize,
    counts: &[usize],
    birth_time: f32,
) -> ParticleContainer {
    let mut container =
        ParticleContainer::new(AttributeSchema::builtin(), ContainerConfig::new(capacity))
            .expect("test container capacity must be non-zero");
    let mut k = 0.0;
    for &n in counts {
        let block = container.allocate_block();
        for slot in 0..n {
            block.vector_buffer(POSITION)[slot] = Vec3::new(k, 0.0, 0.0);
            block.scalar_buffer(BIRTH_TIME)[slot] = birth_time;
            k += 1.0;
        }
        block.set_active_count(n);
    }
    container
}
