//! Per-block work shared by the serial and parallel step paths.

use flurry_behavior::{EmitterPlan, Force};
use flurry_core::Vec3;
use flurry_storage::ParticleBlock;

/// Advance one block by `dt` with explicit Euler.
///
/// Positions move with the velocities from the start of the step, then
/// every force adds into `accumulator` and velocities take the summed
/// force times `dt`.
pub(crate) fn integrate_block(
    block: &mut ParticleBlock,
    forces: &[Box<dyn Force>],
    dt: f32,
    accumulator: &mut Vec<Vec3>,
) {
    let n = block.active_count();
    if n == 0 {
        return;
    }

    let (positions, velocities) = block.positions_velocities_mut();
    for (p, v) in positions.iter_mut().zip(velocities.iter()) {
        *p += *v * dt;
    }

    accumulator.clear();
    accumulator.resize(n, Vec3::ZERO);
    let slice = block.slice_active();
    for force in forces {
        force.add_force(&slice, accumulator);
    }

    for (v, f) in block.velocities_mut().iter_mut().zip(accumulator.iter()) {
        *v += *f * dt;
    }
}

/// Swap-remove every particle older than `lifetime` at `time`.
///
/// Returns the number removed. The slot a particle was removed from is
/// re-examined, since it now holds the former last particle.
pub(crate) fn cull_block(block: &mut ParticleBlock, time: f32, lifetime: f32) -> usize {
    let threshold = time - lifetime;
    let mut culled = 0;
    let mut i = 0;
    while i < block.active_count() {
        if threshold > block.birth_times()[i] {
            block.swap_remove(i);
            culled += 1;
        } else {
            i += 1;
        }
    }
    culled
}

/// Fill the attributes an emitter left to defaults and make its particles live.
pub(crate) fn finalize_destination(
    block: &mut ParticleBlock,
    plan: &EmitterPlan,
    emitted: usize,
    time: f32,
) {
    for &index in &plan.default_scalars {
        block.scalar_buffer_at(index)[..emitted].fill(time);
    }
    for &index in &plan.default_vectors {
        block.vector_buffer_at(index)[..emitted].fill(Vec3::ZERO);
    }
    block.grow_active(emitted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use flurry_core::{AttributeSchema, BlockId, BIRTH_TIME, POSITION, VELOCITY};
    use flurry_storage::BlockSlice;
    use std::sync::Arc;

    struct Push(Vec3);

    impl Force for Push {
        fn name(&self) -> &str {
            "push"
        }

        fn add_force(&self, slice: &BlockSlice<'_>, accumulator: &mut [Vec3]) {
            assert_eq!(slice.len(), accumulator.len());
            for f in accumulator.iter_mut() {
                *f += self.0;
            }
        }
    }

    fn block(capacity: usize) -> ParticleBlock {
        ParticleBlock::new(BlockId(0), Arc::new(AttributeSchema::builtin()), capacity)
    }

    #[test]
    fn position_uses_velocity_from_step_start() {
        let mut b = block(4);
        b.vector_buffer(VELOCITY)[0] = Vec3::new(1.0, 0.0, 0.0);
        b.set_active_count(1);
        let forces: Vec<Box<dyn Force>> = vec![Box::new(Push(Vec3::new(0.0, 10.0, 0.0)))];
        let mut acc = Vec::new();

        integrate_block(&mut b, &forces, 0.5, &mut acc);

        assert_eq!(b.positions()[0], Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(b.velocities()[0], Vec3::new(1.0, 5.0, 0.0));
    }

    #[test]
    fn forces_sum_and_free_slots_untouched() {
        let mut b = block(4);
        b.set_active_count(2);
        let forces: Vec<Box<dyn Force>> = vec![Box::new(Push(Vec3::X)), Box::new(Push(Vec3::X))];
        let mut acc = vec![Vec3::splat(99.0); 7];

        integrate_block(&mut b, &forces, 1.0, &mut acc);

        assert_eq!(acc.len(), 2);
        assert_eq!(b.velocities(), &[Vec3::new(2.0, 0.0, 0.0); 2]);
        assert_eq!(b.vectors(VELOCITY)[2], Vec3::ZERO);
    }

    #[test]
    fn empty_block_skips_forces() {
        let mut b = block(2);
        let forces: Vec<Box<dyn Force>> = vec![Box::new(Push(Vec3::X))];
        let mut acc = Vec::new();
        integrate_block(&mut b, &forces, 1.0, &mut acc);
        assert!(acc.is_empty());
    }

    #[test]
    fn cull_reexamines_swapped_slot() {
        let mut b = block(5);
        // Slots 0 and 4 are dead; slot 4 is swapped into 0 and must be caught.
        b.scalar_buffer(BIRTH_TIME)[..5].copy_from_slice(&[0.0, 5.0, 5.0, 5.0, 0.0]);
        b.set_active_count(5);

        let culled = cull_block(&mut b, 4.0, 3.0);

        assert_eq!(culled, 2);
        assert_eq!(b.active_count(), 3);
        assert!(b.birth_times().iter().all(|&t| t == 5.0));
    }

    #[test]
    fn cull_boundary_is_strict() {
        let mut b = block(2);
        b.scalar_buffer(BIRTH_TIME)[..2].copy_from_slice(&[1.0, 0.5]);
        b.set_active_count(2);
        // time - lifetime == 1.0: the particle born at 1.0 survives.
        assert_eq!(cull_block(&mut b, 4.0, 3.0), 1);
        assert_eq!(b.birth_times(), &[1.0]);
    }

    #[test]
    fn finalize_fills_only_planned_attributes() {
        let mut b = block(4);
        b.vector_buffer(POSITION)[..2].fill(Vec3::ONE);
        b.vector_buffer(VELOCITY)[..2].fill(Vec3::ONE);
        let plan = EmitterPlan {
            default_scalars: vec![AttributeSchema::BIRTH_TIME_INDEX],
            default_vectors: vec![AttributeSchema::VELOCITY_INDEX],
        };

        finalize_destination(&mut b, &plan, 2, 7.5);

        assert_eq!(b.active_count(), 2);
        assert_eq!(b.birth_times(), &[7.5, 7.5]);
        assert_eq!(b.positions(), &[Vec3::ONE, Vec3::ONE]);
        assert_eq!(b.velocities(), &[Vec3::ZERO, Vec3::ZERO]);
        assert_eq!(b.scalars(BIRTH_TIME)[2], 0.0);
    }
}
