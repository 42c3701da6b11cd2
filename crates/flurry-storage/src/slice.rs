//! Read-only views over the live particles of a block.

use flurry_core::{AttributeNotFound, AttributeSchema, BlockId, Vec3};

use crate::block::ParticleBlock;

/// A read-only window over slots `[0, active_count)` of one block.
///
/// Handed to forces during integration. Every accessor truncates to the
/// live range, so a force never observes free slots, and the shared
/// borrow guarantees a force cannot mutate block state.
#[derive(Clone, Copy, Debug)]
pub struct BlockSlice<'a> {
    block: &'a ParticleBlock,
    len: usize,
}

impl<'a> BlockSlice<'a> {
    pub(crate) fn new(block: &'a ParticleBlock) -> Self {
        Self {
            block,
            len: block.active_count(),
        }
    }

    /// Number of live particles in the view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view covers no particles.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Identifier of the underlying block.
    pub fn block_id(&self) -> BlockId {
        self.block.id()
    }

    /// Schema of the underlying block.
    pub fn schema(&self) -> &'a AttributeSchema {
        self.block.schema()
    }

    /// Live positions.
    pub fn positions(&self) -> &'a [Vec3] {
        self.block.positions()
    }

    /// Live velocities.
    pub fn velocities(&self) -> &'a [Vec3] {
        self.block.velocities()
    }

    /// Live birth times.
    pub fn birth_times(&self) -> &'a [f32] {
        self.block.birth_times()
    }

    /// Live values of a scalar attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a scalar attribute of the schema.
    pub fn scalars(&self, name: &str) -> &'a [f32] {
        &self.block.scalars(name)[..self.len]
    }

    /// Live values of a vector attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a vector attribute of the schema.
    pub fn vectors(&self, name: &str) -> &'a [Vec3] {
        &self.block.vectors(name)[..self.len]
    }

    /// Non-panicking variant of [`scalars`](Self::scalars).
    pub fn try_scalars(&self, name: &str) -> Result<&'a [f32], AttributeNotFound> {
        Ok(&self.block.try_scalars(name)?[..self.len])
    }

    /// Non-panicking variant of [`vectors`](Self::vectors).
    pub fn try_vectors(&self, name: &str) -> Result<&'a [Vec3], AttributeNotFound> {
        Ok(&self.block.try_vectors(name)?[..self.len])
    }
}
