//! Fixed-capacity structure-of-arrays particle storage.
//!
//! A [`ParticleBlock`] owns one array per schema attribute, each exactly
//! `capacity` elements long. Slots `[0, active_count)` hold live
//! particles; the rest are free and their contents are unspecified.

use std::sync::Arc;

use flurry_core::{AttributeNotFound, AttributeSchema, BlockId, Vec3};

use crate::slice::BlockSlice;

/// A fixed-capacity storage unit for up to `capacity` particles.
///
/// Slot `i` in every attribute array refers to the same logical particle.
/// Arrays are never resized; a full block accepts no more particles.
#[derive(Debug)]
pub struct ParticleBlock {
    id: BlockId,
    schema: Arc<AttributeSchema>,
    capacity: usize,
    active_count: usize,
    scalars: Vec<Vec<f32>>,
    vectors: Vec<Vec<Vec3>>,
}

impl ParticleBlock {
    /// Create an empty block with every scalar at 0.0 and every vector at zero.
    pub fn new(id: BlockId, schema: Arc<AttributeSchema>, capacity: usize) -> Self {
        let scalars = (0..schema.scalar_count())
            .map(|_| vec![0.0; capacity])
            .collect();
        let vectors = (0..schema.vector_count())
            .map(|_| vec![Vec3::ZERO; capacity])
            .collect();
        Self {
            id,
            schema,
            capacity,
            active_count: 0,
            scalars,
            vectors,
        }
    }

    /// Container-assigned identifier.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The schema every array of this block follows.
    pub fn schema(&self) -> &Arc<AttributeSchema> {
        &self.schema
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live particles (slots `[0, active_count)`).
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Overwrite the live particle count.
    ///
    /// # Panics
    ///
    /// Panics if `count > capacity`.
    pub fn set_active_count(&mut self, count: usize) {
        assert!(
            count <= self.capacity,
            "active count {count} exceeds block capacity {}",
            self.capacity
        );
        self.active_count = count;
    }

    /// Mark `count` more slots as live.
    ///
    /// # Panics
    ///
    /// Panics if the result would exceed `capacity`.
    pub fn grow_active(&mut self, count: usize) {
        assert!(
            count <= self.remaining_capacity(),
            "cannot grow block {} by {count}: only {} slots free",
            self.id,
            self.remaining_capacity()
        );
        self.active_count += count;
    }

    /// Free slots: `capacity - active_count`.
    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.active_count
    }

    /// Whether no slot is live.
    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    /// Whether every slot is live.
    pub fn is_full(&self) -> bool {
        self.active_count == self.capacity
    }

    // ── Buffer access by name ─────────────────────────────────────

    /// Full-capacity mutable view of a scalar attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a scalar attribute of the schema.
    pub fn scalar_buffer(&mut self, name: &str) -> &mut [f32] {
        let id = self.id;
        self.try_scalar_buffer(name)
            .unwrap_or_else(|e| panic!("block {id}: {e}"))
    }

    /// Full-capacity mutable view of a vector attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a vector attribute of the schema.
    pub fn vector_buffer(&mut self, name: &str) -> &mut [Vec3] {
        let id = self.id;
        self.try_vector_buffer(name)
            .unwrap_or_else(|e| panic!("block {id}: {e}"))
    }

    /// Non-panicking variant of [`scalar_buffer`](Self::scalar_buffer).
    pub fn try_scalar_buffer(&mut self, name: &str) -> Result<&mut [f32], AttributeNotFound> {
        let index = self.schema.scalar_index(name)?;
        Ok(&mut self.scalars[index])
    }

    /// Non-panicking variant of [`vector_buffer`](Self::vector_buffer).
    pub fn try_vector_buffer(&mut self, name: &str) -> Result<&mut [Vec3], AttributeNotFound> {
        let index = self.schema.vector_index(name)?;
        Ok(&mut self.vectors[index])
    }

    /// Full-capacity shared view of a scalar attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a scalar attribute of the schema.
    pub fn scalars(&self, name: &str) -> &[f32] {
        self.try_scalars(name)
            .unwrap_or_else(|e| panic!("block {}: {e}", self.id))
    }

    /// Full-capacity shared view of a vector attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a vector attribute of the schema.
    pub fn vectors(&self, name: &str) -> &[Vec3] {
        self.try_vectors(name)
            .unwrap_or_else(|e| panic!("block {}: {e}", self.id))
    }

    /// Non-panicking variant of [`scalars`](Self::scalars).
    pub fn try_scalars(&self, name: &str) -> Result<&[f32], AttributeNotFound> {
        let index = self.schema.scalar_index(name)?;
        Ok(&self.scalars[index])
    }

    /// Non-panicking variant of [`vectors`](Self::vectors).
    pub fn try_vectors(&self, name: &str) -> Result<&[Vec3], AttributeNotFound> {
        let index = self.schema.vector_index(name)?;
        Ok(&self.vectors[index])
    }

    // ── Buffer access by schema index ─────────────────────────────

    /// Full-capacity mutable view of the scalar attribute at `index`.
    pub fn scalar_buffer_at(&mut self, index: usize) -> &mut [f32] {
        &mut self.scalars[index]
    }

    /// Full-capacity mutable view of the vector attribute at `index`.
    pub fn vector_buffer_at(&mut self, index: usize) -> &mut [Vec3] {
        &mut self.vectors[index]
    }

    /// Live positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.vectors[AttributeSchema::POSITION_INDEX][..self.active_count]
    }

    /// Live velocities.
    pub fn velocities(&self) -> &[Vec3] {
        &self.vectors[AttributeSchema::VELOCITY_INDEX][..self.active_count]
    }

    /// Live birth times.
    pub fn birth_times(&self) -> &[f32] {
        &self.scalars[AttributeSchema::BIRTH_TIME_INDEX][..self.active_count]
    }

    /// Live positions and velocities, borrowed together for integration.
    pub fn positions_velocities_mut(&mut self) -> (&mut [Vec3], &mut [Vec3]) {
        let n = self.active_count;
        let (head, tail) = self.vectors.split_at_mut(AttributeSchema::VELOCITY_INDEX);
        (
            &mut head[AttributeSchema::POSITION_INDEX][..n],
            &mut tail[0][..n],
        )
    }

    /// Live velocities, mutable.
    pub fn velocities_mut(&mut self) -> &mut [Vec3] {
        &mut self.vectors[AttributeSchema::VELOCITY_INDEX][..self.active_count]
    }

    /// Read-only view over the live particles.
    pub fn slice_active(&self) -> BlockSlice<'_> {
        BlockSlice::new(self)
    }

    // ── Particle movement ─────────────────────────────────────────

    /// Copy every attribute value at slot `src` into slot `dst`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= capacity`.
    pub fn move_particle(&mut self, src: usize, dst: usize) {
        if src == dst {
            return;
        }
        for values in &mut self.scalars {
            values[dst] = values[src];
        }
        for values in &mut self.vectors {
            values[dst] = values[src];
        }
    }

    /// Delete the live particle at `index` by moving the last live particle
    /// into its slot. O(1); does not preserve order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= active_count`.
    pub fn swap_remove(&mut self, index: usize) {
        assert!(
            index < self.active_count,
            "swap_remove index {index} out of active range {}",
            self.active_count
        );
        let last = self.active_count - 1;
        self.move_particle(last, index);
        self.active_count = last;
    }

    /// Move the last `count` live particles of `donor` into this block's
    /// free slots. All attributes of a moved particle travel together.
    ///
    /// # Panics
    ///
    /// Panics if `donor` has fewer than `count` live particles, if this
    /// block has fewer than `count` free slots, or if the two blocks do
    /// not share a schema.
    pub fn migrate_from(&mut self, donor: &mut ParticleBlock, count: usize) {
        assert!(
            Arc::ptr_eq(&self.schema, &donor.schema),
            "blocks {} and {} do not share a schema",
            self.id,
            donor.id
        );
        assert!(
            count <= donor.active_count,
            "block {} holds {} particles, cannot migrate {count}",
            donor.id,
            donor.active_count
        );
        assert!(
            count <= self.remaining_capacity(),
            "block {} has {} free slots, cannot receive {count}",
            self.id,
            self.remaining_capacity()
        );

        let src = donor.active_count - count..donor.active_count;
        let dst = self.active_count..self.active_count + count;
        for (into, from) in self.scalars.iter_mut().zip(&donor.scalars) {
            into[dst.clone()].copy_from_slice(&from[src.clone()]);
        }
        for (into, from) in self.vectors.iter_mut().zip(&donor.vectors) {
            into[dst.clone()].copy_from_slice(&from[src.clone()]);
        }
        self.active_count += count;
        donor.active_count -= count;
    }

    /// Memory held by the attribute arrays, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.capacity * self.schema.bytes_per_particle()
    }

    /// Length of every attribute array. Always equals `capacity`.
    #[cfg(test)]
    pub(crate) fn array_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.scalars
            .iter()
            .map(Vec::len)
            .chain(self.vectors.iter().map(Vec::len))
    }
}
