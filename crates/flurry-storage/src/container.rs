//! The [`ParticleContainer`]: exclusive owner of every particle block.

use std::sync::Arc;

use flurry_core::{AttributeSchema, BlockId, Vec3};

use crate::block::ParticleBlock;
use crate::config::ContainerConfig;
use crate::error::ContainerError;

/// Owns a dynamic set of [`ParticleBlock`]s sharing one schema.
///
/// Blocks are kept in allocation order. Releasing a block preserves the
/// relative order of the rest, so iteration order is stable for the
/// duration of a step. Because ids are assigned monotonically and order
/// is never shuffled, the block list is always sorted by [`BlockId`].
#[derive(Debug)]
pub struct ParticleContainer {
    schema: Arc<AttributeSchema>,
    config: ContainerConfig,
    blocks: Vec<ParticleBlock>,
    next_id: u64,
}

impl ParticleContainer {
    /// Create an empty container.
    pub fn new(
        schema: impl Into<Arc<AttributeSchema>>,
        config: ContainerConfig,
    ) -> Result<Self, ContainerError> {
        config.validate()?;
        Ok(Self {
            schema: schema.into(),
            config,
            blocks: Vec::new(),
            next_id: 0,
        })
    }

    /// The schema shared by every block.
    pub fn schema(&self) -> &Arc<AttributeSchema> {
        &self.schema
    }

    /// Slot count of every block this container allocates.
    pub fn block_capacity(&self) -> usize {
        self.config.block_capacity
    }

    /// Allocate a fresh, empty, zero-initialised block and register it.
    ///
    /// The block is appended after every existing block.
    pub fn allocate_block(&mut self) -> &mut ParticleBlock {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        let index = self.blocks.len();
        self.blocks.push(ParticleBlock::new(
            id,
            Arc::clone(&self.schema),
            self.config.block_capacity,
        ));
        tracing::trace!(block = %id, capacity = self.config.block_capacity, "allocated particle block");
        &mut self.blocks[index]
    }

    /// Look up a block by id.
    pub fn block(&self, id: BlockId) -> Option<&ParticleBlock> {
        self.position(id).map(|i| &self.blocks[i])
    }

    /// Look up a block by id, mutably.
    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut ParticleBlock> {
        self.position(id).map(move |i| &mut self.blocks[i])
    }

    /// Every owned block, in stable order.
    pub fn active_blocks(&self) -> &[ParticleBlock] {
        &self.blocks
    }

    /// Every owned block, mutably, in stable order.
    ///
    /// The slice cannot grow or shrink, so the block set stays fixed while
    /// it is borrowed; only block contents may change.
    pub fn active_blocks_mut(&mut self) -> &mut [ParticleBlock] {
        &mut self.blocks
    }

    /// Remove an empty block and free its storage.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not owned by this container or the block still
    /// holds live particles.
    pub fn release_block(&mut self, id: BlockId) {
        let index = self
            .position(id)
            .unwrap_or_else(|| panic!("release of unknown block {id}"));
        let block = &self.blocks[index];
        assert!(
            block.is_empty(),
            "release of block {id} holding {} particles",
            block.active_count()
        );
        self.blocks.remove(index);
        tracing::trace!(block = %id, "released particle block");
    }

    /// Release every block whose active count is zero.
    ///
    /// Returns the number of blocks released.
    pub fn release_empty_blocks(&mut self) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|block| {
            if block.is_empty() {
                tracing::trace!(block = %block.id(), "released particle block");
                false
            } else {
                true
            }
        });
        before - self.blocks.len()
    }

    /// Total number of live particles across all blocks.
    pub fn particle_amount(&self) -> usize {
        self.blocks.iter().map(ParticleBlock::active_count).sum()
    }

    /// Number of blocks currently owned.
    pub fn block_amount(&self) -> usize {
        self.blocks.len()
    }

    /// Memory held by all block arrays, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.blocks.iter().map(ParticleBlock::memory_bytes).sum()
    }

    /// Copy every live position into `out`, in block order then slot order.
    ///
    /// Returns the number of positions written. `out` must hold at least
    /// [`particle_amount()`](Self::particle_amount) elements.
    ///
    /// # Panics
    ///
    /// Panics if `out` is too short.
    pub fn copy_positions(&self, out: &mut [Vec3]) -> usize {
        let mut written = 0;
        for block in &self.blocks {
            let positions = block.positions();
            out[written..written + positions.len()].copy_from_slice(positions);
            written += positions.len();
        }
        written
    }

    fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.binary_search_by_key(&id, ParticleBlock::id).ok()
    }
}
