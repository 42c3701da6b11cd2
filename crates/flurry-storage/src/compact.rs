//! Block compaction: migrate particles out of sparse blocks and release
//! the ones left empty.
//!
//! Interleaved death and emission leave many blocks partially filled.
//! [`ParticleContainer::compact`] packs particles into as few blocks as
//! possible so that at most one block remains partially filled.
//!
//! # Algorithm
//!
//! Blocks are ordered fullest first (ties: earlier block first). A
//! receiver cursor walks forward from the fullest non-full block, a donor
//! cursor walks backward from the emptiest non-empty block, and the tail
//! particles of the donor fill the receiver's free slots. The cursors meet
//! at the single block that may remain partial; everything behind the
//! donor cursor is empty and is released.

use std::cmp::Reverse;

use crate::block::ParticleBlock;
use crate::container::ParticleContainer;

/// What a [`ParticleContainer::compact`] pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactionStats {
    /// Particles copied from one block to another.
    pub particles_moved: usize,
    /// Blocks released because they ended up empty.
    pub blocks_released: usize,
}

impl ParticleContainer {
    /// Pack particles into the fewest blocks and release empty blocks.
    ///
    /// Afterwards at most one block is partially filled and no block is
    /// empty. Particles may be reordered arbitrarily, but every attribute
    /// of a moved particle moves with it. Calling `compact()` again with no
    /// intervening mutation is a no-op.
    pub fn compact(&mut self) -> CompactionStats {
        let particles_moved = pack(self.active_blocks_mut());
        let blocks_released = self.release_empty_blocks();
        if particles_moved > 0 || blocks_released > 0 {
            tracing::trace!(particles_moved, blocks_released, "compacted particle blocks");
        }
        CompactionStats {
            particles_moved,
            blocks_released,
        }
    }
}

/// Migrate particles between `blocks` until at most one is partial.
///
/// Returns the number of particles moved.
fn pack(blocks: &mut [ParticleBlock]) -> usize {
    if blocks.len() < 2 {
        return 0;
    }

    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by_key(|&i| (Reverse(blocks[i].active_count()), i));

    let mut moved = 0;
    let mut receiver = 0;
    let mut donor = order.len() - 1;
    while receiver < donor {
        let (r, d) = (order[receiver], order[donor]);
        if blocks[r].is_full() {
            receiver += 1;
            continue;
        }
        if blocks[d].is_empty() {
            donor -= 1;
            continue;
        }
        let count = blocks[r]
            .remaining_capacity()
            .min(blocks[d].active_count());
        let (into, from) = pair_mut(blocks, r, d);
        into.migrate_from(from, count);
        moved += count;
    }
    moved
}

/// Two distinct mutable elements of one slice.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "pair_mut requires distinct indices");
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
