//! Container configuration parameters.

use crate::error::ContainerError;

/// Configuration for a [`ParticleContainer`](crate::ParticleContainer).
///
/// Validated at construction; immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Number of particle slots in each block.
    ///
    /// Default: 1000. Must be at least 1. Smaller blocks reclaim memory
    /// sooner after mass death; larger blocks amortize per-block overhead
    /// (force dispatch, compaction bookkeeping).
    pub block_capacity: usize,
}

impl ContainerConfig {
    /// Default number of slots per block.
    pub const DEFAULT_BLOCK_CAPACITY: usize = 1000;

    /// Create a config with the given block capacity.
    pub fn new(block_capacity: usize) -> Self {
        Self { block_capacity }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.block_capacity == 0 {
            return Err(ContainerError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCK_CAPACITY)
    }
}
