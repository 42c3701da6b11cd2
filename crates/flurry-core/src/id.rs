//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a particle block within a container.
///
/// Assigned sequentially by the owning container and never reused while
/// that container lives. A `BlockId` only names storage; it says nothing
/// about which particles the block holds, since compaction moves particles
/// between blocks freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
