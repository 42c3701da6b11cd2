//! Storage-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while constructing a container.
///
/// Runtime misuse of blocks (out-of-range slots, releasing a non-empty
/// block, unknown attribute names) is a programming error and panics
/// instead of surfacing here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// `block_capacity` was zero.
    ZeroCapacity,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "block capacity must be at least 1"),
        }
    }
}

impl Error for ContainerError {}
