//! Block-structured particle storage for Flurry simulations.
//!
//! Particles live in fixed-capacity structure-of-arrays blocks. No
//! particle owns a heap allocation; a block owns one array per schema
//! attribute, and a container owns the blocks.
//!
//! # Architecture
//!
//! ```text
//! ParticleContainer (owner, stable block order)
//! ├── Arc<AttributeSchema> (shared by every block, frozen at init)
//! └── ParticleBlock[] (capacity C each, allocated on demand)
//!     ├── scalar arrays: Vec<f32> × schema.scalar_count()
//!     ├── vector arrays: Vec<Vec3> × schema.vector_count()
//!     └── active_count (slots [0, active_count) are live)
//! ```
//!
//! # Lifetimes
//!
//! - **Block:** created by [`ParticleContainer::allocate_block`], destroyed
//!   by [`ParticleContainer::release_block`] once empty (normally during
//!   [`ParticleContainer::compact`]).
//! - **Particle:** a `(block, slot)` pair, valid until the next removal or
//!   compaction. There is no stable per-particle identity.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod compact;
pub mod config;
pub mod container;
pub mod error;
pub mod slice;

pub use block::ParticleBlock;
pub use compact::CompactionStats;
pub use config::ContainerConfig;
pub use container::ParticleContainer;
pub use error::ContainerError;
pub use slice::BlockSlice;
