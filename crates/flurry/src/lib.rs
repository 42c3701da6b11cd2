//! Flurry: a block-structured particle simulation core.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Flurry sub-crates. For most users, adding `flurry` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use flurry::prelude::*;
//!
//! // A force pushing every particle along +X.
//! struct Wind;
//! impl Force for Wind {
//!     fn name(&self) -> &str { "wind" }
//!     fn add_force(&self, _particles: &BlockSlice<'_>, forces: &mut [Vec3]) {
//!         for f in forces.iter_mut() {
//!             *f += Vec3::X;
//!         }
//!     }
//! }
//!
//! let emitter = PointEmitter::builder().rate(600.0).seed(1).build().unwrap();
//! let config = SimulationConfig {
//!     forces: vec![Box::new(Gravity::earth()), Box::new(Wind)],
//!     emitters: vec![Box::new(emitter)],
//!     block_capacity: 256,
//!     ..Default::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//! for _ in 0..60 {
//!     sim.step(1.0 / 60.0).unwrap();
//! }
//! assert_eq!(sim.particle_amount(), 600);
//!
//! let mut positions = vec![Vec3::ZERO; sim.particle_amount()];
//! assert_eq!(sim.get_positions(&mut positions), Ok(600));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flurry-core` | Attribute schema, block ids, error types, `Vec3` |
//! | [`storage`] | `flurry-storage` | Particle blocks, container, compaction |
//! | [`behavior`] | `flurry-behavior` | Force and emitter traits, emission context |
//! | [`engine`] | `flurry-engine` | The simulation step loop and metrics |
//! | [`library`] | `flurry-library` | Reference forces and emitters |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, attribute schema, and errors (`flurry-core`).
pub use flurry_core as types;

/// Block-structured particle storage (`flurry-storage`).
///
/// [`storage::ParticleContainer`] owns every [`storage::ParticleBlock`]
/// and packs them with [`storage::ParticleContainer::compact`].
pub use flurry_storage as storage;

/// Force and emitter traits (`flurry-behavior`).
///
/// [`behavior::Force`] and [`behavior::Emitter`] are the extension points
/// for user-defined particle behavior.
pub use flurry_behavior as behavior;

/// The simulation loop (`flurry-engine`).
pub use flurry_engine as engine;

/// Reference forces and emitters (`flurry-library`).
///
/// Includes [`library::Gravity`], [`library::LinearDrag`] and
/// [`library::PointEmitter`].
pub use flurry_library as library;

/// Common imports for typical Flurry usage.
///
/// ```rust
/// use flurry::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use flurry_core::{AttributeSchema, Vec3, BIRTH_TIME, POSITION, VELOCITY};

    // Errors
    pub use flurry_core::{QueryError, StepError};

    // Storage
    pub use flurry_storage::{BlockSlice, ParticleBlock, ParticleContainer};

    // Behavior
    pub use flurry_behavior::{EmitContext, Emitter, EmitterDestination, Force};

    // Engine
    pub use flurry_engine::{ConfigError, Simulation, SimulationConfig, StepMetrics, StepResult};

    // Library
    pub use flurry_library::{Gravity, LinearDrag, PointEmitter};
}
