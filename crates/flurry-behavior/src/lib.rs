//! Force and emitter traits for Flurry simulations.
//!
//! A simulation is described by two ordered lists supplied once at
//! initialization: [`Force`]s, which add to a per-particle force
//! accumulator during integration, and [`Emitter`]s, which write new
//! particles into destinations the solver hands out through an
//! [`EmitContext`]. [`build_schema`] discovers the attribute schema from
//! the emitters and precomputes the [`EmissionPlan`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod emitter;
pub mod force;
pub mod plan;

pub use context::{EmitContext, EmitterDestination, PendingDestination};
pub use emitter::Emitter;
pub use force::Force;
pub use plan::{build_schema, DescriptionError, EmissionPlan, EmitterPlan};
