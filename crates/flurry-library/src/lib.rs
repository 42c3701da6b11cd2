//! Reference forces and emitters for the Flurry particle framework.
//!
//! | Component | Kind | Effect |
//! |-----------|------|--------|
//! | [`Gravity`] | force | constant acceleration on every particle |
//! | [`LinearDrag`] | force | `-k * velocity` |
//! | [`PointEmitter`] | emitter | seeded random directions from one point |

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod drag;
pub mod gravity;
pub mod point_emitter;

pub use drag::LinearDrag;
pub use gravity::Gravity;
pub use point_emitter::{PointEmitter, PointEmitterBuilder};
