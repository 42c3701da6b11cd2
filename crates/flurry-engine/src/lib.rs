//! Simulation loop for Flurry.
//!
//! A [`Simulation`] owns the particle container together with the forces
//! and emitters supplied in its [`SimulationConfig`]. Each call to
//! [`Simulation::step`] runs the same fixed sequence:
//!
//! ```text
//!   advance time
//!        │
//!        ▼
//!   per block (serial or rayon) ── integrate ── apply forces ── cull dead
//!        │
//!        ▼
//!   emitters in order ── fresh destination blocks ── default fill
//!        │
//!        ▼
//!   compact ── release empty blocks ── StepMetrics
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod simulation;

mod passes;

pub use config::{ConfigError, SimulationConfig};
pub use metrics::StepMetrics;
pub use simulation::{Simulation, StepResult};
