//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the input for [`Simulation::new`](crate::Simulation::new).
//! [`validate()`](SimulationConfig::validate) checks every structural
//! invariant up front, so a simulation that constructs successfully can
//! only fail a step on bad per-step input.

use std::error::Error;
use std::fmt;

use flurry_behavior::{build_schema, DescriptionError, Emitter, Force};
use flurry_storage::ContainerConfig;

/// Default age, in seconds, after which a particle is culled.
pub const DEFAULT_PARTICLE_LIFETIME: f32 = 3.0;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimulationConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Block capacity is zero.
    ZeroBlockCapacity,
    /// Particle lifetime is NaN, infinite, zero, or negative.
    InvalidLifetime {
        /// The invalid value.
        value: f32,
    },
    /// The force and emitter description is inconsistent.
    Description(DescriptionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBlockCapacity => write!(f, "block_capacity must be at least 1"),
            Self::InvalidLifetime { value } => {
                write!(f, "particle_lifetime must be finite and positive, got {value}")
            }
            Self::Description(e) => write!(f, "description: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Description(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DescriptionError> for ConfigError {
    fn from(e: DescriptionError) -> Self {
        Self::Description(e)
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Complete configuration for constructing a [`Simulation`](crate::Simulation).
///
/// Forces and emitters are moved into the simulation and owned by it for
/// its whole lifetime.
pub struct SimulationConfig {
    /// Forces summed into the accumulator each step. Order is irrelevant.
    pub forces: Vec<Box<dyn Force>>,
    /// Emitters run in this order each step.
    pub emitters: Vec<Box<dyn Emitter>>,
    /// Particle slots per block. Default: 1000.
    pub block_capacity: usize,
    /// Age in seconds past which particles are culled. Default: 3.0.
    pub particle_lifetime: f32,
    /// Run per-block integration and culling on the rayon pool.
    /// Default: `false`.
    pub parallel: bool,
}

impl SimulationConfig {
    /// Validate all structural invariants.
    ///
    /// Queries every emitter's declared attributes to check the schema
    /// can be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_parameters()?;
        build_schema(&self.emitters)?;
        Ok(())
    }

    /// Checks that do not involve the emitters.
    pub(crate) fn validate_parameters(&self) -> Result<(), ConfigError> {
        if self.block_capacity == 0 {
            return Err(ConfigError::ZeroBlockCapacity);
        }
        if !self.particle_lifetime.is_finite() || self.particle_lifetime <= 0.0 {
            return Err(ConfigError::InvalidLifetime {
                value: self.particle_lifetime,
            });
        }
        Ok(())
    }

    pub(crate) fn container_config(&self) -> ContainerConfig {
        ContainerConfig::new(self.block_capacity)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            forces: Vec::new(),
            emitters: Vec::new(),
            block_capacity: ContainerConfig::DEFAULT_BLOCK_CAPACITY,
            particle_lifetime: DEFAULT_PARTICLE_LIFETIME,
            parallel: false,
        }
    }
}

impl fmt::Debug for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let forces: Vec<&str> = self.forces.iter().map(|p| p.name()).collect();
        let emitters: Vec<&str> = self.emitters.iter().map(|e| e.name()).collect();
        f.debug_struct("SimulationConfig")
            .field("forces", &forces)
            .field("emitters", &emitters)
            .field("block_capacity", &self.block_capacity)
            .field("particle_lifetime", &self.particle_lifetime)
            .field("parallel", &self.parallel)
            .finish()
    }
}
