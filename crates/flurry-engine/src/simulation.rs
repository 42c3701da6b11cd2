//! [`Simulation`]: the step loop over a block-structured particle container.
//!
//! # Lockstep only
//!
//! A simulation is a plain callable struct with no background threads.
//! The host calls [`step()`](Simulation::step) with the elapsed wall time
//! and reads results back through the query methods in between steps.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use flurry_behavior::{build_schema, EmissionPlan, EmitContext, Emitter, Force};
use flurry_core::{AttributeSchema, QueryError, StepError, Vec3};
use flurry_storage::{ContainerError, ParticleContainer};

use crate::config::{ConfigError, SimulationConfig};
use crate::metrics::StepMetrics;
use crate::passes::{cull_block, finalize_destination, integrate_block};

// ── StepResult ───────────────────────────────────────────────────

/// Result of a successful step.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Performance and population metrics for this step.
    pub metrics: StepMetrics,
}

// ── Simulation ───────────────────────────────────────────────────

/// A running particle simulation.
///
/// Owns the particle container, the forces and emitters, and the clock.
/// Between steps every block holds `0..=capacity` live particles in its
/// leading slots and at most one block is partially filled.
pub struct Simulation {
    container: ParticleContainer,
    forces: Vec<Box<dyn Force>>,
    emitters: Vec<Box<dyn Emitter>>,
    plan: EmissionPlan,
    particle_lifetime: f32,
    parallel: bool,
    time: f32,
    step_index: u64,
    accumulator: Vec<Vec3>,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config`, discover the attribute schema and create an
    /// empty simulation at time zero.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate_parameters()?;
        let (schema, plan) = build_schema(&config.emitters)?;
        let container = ParticleContainer::new(schema, config.container_config()).map_err(
            |e| match e {
                ContainerError::ZeroCapacity => ConfigError::ZeroBlockCapacity,
            },
        )?;

        tracing::info!(
            scalars = container.schema().scalar_count(),
            vectors = container.schema().vector_count(),
            block_capacity = config.block_capacity,
            particle_lifetime = config.particle_lifetime,
            forces = config.forces.len(),
            emitters = config.emitters.len(),
            parallel = config.parallel,
            "created particle simulation"
        );

        Ok(Self {
            container,
            forces: config.forces,
            emitters: config.emitters,
            plan,
            particle_lifetime: config.particle_lifetime,
            parallel: config.parallel,
            time: 0.0,
            step_index: 0,
            accumulator: Vec::new(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Advance the simulation by `elapsed_seconds`.
    ///
    /// Runs, in order: time advance, per-block integration and force
    /// application, the death pass, every emitter, then compaction.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidElapsed`] without touching any state if
    /// `elapsed_seconds` is NaN, infinite, or negative.
    pub fn step(&mut self, elapsed_seconds: f32) -> Result<StepResult, StepError> {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return Err(StepError::InvalidElapsed {
                value: elapsed_seconds,
            });
        }
        let step_start = Instant::now();
        let dt = elapsed_seconds;

        // 0. Advance the clock.
        self.time += dt;
        let time = self.time;

        // 1-2. Integrate, apply forces and cull, block by block.
        let integrate_start = Instant::now();
        let particles_culled = self.run_block_passes(dt);
        let integrate_us = integrate_start.elapsed().as_micros() as u64;

        // 3. Emission.
        let emission_start = Instant::now();
        let mut particles_emitted = 0;
        let mut blocks_allocated = 0;
        for (emitter, plan) in self.emitters.iter_mut().zip(self.plan.iter()) {
            let mut ctx = EmitContext::new(&mut self.container, time, dt, self.step_index);
            emitter.emit(&mut ctx);
            let pending = ctx.into_pending();
            let blocks = self.container.active_blocks_mut();
            for dest in &pending {
                finalize_destination(&mut blocks[dest.index], plan, dest.emitted, time);
                particles_emitted += dest.emitted;
            }
            blocks_allocated += pending.len();
        }
        let emission_us = emission_start.elapsed().as_micros() as u64;

        // 4. Compaction.
        let compaction_start = Instant::now();
        let compaction = self.container.compact();
        let compaction_us = compaction_start.elapsed().as_micros() as u64;

        // 5. Metrics.
        self.step_index += 1;
        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            integrate_us,
            emission_us,
            compaction_us,
            particles_culled,
            particles_emitted,
            blocks_allocated,
            blocks_released: compaction.blocks_released,
            particle_amount: self.container.particle_amount(),
            block_amount: self.container.block_amount(),
            memory_bytes: self.container.memory_bytes(),
        };
        tracing::debug!(
            step = self.step_index,
            time,
            particles = metrics.particle_amount,
            blocks = metrics.block_amount,
            culled = particles_culled,
            emitted = particles_emitted,
            "simulation step"
        );
        self.last_metrics = metrics.clone();

        Ok(StepResult { metrics })
    }

    fn run_block_passes(&mut self, dt: f32) -> usize {
        let forces = &self.forces;
        let time = self.time;
        let lifetime = self.particle_lifetime;
        let blocks = self.container.active_blocks_mut();

        if self.parallel {
            blocks
                .par_iter_mut()
                .map_init(Vec::new, |accumulator, block| {
                    integrate_block(block, forces, dt, accumulator);
                    cull_block(block, time, lifetime)
                })
                .sum()
        } else {
            let accumulator = &mut self.accumulator;
            blocks
                .iter_mut()
                .map(|block| {
                    integrate_block(block, forces, dt, accumulator);
                    cull_block(block, time, lifetime)
                })
                .sum()
        }
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Total number of live particles.
    pub fn particle_amount(&self) -> usize {
        self.container.particle_amount()
    }

    /// Number of blocks currently allocated.
    pub fn block_amount(&self) -> usize {
        self.container.block_amount()
    }

    /// Copy every live position into `out`, block by block.
    ///
    /// Returns the number written, which equals
    /// [`particle_amount()`](Self::particle_amount). Elements of `out`
    /// past that count are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::BufferTooSmall`] if `out` cannot hold every
    /// live particle. Nothing is written in that case.
    pub fn get_positions(&self, out: &mut [Vec3]) -> Result<usize, QueryError> {
        let required = self.container.particle_amount();
        if out.len() < required {
            return Err(QueryError::BufferTooSmall {
                required,
                provided: out.len(),
            });
        }
        Ok(self.container.copy_positions(out))
    }

    /// Every live position, block by block.
    pub fn positions(&self) -> Vec<Vec3> {
        let mut out = vec![Vec3::ZERO; self.container.particle_amount()];
        let written = self.container.copy_positions(&mut out);
        out.truncate(written);
        out
    }

    /// Simulation time in seconds: the sum of every accepted step's
    /// elapsed time.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of steps completed.
    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// The attribute schema shared by every block.
    pub fn schema(&self) -> &Arc<AttributeSchema> {
        self.container.schema()
    }

    /// Read-only access to the particle container.
    pub fn particles(&self) -> &ParticleContainer {
        &self.container
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Drop every particle and rewind the clock to zero.
    ///
    /// Forces and emitters are kept as they are, including any internal
    /// emitter state.
    pub fn reset(&mut self) {
        let blocks = self.container.active_blocks_mut();
        for block in blocks.iter_mut() {
            block.set_active_count(0);
        }
        self.container.release_empty_blocks();
        self.time = 0.0;
        self.step_index = 0;
        self.last_metrics = StepMetrics::default();
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("time", &self.time)
            .field("step_index", &self.step_index)
            .field("particles", &self.container.particle_amount())
            .field("blocks", &self.container.block_amount())
            .field("forces", &self.forces.len())
            .field("emitters", &self.emitters.len())
            .field("parallel", &self.parallel)
            .finish()
    }
}
