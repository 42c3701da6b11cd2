//! Reusable force and emitter fixtures.
//!
//! - [`ZeroForce`]: contributes nothing.
//! - [`ConstantForce`]: adds the same vector to every particle.
//! - [`CountingForce`]: counts invocations and particles seen.
//! - [`BurstEmitter`]: a fixed number of particles per step, optionally once.
//! - [`CustomAttributeEmitter`]: declares and writes extra attributes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use flurry_behavior::{EmitContext, Emitter, Force};
use flurry_core::{Vec3, BIRTH_TIME, POSITION, VELOCITY};
use flurry_storage::BlockSlice;

// ── Forces ─────────────────────────────────────────────────────────

/// Contributes nothing. Particles keep their velocity.
pub struct ZeroForce;

impl Force for ZeroForce {
    fn name(&self) -> &str {
        "zero"
    }

    fn add_force(&self, _slice: &BlockSlice<'_>, _accumulator: &mut [Vec3]) {}
}

/// Adds `force` to every particle.
pub struct ConstantForce {
    pub name: String,
    pub force: Vec3,
}

impl ConstantForce {
    pub fn new(name: impl Into<String>, force: Vec3) -> Self {
        Self {
            name: name.into(),
            force,
        }
    }
}

impl Force for ConstantForce {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_force(&self, _slice: &BlockSlice<'_>, accumulator: &mut [Vec3]) {
        for f in accumulator.iter_mut() {
            *f += self.force;
        }
    }
}

/// Shared counters behind a [`CountingForce`].
#[derive(Debug, Default)]
pub struct ForceCounters {
    calls: AtomicUsize,
    particles: AtomicUsize,
}

impl ForceCounters {
    /// Number of `add_force()` invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Sum of slice lengths over every invocation.
    pub fn particles(&self) -> usize {
        self.particles.load(Ordering::Relaxed)
    }
}

/// Contributes nothing but records every call.
///
/// Keep the handle from [`counters()`](Self::counters) before moving the
/// force into a simulation.
#[derive(Default)]
pub struct CountingForce {
    counters: Arc<ForceCounters>,
}

impl CountingForce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> Arc<ForceCounters> {
        Arc::clone(&self.counters)
    }
}

impl Force for CountingForce {
    fn name(&self) -> &str {
        "counting"
    }

    fn add_force(&self, slice: &BlockSlice<'_>, accumulator: &mut [Vec3]) {
        assert_eq!(slice.len(), accumulator.len(), "accumulator length mismatch");
        self.counters.calls.fetch_add(1, Ordering::Relaxed);
        self.counters
            .particles
            .fetch_add(slice.len(), Ordering::Relaxed);
    }
}

// ── Emitters ───────────────────────────────────────────────────────

/// Emits `count` particles every step.
///
/// Only attributes set through the builder methods are declared; the rest
/// are left to the solver defaults (birth time = current time, zero
/// position and velocity). Bursts larger than one block span several
/// destinations.
#[derive(Clone, Debug)]
pub struct BurstEmitter {
    pub count: usize,
    pub birth_time: Option<f32>,
    pub position: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub one_shot: bool,
    fired: bool,
}

impl BurstEmitter {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            birth_time: None,
            position: None,
            velocity: None,
            one_shot: false,
            fired: false,
        }
    }

    /// Stamp every particle with an explicit birth time.
    pub fn born_at(mut self, time: f32) -> Self {
        self.birth_time = Some(time);
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Emit on the first step only.
    pub fn once(mut self) -> Self {
        self.one_shot = true;
        self
    }
}

impl Emitter for BurstEmitter {
    fn name(&self) -> &str {
        "burst"
    }

    fn used_scalar_attributes(&self) -> Vec<&str> {
        self.birth_time.map(|_| BIRTH_TIME).into_iter().collect()
    }

    fn used_vector_attributes(&self) -> Vec<&str> {
        let mut used = Vec::new();
        if self.position.is_some() {
            used.push(POSITION);
        }
        if self.velocity.is_some() {
            used.push(VELOCITY);
        }
        used
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) {
        if self.one_shot && self.fired {
            return;
        }
        self.fired = true;

        let mut remaining = self.count;
        while remaining > 0 {
            let mut dest = ctx.request_destination();
            let n = remaining.min(dest.capacity());
            if let Some(t) = self.birth_time {
                dest.birth_times()[..n].fill(t);
            }
            if let Some(p) = self.position {
                dest.positions()[..n].fill(p);
            }
            if let Some(v) = self.velocity {
                dest.velocities()[..n].fill(v);
            }
            dest.set_emitted_amount(n);
            remaining -= n;
        }
    }
}

/// Emits `count` particles per step carrying extra named attributes.
#[derive(Clone, Debug)]
pub struct CustomAttributeEmitter {
    pub count: usize,
    pub scalars: Vec<(String, f32)>,
    pub vectors: Vec<(String, Vec3)>,
}

impl CustomAttributeEmitter {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            scalars: Vec::new(),
            vectors: Vec::new(),
        }
    }

    pub fn scalar(mut self, name: impl Into<String>, value: f32) -> Self {
        self.scalars.push((name.into(), value));
        self
    }

    pub fn vector(mut self, name: impl Into<String>, value: Vec3) -> Self {
        self.vectors.push((name.into(), value));
        self
    }
}

impl Emitter for CustomAttributeEmitter {
    fn name(&self) -> &str {
        "custom_attributes"
    }

    fn used_scalar_attributes(&self) -> Vec<&str> {
        self.scalars.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn used_vector_attributes(&self) -> Vec<&str> {
        self.vectors.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) {
        let mut remaining = self.count;
        while remaining > 0 {
            let mut dest = ctx.request_destination();
            let n = remaining.min(dest.capacity());
            for (name, value) in &self.scalars {
                dest.scalar_buffer(name)[..n].fill(*value);
            }
            for (name, value) in &self.vectors {
                dest.vector_buffer(name)[..n].fill(*value);
            }
            dest.set_emitted_amount(n);
            remaining -= n;
        }
    }
}
