//! [`EmitContext`] and [`EmitterDestination`]: the write side of emission.
//!
//! ```text
//!   Emitter::emit(&mut ctx)
//!       │
//!       ├─ ctx.request_destination() ──► fresh block appended to container
//!       │        │
//!       │        └─ EmitterDestination: write slots [0, n), set_emitted_amount(n)
//!       │
//!       └─ (repeat as needed)
//!
//!   solver: ctx.into_pending() ──► default-fill, grow active counts
//! ```
//!
//! Every destination is a block allocated for that request alone, so two
//! destinations never alias and an emitter can never observe or overwrite
//! live particles.

use flurry_core::{AttributeSchema, Vec3};
use flurry_storage::{ParticleBlock, ParticleContainer};
use smallvec::SmallVec;

/// A destination handed out during the current emission pass.
///
/// `index` is the block's position in
/// [`ParticleContainer::active_blocks`]; it stays valid until the next
/// block release, which never happens during emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDestination {
    /// Position of the destination block in the container.
    pub index: usize,
    /// Particles the emitter wrote into it.
    pub emitted: usize,
}

/// Everything an emitter can see and touch while emitting.
pub struct EmitContext<'a> {
    container: &'a mut ParticleContainer,
    pending: SmallVec<[PendingDestination; 4]>,
    time: f32,
    elapsed: f32,
    step_index: u64,
}

impl<'a> EmitContext<'a> {
    /// Create a context over `container` for one emitter invocation.
    ///
    /// `time` is the simulation time after this step's advance.
    pub fn new(
        container: &'a mut ParticleContainer,
        time: f32,
        elapsed: f32,
        step_index: u64,
    ) -> Self {
        Self {
            container,
            pending: SmallVec::new(),
            time,
            elapsed,
            step_index,
        }
    }

    /// Current simulation time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Duration of the current step in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of steps completed before this one.
    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// Slot count of every destination.
    pub fn block_capacity(&self) -> usize {
        self.container.block_capacity()
    }

    /// Allocate a fresh block and hand out its free slots.
    pub fn request_destination(&mut self) -> EmitterDestination<'_> {
        let index = self.container.block_amount();
        let slot = self.pending.len();
        self.pending.push(PendingDestination { index, emitted: 0 });
        let emitted = &mut self.pending[slot].emitted;
        let block = self.container.allocate_block();
        EmitterDestination { block, emitted }
    }

    /// Destinations handed out so far.
    pub fn pending(&self) -> &[PendingDestination] {
        &self.pending
    }

    /// Consume the context, returning the destinations to finalize.
    pub fn into_pending(self) -> SmallVec<[PendingDestination; 4]> {
        self.pending
    }
}

/// Write access to the free slots of one freshly allocated block.
///
/// Particles are written to slots `[0, emitted_amount)`. They only become
/// live once the solver finalizes the emission pass.
pub struct EmitterDestination<'a> {
    block: &'a mut ParticleBlock,
    emitted: &'a mut usize,
}

impl EmitterDestination<'_> {
    /// Number of particles this destination can hold.
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Particles recorded as written so far.
    pub fn emitted_amount(&self) -> usize {
        *self.emitted
    }

    /// Record that slots `[0, amount)` hold new particles.
    ///
    /// # Panics
    ///
    /// Panics if `amount` exceeds [`capacity()`](Self::capacity).
    pub fn set_emitted_amount(&mut self, amount: usize) {
        assert!(
            amount <= self.block.capacity(),
            "emitted amount {amount} exceeds destination capacity {}",
            self.block.capacity()
        );
        *self.emitted = amount;
    }

    /// Full-capacity buffer of a scalar attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a scalar attribute of the schema.
    pub fn scalar_buffer(&mut self, name: &str) -> &mut [f32] {
        self.block.scalar_buffer(name)
    }

    /// Full-capacity buffer of a vector attribute.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a vector attribute of the schema.
    pub fn vector_buffer(&mut self, name: &str) -> &mut [Vec3] {
        self.block.vector_buffer(name)
    }

    /// Full-capacity position buffer.
    pub fn positions(&mut self) -> &mut [Vec3] {
        self.block.vector_buffer_at(AttributeSchema::POSITION_INDEX)
    }

    /// Full-capacity velocity buffer.
    pub fn velocities(&mut self) -> &mut [Vec3] {
        self.block.vector_buffer_at(AttributeSchema::VELOCITY_INDEX)
    }

    /// Full-capacity birth time buffer.
    pub fn birth_times(&mut self) -> &mut [f32] {
        self.block.scalar_buffer_at(AttributeSchema::BIRTH_TIME_INDEX)
    }
}
