//! The [`Emitter`] trait.

use crate::context::EmitContext;

/// A source of new particles.
///
/// Emitters run once per step, in registration order, after the death
/// pass. Each one asks its [`EmitContext`] for as many destinations as it
/// needs, writes particle attributes into the front of each destination
/// and records how many particles it wrote.
///
/// Attributes an emitter declares are added to the simulation's schema.
/// Every attribute it does not declare is overwritten with a default once
/// `emit()` returns: scalars (including
/// [`BIRTH_TIME`](flurry_core::BIRTH_TIME)) receive the current simulation
/// time and vectors receive zero. An emitter that writes positions must
/// therefore list [`POSITION`](flurry_core::POSITION) as used.
///
/// Unlike forces, emitters take `&mut self` so they can carry state across
/// steps such as an RNG or a fractional emission remainder.
pub trait Emitter: Send + 'static {
    /// Human-readable name for logging and error attribution.
    fn name(&self) -> &str;

    /// Scalar attributes this emitter initializes.
    ///
    /// Queried once, when the simulation is built. Default: none.
    fn used_scalar_attributes(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Vector attributes this emitter initializes.
    ///
    /// Queried once, when the simulation is built. Default: none.
    fn used_vector_attributes(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Emit this step's particles.
    fn emit(&mut self, ctx: &mut EmitContext<'_>);
}
