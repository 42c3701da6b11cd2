//! The [`Force`] trait.
//!
//! Forces are read-only operators evaluated once per block per step.
//! Each one adds its contribution into a per-particle accumulator that the
//! solver zeroes before the first force and applies to velocities after
//! the last.

use flurry_core::Vec3;
use flurry_storage::BlockSlice;

/// A contributor to the per-particle force accumulator.
///
/// # Contract
///
/// - `add_force()` MUST add to `accumulator`, never overwrite it. Other
///   forces in the list have already written their share.
/// - `accumulator.len() == slice.len()`; index `i` of the accumulator
///   belongs to particle `i` of the slice.
/// - `&self`: forces are stateless during a step. They may be invoked on
///   several blocks concurrently, hence the `Sync` bound.
///
/// # Examples
///
/// ```
/// use flurry_behavior::Force;
/// use flurry_core::Vec3;
/// use flurry_storage::BlockSlice;
///
/// struct Wind(Vec3);
///
/// impl Force for Wind {
///     fn name(&self) -> &str { "wind" }
///
///     fn add_force(&self, _slice: &BlockSlice<'_>, accumulator: &mut [Vec3]) {
///         for f in accumulator.iter_mut() {
///             *f += self.0;
///         }
///     }
/// }
///
/// let wind = Wind(Vec3::X);
/// assert_eq!(wind.name(), "wind");
/// ```
pub trait Force: Send + Sync + 'static {
    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Add this force's contribution for every particle of `slice`.
    fn add_force(&self, slice: &BlockSlice<'_>, accumulator: &mut [Vec3]);
}
