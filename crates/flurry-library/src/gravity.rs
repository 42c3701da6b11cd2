//! Uniform gravity.

use flurry_behavior::Force;
use flurry_core::Vec3;
use flurry_storage::BlockSlice;

/// Standard gravity at the Earth's surface, in m/s².
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Constant acceleration applied to every particle.
///
/// Particles have unit mass, so the acceleration is added to the force
/// accumulator as is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    /// Acceleration vector.
    pub acceleration: Vec3,
}

impl Gravity {
    /// Gravity with an arbitrary acceleration vector.
    pub fn new(acceleration: Vec3) -> Self {
        Self { acceleration }
    }

    /// Earth gravity pointing down the Y axis.
    pub fn earth() -> Self {
        Self::new(Vec3::new(0.0, -STANDARD_GRAVITY, 0.0))
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::earth()
    }
}

impl Force for Gravity {
    fn name(&self) -> &str {
        "Gravity"
    }

    fn add_force(&self, _slice: &BlockSlice<'_>, accumulator: &mut [Vec3]) {
        for f in accumulator.iter_mut() {
            *f += self.acceleration;
        }
    }
}
