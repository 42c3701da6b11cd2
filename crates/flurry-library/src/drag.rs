//! Velocity-proportional drag.

use flurry_behavior::Force;
use flurry_core::Vec3;
use flurry_storage::BlockSlice;

/// Linear drag: adds `-coefficient * velocity` for every particle.
///
/// Constructed via [`LinearDrag::new`], which rejects negative or
/// non-finite coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearDrag {
    coefficient: f32,
}

impl LinearDrag {
    /// Create a drag force.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `coefficient` is NaN, infinite, or negative.
    pub fn new(coefficient: f32) -> Result<Self, String> {
        if !coefficient.is_finite() || coefficient < 0.0 {
            return Err(format!(
                "drag coefficient must be finite and >= 0, got {coefficient}"
            ));
        }
        Ok(Self { coefficient })
    }

    /// The drag coefficient `k`.
    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }
}

impl Force for LinearDrag {
    fn name(&self) -> &str {
        "LinearDrag"
    }

    fn add_force(&self, slice: &BlockSlice<'_>, accumulator: &mut [Vec3]) {
        for (f, v) in accumulator.iter_mut().zip(slice.velocities()) {
            *f -= *v * self.coefficient;
        }
    }
}
