//! Point emitter: particles leave a single origin in random directions.
//!
//! Emission is rate-based. Each step emits `floor(rate * elapsed + carry)`
//! particles and carries the fractional part to the next step, so a rate
//! of 10/s at 60 steps/s still averages 10 particles per second.
//!
//! Directions are uniform on the unit sphere and drawn from a
//! [`ChaCha8Rng`] seeded at construction, so two emitters built with the
//! same seed produce identical particle streams.
//!
//! # Construction
//!
//! ```
//! use flurry_core::Vec3;
//! use flurry_library::PointEmitter;
//!
//! let emitter = PointEmitter::builder()
//!     .origin(Vec3::new(0.0, 1.0, 0.0))
//!     .rate(500.0)
//!     .speed(2.0)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! assert_eq!(emitter.rate(), 500.0);
//! ```

use std::f32::consts::TAU;

use flurry_behavior::{EmitContext, Emitter};
use flurry_core::{Vec3, BIRTH_TIME, POSITION, VELOCITY};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Emits particles from a fixed point at a fixed rate.
///
/// Writes [`POSITION`], [`VELOCITY`] and [`BIRTH_TIME`] for every particle.
/// Every particle of a step shares the step's simulation time as its
/// birth time.
#[derive(Debug)]
pub struct PointEmitter {
    origin: Vec3,
    rate: f32,
    speed: f32,
    rng: ChaCha8Rng,
    carry: f32,
}

/// Builder for [`PointEmitter`].
///
/// Required field: `rate`.
/// Defaults: `origin = (0, 0, 0)`, `speed = 1.0`, `seed = 0`.
pub struct PointEmitterBuilder {
    origin: Vec3,
    rate: Option<f32>,
    speed: f32,
    seed: u64,
}

impl PointEmitter {
    /// Create a new builder for configuring a `PointEmitter`.
    pub fn builder() -> PointEmitterBuilder {
        PointEmitterBuilder {
            origin: Vec3::ZERO,
            rate: None,
            speed: 1.0,
            seed: 0,
        }
    }

    /// Emission point.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Particles per second.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Initial speed of every particle.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Particles due this step, keeping the fractional remainder.
    fn take_due(&mut self, elapsed: f32) -> usize {
        let exact = self.rate * elapsed + self.carry;
        let whole = exact.floor();
        self.carry = exact - whole;
        whole as usize
    }

    /// A direction drawn uniformly from the unit sphere.
    fn random_direction(rng: &mut ChaCha8Rng) -> Vec3 {
        let z: f32 = rng.gen::<f32>() * 2.0 - 1.0;
        let phi: f32 = rng.gen::<f32>() * TAU;
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }
}

impl PointEmitterBuilder {
    /// Set the emission point.
    /// Default: the origin.
    pub fn origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Set the emission rate in particles per second. Must be >= 0.
    pub fn rate(mut self, rate: f32) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the initial particle speed. Must be >= 0.
    /// Default: `1.0`.
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the RNG seed.
    /// Default: `0`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the emitter, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `rate` is not set
    /// - `rate` or `speed` is negative or not finite
    /// - `origin` is not finite
    pub fn build(self) -> Result<PointEmitter, String> {
        let rate = self.rate.ok_or_else(|| "rate is required".to_string())?;
        if !rate.is_finite() || rate < 0.0 {
            return Err(format!("rate must be finite and >= 0, got {rate}"));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(format!("speed must be finite and >= 0, got {}", self.speed));
        }
        if !self.origin.is_finite() {
            return Err(format!("origin must be finite, got {}", self.origin));
        }

        Ok(PointEmitter {
            origin: self.origin,
            rate,
            speed: self.speed,
            rng: ChaCha8Rng::seed_from_u64(self.seed),
            carry: 0.0,
        })
    }
}

impl Emitter for PointEmitter {
    fn name(&self) -> &str {
        "PointEmitter"
    }

    fn used_scalar_attributes(&self) -> Vec<&str> {
        vec![BIRTH_TIME]
    }

    fn used_vector_attributes(&self) -> Vec<&str> {
        vec![POSITION, VELOCITY]
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) {
        let mut remaining = self.take_due(ctx.elapsed());
        let time = ctx.time();

        while remaining > 0 {
            let mut dest = ctx.request_destination();
            let n = remaining.min(dest.capacity());

            dest.positions()[..n].fill(self.origin);
            dest.birth_times()[..n].fill(time);
            for v in &mut dest.velocities()[..n] {
                *v = Self::random_direction(&mut self.rng) * self.speed;
            }

            dest.set_emitted_amount(n);
            remaining -= n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flurry_engine::{Simulation, SimulationConfig};
    use flurry_test_utils::ZeroForce;
    use proptest::prelude::*;

    fn simulation(emitter: PointEmitter, capacity: usize) -> Simulation {
        Simulation::new(SimulationConfig {
            forces: vec![Box::new(ZeroForce)],
            emitters: vec![Box::new(emitter)],
            block_capacity: capacity,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn builder_requires_rate() {
        let err = PointEmitter::builder().build().unwrap_err();
        assert!(err.contains("rate"));
    }

    #[test]
    fn builder_rejects_bad_values() {
        assert!(PointEmitter::builder().rate(-1.0).build().is_err());
        assert!(PointEmitter::builder().rate(f32::NAN).build().is_err());
        assert!(PointEmitter::builder().rate(1.0).speed(-2.0).build().is_err());
        assert!(PointEmitter::builder()
            .rate(1.0)
            .origin(Vec3::splat(f32::INFINITY))
            .build()
            .is_err());
    }

    #[test]
    fn fractional_rate_carries_between_steps() {
        let emitter = PointEmitter::builder().rate(2.5).build().unwrap();
        let mut sim = simulation(emitter, 16);
        // 2.5 per step: 2, 3, 2, 3 ...
        let counts: Vec<usize> = (0..4)
            .map(|_| sim.step(1.0).unwrap().metrics.particles_emitted)
            .collect();
        assert_eq!(counts, vec![2, 3, 2, 3]);
    }

    #[test]
    fn writes_origin_speed_and_birth_time() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let emitter = PointEmitter::builder()
            .origin(origin)
            .rate(100.0)
            .speed(4.0)
            .seed(11)
            .build()
            .unwrap();
        let mut sim = simulation(emitter, 8);
        sim.step(0.1).unwrap();

        assert_eq!(sim.particle_amount(), 10);
        assert_eq!(sim.block_amount(), 2);
        for block in sim.particles().active_blocks() {
            assert!(block.positions().iter().all(|&p| p == origin));
            assert!(block.birth_times().iter().all(|&t| t == sim.time()));
            for v in block.velocities() {
                assert!((v.length() - 4.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let build = |seed| {
            PointEmitter::builder()
                .rate(50.0)
                .seed(seed)
                .build()
                .unwrap()
        };
        let mut a = simulation(build(3), 32);
        let mut b = simulation(build(3), 32);
        let mut c = simulation(build(4), 32);
        for _ in 0..3 {
            a.step(0.1).unwrap();
            b.step(0.1).unwrap();
            c.step(0.1).unwrap();
        }
        let velocities = |s: &Simulation| -> Vec<Vec3> {
            s.particles()
                .active_blocks()
                .iter()
                .flat_map(|b| b.velocities().to_vec())
                .collect()
        };
        assert_eq!(velocities(&a), velocities(&b));
        assert_ne!(velocities(&a), velocities(&c));
    }

    proptest! {
        #[test]
        fn directions_are_unit_length(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..32 {
                let d = PointEmitter::random_direction(&mut rng);
                prop_assert!((d.length() - 1.0).abs() < 1e-4);
            }
        }

        #[test]
        fn long_run_average_matches_rate(rate in 0.0f32..200.0, steps in 1usize..40) {
            let mut emitter = PointEmitter::builder().rate(rate).build().unwrap();
            let total: usize = (0..steps).map(|_| emitter.take_due(0.05)).sum();
            let expected = rate * 0.05 * steps as f32;
            prop_assert!((total as f32 - expected).abs() <= 1.0 + expected * 1e-4);
        }
    }
}
