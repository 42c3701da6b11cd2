//! Per-step performance and population metrics.

/// Timing, population and memory metrics collected during a single step.
///
/// All durations are in microseconds. The simulation populates these
/// fields after each `step()` call and keeps the most recent set for
/// [`Simulation::last_metrics`](crate::Simulation::last_metrics).
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent integrating, applying forces and culling, in microseconds.
    pub integrate_us: u64,
    /// Time spent running emitters and finalizing destinations, in microseconds.
    pub emission_us: u64,
    /// Time spent compacting blocks, in microseconds.
    pub compaction_us: u64,
    /// Particles removed by the death pass.
    pub particles_culled: usize,
    /// Particles added by emitters.
    pub particles_emitted: usize,
    /// Destination blocks allocated during emission.
    pub blocks_allocated: usize,
    /// Blocks released by compaction.
    pub blocks_released: usize,
    /// Live particles after the step.
    pub particle_amount: usize,
    /// Blocks owned after the step.
    pub block_amount: usize,
    /// Memory held by block arrays after the step, in bytes.
    pub memory_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.integrate_us, 0);
        assert_eq!(m.emission_us, 0);
        assert_eq!(m.compaction_us, 0);
        assert_eq!(m.particles_culled, 0);
        assert_eq!(m.particles_emitted, 0);
        assert_eq!(m.blocks_allocated, 0);
        assert_eq!(m.blocks_released, 0);
        assert_eq!(m.particle_amount, 0);
        assert_eq!(m.block_amount, 0);
        assert_eq!(m.memory_bytes, 0);
    }
}
