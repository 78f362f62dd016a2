//! Travelling-wave wind oscillator.

use crate::config::WindConfig;
use crate::float::Float;

/// Phase offset between consecutive nodes, in radians.
pub const NODE_PHASE_OFFSET: f32 = 0.3;

/// Wind settings plus the accumulated time that drives its phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wind<F: Float> {
    pub config: WindConfig<F>,
    time: F,
}

impl<F: Float> Wind<F> {
    pub fn new(config: WindConfig<F>) -> Self {
        Wind { config, time: F::zero() }
    }

    /// Seconds of wind accumulated so far.
    pub fn time(&self) -> F {
        self.time
    }

    pub fn reset_time(&mut self) {
        self.time = F::zero();
    }

    /// Advance by `dt` seconds and return the base phase for this frame.
    ///
    /// Returns `None` without touching the clock when the wind cannot push.
    pub fn advance(&mut self, dt: F) -> Option<F> {
        if !self.config.is_active() {
            return None;
        }
        self.time = self.time + dt;
        Some(self.time * self.config.frequency * F::two() * F::pi())
    }

    /// Lateral acceleration on node `index` for a frame with `base_phase`.
    pub fn acceleration(&self, base_phase: F, index: usize) -> F {
        let phase = base_phase + F::from_usize(index) * F::from_f32(NODE_PHASE_OFFSET);
        phase.sin() * self.config.amplitude
    }
}

impl<F: Float> Default for Wind<F> {
    fn default() -> Self {
        Self::new(WindConfig::calm())
    }
}
