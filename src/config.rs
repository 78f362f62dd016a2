//! Configuration types for the rope simulation.

use crate::error::ConfigError;
use crate::float::Float;
use alloc::vec::Vec as AllocVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rope topology and solver parameters.
///
/// # Builder Pattern
/// ```
/// use tether::config::RopeConfig;
///
/// let config: RopeConfig<f32> = RopeConfig::new()
///     .with_segment_count(16)
///     .with_gravity(980.0)
///     .with_iterations(12)
///     .with_damping(0.98);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RopeConfig<F: Float> {
    /// Number of uniform segments when `segment_lengths` is empty. Default: 12.
    pub segment_count: usize,
    /// Explicit per-segment rest lengths. Overrides `segment_count` when non-empty.
    pub segment_lengths: AllocVec<F>,
    /// Downward (+y) acceleration in units per second². Default: 980.
    pub gravity: F,
    /// Constraint relaxation passes per frame. Default: 10.
    pub iterations: usize,
    /// Largest integration step in seconds, whatever the host reports. Default: 1/30.
    pub max_time_step: F,
    /// Velocity retention per step, [0, 1]. 1.0 = no damping. Default: 0.98.
    pub damping: F,
}

impl<F: Float> RopeConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        RopeConfig {
            segment_count: 12,
            segment_lengths: AllocVec::new(),
            gravity: F::from_f32(980.0),
            iterations: 10,
            max_time_step: F::from_f32(1.0 / 30.0),
            damping: F::from_f32(0.98),
        }
    }

    /// Set the number of uniform segments.
    pub fn with_segment_count(mut self, segment_count: usize) -> Self {
        self.segment_count = segment_count;
        self
    }

    /// Set explicit per-segment rest lengths.
    pub fn with_segment_lengths(mut self, lengths: &[F]) -> Self {
        self.segment_lengths = lengths.to_vec();
        self
    }

    /// Set the gravity acceleration.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the number of constraint iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the maximum integration step, in seconds.
    pub fn with_max_time_step(mut self, max_time_step: F) -> Self {
        self.max_time_step = max_time_step;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Number of segments the rope will have once seeded.
    pub fn effective_segment_count(&self) -> usize {
        if self.segment_lengths.is_empty() {
            self.segment_count.max(1)
        } else {
            self.segment_lengths.len()
        }
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_lengths.is_empty() && self.segment_count == 0 {
            return Err(ConfigError::InvalidSegmentCount);
        }
        for (index, &len) in self.segment_lengths.iter().enumerate() {
            if !len.is_finite() || len < F::zero() {
                return Err(ConfigError::InvalidSegmentLength { index });
            }
        }
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if !(self.damping >= F::zero() && self.damping <= F::one()) {
            return Err(ConfigError::InvalidDamping);
        }
        if !self.max_time_step.is_finite() || self.max_time_step <= F::zero() {
            return Err(ConfigError::InvalidTimeStep);
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity);
        }
        Ok(())
    }

    /// Copy of this config with every out-of-range field pulled back to a usable value.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::new();
        RopeConfig {
            segment_count: self.segment_count.max(1),
            segment_lengths: self.segment_lengths.clone(),
            gravity: if self.gravity.is_finite() { self.gravity } else { F::zero() },
            iterations: self.iterations.max(1),
            max_time_step: if self.max_time_step.is_finite() && self.max_time_step > F::zero() {
                self.max_time_step
            } else {
                defaults.max_time_step
            },
            damping: self.damping.clamp(F::zero(), F::one()),
        }
    }
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lateral wind oscillation.
///
/// Each node `i` is pushed along x by `sin(phase + i * 0.3) * amplitude`, so
/// the disturbance travels down the rope instead of swaying it in lockstep.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindConfig<F: Float> {
    pub enabled: bool,
    /// Peak lateral acceleration, units per second².
    pub amplitude: F,
    /// Oscillation frequency in cycles per second.
    pub frequency: F,
}

impl<F: Float> WindConfig<F> {
    pub fn new(enabled: bool, amplitude: F, frequency: F) -> Self {
        WindConfig { enabled, amplitude, frequency }
    }

    /// Wind with no effect.
    pub fn calm() -> Self {
        WindConfig { enabled: false, amplitude: F::zero(), frequency: F::zero() }
    }

    /// Enabled and able to produce a non-zero push.
    pub fn is_active(&self) -> bool {
        self.enabled
            && self.amplitude != F::zero()
            && self.frequency != F::zero()
            && self.amplitude.is_finite()
            && self.frequency.is_finite()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.amplitude.is_finite() && self.frequency.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::InvalidWind)
        }
    }
}

impl<F: Float> Default for WindConfig<F> {
    fn default() -> Self {
        Self::calm()
    }
}
