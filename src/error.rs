//! Error and status types for rope configuration and stepping.

use core::fmt;

/// Rejected configuration values, reported by [`RopeConfig::validate`].
///
/// The setters on [`RopeSimulation`] never return these; they fall back to the
/// nearest usable value instead.
///
/// [`RopeConfig::validate`]: crate::config::RopeConfig::validate
/// [`RopeSimulation`]: crate::rope::RopeSimulation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Segment count must be at least 1.
    InvalidSegmentCount,
    /// Explicit segment lengths must be finite and non-negative.
    InvalidSegmentLength { index: usize },
    /// Iteration count must be at least 1.
    InvalidIterations,
    /// Damping must be in [0, 1].
    InvalidDamping,
    /// Maximum time step must be positive and finite.
    InvalidTimeStep,
    /// Gravity must be finite.
    InvalidGravity,
    /// Wind amplitude and frequency must be finite.
    InvalidWind,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSegmentCount => write!(f, "segment count must be at least 1"),
            ConfigError::InvalidSegmentLength { index } => {
                write!(f, "segment length {} must be finite and non-negative", index)
            }
            ConfigError::InvalidIterations => write!(f, "iteration count must be at least 1"),
            ConfigError::InvalidDamping => write!(f, "damping must be in [0, 1]"),
            ConfigError::InvalidTimeStep => write!(f, "max time step must be positive and finite"),
            ConfigError::InvalidGravity => write!(f, "gravity must be finite"),
            ConfigError::InvalidWind => write!(f, "wind amplitude and frequency must be finite"),
        }
    }
}

/// Why a call to `update` left the rope untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No anchor providers have been attached yet.
    MissingProviders,
    /// At least one anchor provider returned no position this frame.
    AnchorUnavailable,
    /// The simulation has been destroyed.
    Destroyed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingProviders => write!(f, "anchor providers not attached"),
            SkipReason::AnchorUnavailable => write!(f, "anchor position unavailable"),
            SkipReason::Destroyed => write!(f, "simulation destroyed"),
        }
    }
}

/// Outcome of a single `update` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Physics ran and the node positions are current.
    Stepped,
    /// Nothing changed; the rope keeps its last good shape.
    Skipped(SkipReason),
}

impl StepStatus {
    pub fn is_stepped(self) -> bool {
        matches!(self, StepStatus::Stepped)
    }
}
