//! Step observer trait for monitoring rope simulation progress.

use crate::error::SkipReason;

/// Trait for observing rope simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after the nodes have been (re)seeded along the anchor line.
    fn on_reset(&mut self, _node_count: usize) {}

    /// Called after all free nodes have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each constraint iteration.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called when a frame's physics is fully complete.
    fn on_step_complete(&mut self) {}

    /// Called when `update` returns without touching the rope.
    fn on_frame_skipped(&mut self, _reason: SkipReason) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
