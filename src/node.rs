//! Verlet nodes: position plus previous position, no stored velocity.

use crate::float::Float;
use crate::vec::Vec2;

/// One point of the rope.
///
/// Velocity is implicit: `pos - prev_pos` is the displacement over the last
/// step. All nodes have the same (implicit) mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
}

impl<F: Float> Node<F> {
    /// A node at rest at `pos`.
    pub fn at_rest(pos: Vec2<F>) -> Self {
        Node { pos, prev_pos: pos }
    }

    /// Advance one Verlet step under `accel`, with `dt_sq` already squared.
    pub fn integrate(&mut self, accel: Vec2<F>, dt_sq: F, damping: F) {
        let velocity = (self.pos - self.prev_pos).scale(damping);
        self.prev_pos = self.pos;
        self.pos = self.pos + velocity + accel.scale(dt_sq);
    }

    /// Snap onto `target` with zero velocity.
    pub fn pin_to(&mut self, target: Vec2<F>) {
        self.pos = target;
        self.prev_pos = target;
    }

    /// Drop any velocity without moving.
    pub fn settle(&mut self) {
        self.prev_pos = self.pos;
    }

    /// Displacement over the last step.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }
}
