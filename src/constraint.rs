//! Distance constraints between neighbouring rope nodes, and end pinning.

use crate::float::Float;
use crate::node::Node;
use crate::vec::Vec2;

/// Separation substituted for a zero-length segment so the correction stays finite.
pub const MIN_SEGMENT_DISTANCE: f32 = 1e-4;

/// Which ends of the rope are hard-pinned to their anchors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinnedEnds {
    pub start: bool,
    pub end: bool,
}

impl PinnedEnds {
    pub fn new(start: bool, end: bool) -> Self {
        PinnedEnds { start, end }
    }

    pub fn both() -> Self {
        PinnedEnds { start: true, end: true }
    }

    /// Whether node `index` of a rope with `node_count` nodes is pinned.
    pub fn is_pinned(&self, index: usize, node_count: usize) -> bool {
        (self.start && index == 0) || (self.end && node_count > 0 && index == node_count - 1)
    }

    /// Snap pinned ends onto their anchors with zero velocity.
    ///
    /// With `reseed` set, interior nodes also lose their velocity. Per-frame
    /// pinning passes `false` and leaves interior `prev_pos` alone.
    pub fn apply<F: Float>(
        &self,
        nodes: &mut [Node<F>],
        start_anchor: Vec2<F>,
        end_anchor: Vec2<F>,
        reseed: bool,
    ) {
        let count = nodes.len();
        if count == 0 {
            return;
        }
        if self.start {
            nodes[0].pin_to(start_anchor);
        }
        if self.end {
            nodes[count - 1].pin_to(end_anchor);
        }
        if reseed && count > 2 {
            for node in nodes[1..count - 1].iter_mut() {
                node.settle();
            }
        }
    }
}

/// Keeps nodes `a` and `b` at `rest_length` apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F) -> Self {
        DistanceConstraint { a, b, rest_length }
    }

    /// One relaxation step. Each free node takes half the correction; if one
    /// side is fixed the other takes all of it, if both are fixed nothing moves.
    pub fn solve(&self, nodes: &mut [Node<F>], a_fixed: bool, b_fixed: bool) {
        if a_fixed && b_fixed {
            return;
        }

        let a_pos = nodes[self.a].pos;
        let b_pos = nodes[self.b].pos;
        let delta = b_pos - a_pos;
        let mut dist = delta.length();
        if dist == F::zero() {
            dist = F::from_f32(MIN_SEGMENT_DISTANCE);
        }

        let diff = (dist - self.rest_length) / dist;
        let correction = delta.scale(diff);

        match (a_fixed, b_fixed) {
            (false, false) => {
                let half = correction.scale(F::half());
                nodes[self.a].pos = a_pos + half;
                nodes[self.b].pos = b_pos - half;
            }
            (true, false) => nodes[self.b].pos = b_pos - correction,
            (false, true) => nodes[self.a].pos = a_pos + correction,
            (true, true) => {}
        }
    }
}
