//! Optional render target owned by a rope.

use crate::float::Float;
use crate::vec::Vec2;

/// Something that can stroke the rope's polyline.
///
/// A rope that owns a renderer redraws it after every frame that actually
/// stepped, and releases it once on `destroy`. Hosts that draw for themselves
/// can skip this and read `points()` instead.
pub trait RopeRenderer<F: Float> {
    /// Draw the rope, start node first.
    fn draw(&mut self, points: &[Vec2<F>]);

    /// Free whatever surface or buffers this renderer holds.
    fn release(&mut self) {}
}
