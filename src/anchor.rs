//! Anchor providers: where each end of the rope wants to be this frame.

use crate::float::Float;
use crate::vec::Vec2;
use alloc::rc::Rc;
use core::cell::Cell;

/// Source of a target position for one end of the rope.
///
/// Returning `None` means "not ready this frame"; the rope then skips the
/// frame instead of guessing. Providers are queried once per `update` and once
/// per reseed, and must return the same value if asked twice in one frame.
///
/// Closures, fixed points and [`AnchorHandle`]s all implement this:
/// ```
/// use tether::{AnchorHandle, AnchorProvider, Vec2};
///
/// let mut fixed = Vec2::new(0.0f32, 0.0);
/// assert_eq!(fixed.position(), Some(Vec2::new(0.0, 0.0)));
///
/// let mut t = 0.0f32;
/// let mut swinging = move || { t += 1.0; Some(Vec2::new(t, 0.0)) };
/// assert_eq!(swinging.position(), Some(Vec2::new(1.0, 0.0)));
///
/// let handle = AnchorHandle::<f32>::empty();
/// let mut reader = handle.clone();
/// assert_eq!(reader.position(), None);
/// handle.set(Vec2::new(3.0, 4.0));
/// assert_eq!(reader.position(), Some(Vec2::new(3.0, 4.0)));
/// ```
pub trait AnchorProvider<F: Float> {
    fn position(&mut self) -> Option<Vec2<F>>;
}

impl<F: Float, T> AnchorProvider<F> for T
where
    T: FnMut() -> Option<Vec2<F>>,
{
    fn position(&mut self) -> Option<Vec2<F>> {
        self()
    }
}

/// A fixed anchor.
impl<F: Float> AnchorProvider<F> for Vec2<F> {
    fn position(&mut self) -> Option<Vec2<F>> {
        Some(*self)
    }
}

/// Shared, host-writable anchor position.
///
/// Clones share the same cell, so the host keeps one clone (a drag handle,
/// an animation bone follower) and hands another to the rope.
#[derive(Clone, Debug, Default)]
pub struct AnchorHandle<F: Float> {
    cell: Rc<Cell<Option<Vec2<F>>>>,
}

impl<F: Float> AnchorHandle<F> {
    pub fn new(pos: Vec2<F>) -> Self {
        AnchorHandle { cell: Rc::new(Cell::new(Some(pos))) }
    }

    /// A handle with no position yet.
    pub fn empty() -> Self {
        AnchorHandle { cell: Rc::new(Cell::new(None)) }
    }

    pub fn set(&self, pos: Vec2<F>) {
        self.cell.set(Some(pos));
    }

    /// Mark the anchor unavailable until the next `set`.
    pub fn clear(&self) {
        self.cell.set(None);
    }

    pub fn get(&self) -> Option<Vec2<F>> {
        self.cell.get()
    }
}

impl<F: Float> AnchorProvider<F> for AnchorHandle<F> {
    fn position(&mut self) -> Option<Vec2<F>> {
        self.cell.get()
    }
}
