//! Verlet rope and cable simulation between two moving anchors.
//!
//! `tether` computes the shape of a flexible line (rope, cable, fishing line,
//! chain) whose ends follow externally supplied anchor positions. It is meant
//! to be stepped once per frame by a host loop and read back by a renderer.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Distance constraints**: Iterative relaxation with a tunable iteration count
//! - **Anchors**: Closures, fixed points or shared handles drive each end
//! - **Pinning**: Either end can be hard-pinned or left free to swing
//! - **Wind**: Travelling-wave lateral oscillation
//! - **Stable under stalls**: Per-frame time step is clamped
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod node;
pub mod constraint;
pub mod wind;
pub mod anchor;
pub mod render;
pub mod rope;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use node::Node;
pub use constraint::{DistanceConstraint, PinnedEnds};
pub use wind::Wind;
pub use anchor::{AnchorProvider, AnchorHandle};
pub use render::RopeRenderer;
pub use rope::RopeSimulation;
pub use config::{RopeConfig, WindConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{ConfigError, SkipReason, StepStatus};
