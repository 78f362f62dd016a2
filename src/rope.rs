//! Rope simulation: a Verlet chain strung between two anchor providers.

use crate::anchor::AnchorProvider;
use crate::config::{RopeConfig, WindConfig};
use crate::constraint::{DistanceConstraint, PinnedEnds};
use crate::error::{ConfigError, SkipReason, StepStatus};
use crate::float::Float;
use crate::node::Node;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::render::RopeRenderer;
use crate::vec::Vec2;
use crate::wind::Wind;
use alloc::boxed::Box;
use alloc::vec::Vec as AllocVec;

/// A rope or cable whose ends follow two anchor providers.
///
/// The rope starts empty. Attaching anchors seeds the nodes on the straight
/// line between them; after that, call [`update`](Self::update) once per
/// frame with the elapsed milliseconds and read the shape back with
/// [`points`](Self::points).
///
/// ```
/// use tether::{RopeConfig, RopeSimulation, Vec2};
///
/// let mut rope: RopeSimulation<f32> = RopeSimulation::new(
///     RopeConfig::new().with_segment_count(8).with_gravity(500.0),
/// );
/// rope.set_anchor_providers(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
/// for _ in 0..60 {
///     rope.update(16.0);
/// }
/// assert_eq!(rope.points().len(), 9);
/// ```
pub struct RopeSimulation<F: Float> {
    config: RopeConfig<F>,
    wind: Wind<F>,
    pins: PinnedEnds,
    nodes: AllocVec<Node<F>>,
    constraints: AllocVec<DistanceConstraint<F>>,
    start_anchor: Option<Box<dyn AnchorProvider<F>>>,
    end_anchor: Option<Box<dyn AnchorProvider<F>>>,
    renderer: Option<Box<dyn RopeRenderer<F>>>,
    /// A reseed was requested while an anchor was unavailable.
    needs_reseed: bool,
    destroyed: bool,
}

impl<F: Float> RopeSimulation<F> {
    /// Build a rope from `config`, pulling out-of-range values back into range.
    pub fn new(config: RopeConfig<F>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("rope config adjusted: {}", err);
                config.sanitized()
            }
        };
        RopeSimulation {
            config,
            wind: Wind::default(),
            pins: PinnedEnds::both(),
            nodes: AllocVec::new(),
            constraints: AllocVec::new(),
            start_anchor: None,
            end_anchor: None,
            renderer: None,
            needs_reseed: false,
            destroyed: false,
        }
    }

    /// Build a rope, rejecting an invalid config instead of adjusting it.
    pub fn try_new(config: RopeConfig<F>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Attach the anchor providers and seed the nodes between them.
    ///
    /// If either provider has no position yet, seeding is retried by the
    /// next [`update`](Self::update).
    pub fn set_anchor_providers<S, E>(&mut self, start: S, end: E)
    where
        S: AnchorProvider<F> + 'static,
        E: AnchorProvider<F> + 'static,
    {
        self.start_anchor = Some(Box::new(start));
        self.end_anchor = Some(Box::new(end));
        self.reset_nodes();
    }

    pub fn set_gravity(&mut self, gravity: F) {
        if gravity.is_finite() {
            self.config.gravity = gravity;
        } else {
            log::warn!("ignoring non-finite gravity {:?}", gravity);
        }
    }

    /// Clamped to [0, 1].
    pub fn set_damping(&mut self, damping: F) {
        self.config.damping = damping.clamp(F::zero(), F::one());
    }

    /// At least one iteration always runs.
    pub fn set_iterations(&mut self, iterations: usize) {
        self.config.iterations = iterations.max(1);
    }

    /// Largest step in seconds a single frame may integrate.
    pub fn set_max_time_step(&mut self, seconds: F) {
        if seconds.is_finite() && seconds > F::zero() {
            self.config.max_time_step = seconds;
        } else {
            log::warn!("ignoring max time step {:?}", seconds);
        }
    }

    /// Replace the per-segment rest lengths and reseed.
    ///
    /// An empty slice falls back to `segment_count` uniform segments. Old node
    /// positions are discarded, since the node count may have changed.
    pub fn set_segment_lengths(&mut self, lengths: &[F]) {
        self.config.segment_lengths = lengths.to_vec();
        self.reset_nodes();
    }

    /// Switch to `count` uniform segments and reseed.
    pub fn set_segment_count(&mut self, count: usize) {
        self.config.segment_count = count.max(1);
        self.config.segment_lengths.clear();
        self.reset_nodes();
    }

    /// Choose which ends are hard-pinned to their anchors. Takes effect next frame.
    pub fn set_pinned_ends(&mut self, pin_start: bool, pin_end: bool) {
        self.pins = PinnedEnds::new(pin_start, pin_end);
    }

    /// Configure the lateral wind. Accumulated wind time is kept.
    pub fn set_wind(&mut self, enabled: bool, amplitude: F, frequency: F) {
        let wind = WindConfig::new(enabled, amplitude, frequency);
        if let Err(err) = wind.validate() {
            log::warn!("wind disabled: {}", err);
            self.wind.config = WindConfig::calm();
            return;
        }
        self.wind.config = wind;
    }

    /// Hand over a render target, redrawn after every stepped frame.
    pub fn set_renderer<R>(&mut self, renderer: R)
    where
        R: RopeRenderer<F> + 'static,
    {
        self.renderer = Some(Box::new(renderer));
    }

    /// Take the render target back without releasing it.
    pub fn take_renderer(&mut self) -> Option<Box<dyn RopeRenderer<F>>> {
        self.renderer.take()
    }

    /// Reseed all nodes along the line between the current anchor positions.
    ///
    /// Returns `false`, leaving the rope as it was, if the anchors are not
    /// available. The reseed is then retried by the next
    /// [`update`](Self::update) that finds both anchors.
    pub fn reset_nodes(&mut self) -> bool {
        self.reseed(&mut NoOpStepObserver)
    }

    fn reseed<O: StepObserver>(&mut self, observer: &mut O) -> bool {
        if self.destroyed {
            return false;
        }
        let (start, end) = match self.anchor_positions() {
            Ok(anchors) => anchors,
            Err(reason) => {
                log::trace!("rope reseed deferred: {}", reason);
                self.needs_reseed = true;
                return false;
            }
        };
        self.needs_reseed = false;

        let rest_lengths = self.rest_lengths_between(start, end);
        let mut total = rest_lengths.iter().fold(F::zero(), |acc, &l| acc + l);
        if !(total > F::zero()) {
            total = F::one();
        }

        self.nodes.clear();
        self.constraints.clear();
        self.nodes.reserve(rest_lengths.len() + 1);
        self.constraints.reserve(rest_lengths.len());

        self.nodes.push(Node::at_rest(start));
        let mut cumulative = F::zero();
        for (i, &rest) in rest_lengths.iter().enumerate() {
            cumulative = cumulative + rest;
            self.nodes.push(Node::at_rest(start.lerp(end, cumulative / total)));
            self.constraints.push(DistanceConstraint::new(i, i + 1, rest));
        }

        self.pins.apply(&mut self.nodes, start, end, true);

        log::debug!(
            "rope seeded: {} nodes, rest length {:?}",
            self.nodes.len(),
            self.total_rest_length()
        );
        observer.on_reset(self.nodes.len());
        true
    }

    fn rest_lengths_between(&self, start: Vec2<F>, end: Vec2<F>) -> AllocVec<F> {
        if self.config.segment_lengths.is_empty() {
            let count = self.config.effective_segment_count();
            let length = start.distance(end) / F::from_usize(count);
            return alloc::vec![length; count];
        }

        let mut adjusted = 0usize;
        let lengths: AllocVec<F> = self
            .config
            .segment_lengths
            .iter()
            .map(|&l| {
                if l.is_finite() && l > F::zero() {
                    l
                } else {
                    if l != F::zero() {
                        adjusted += 1;
                    }
                    F::zero()
                }
            })
            .collect();
        if adjusted > 0 {
            log::warn!("{} segment lengths were negative or non-finite, using 0", adjusted);
        }
        lengths
    }

    fn anchor_positions(&mut self) -> Result<(Vec2<F>, Vec2<F>), SkipReason> {
        let (Some(start), Some(end)) = (self.start_anchor.as_mut(), self.end_anchor.as_mut()) else {
            return Err(SkipReason::MissingProviders);
        };
        match ((**start).position(), (**end).position()) {
            (Some(s), Some(e)) if s.is_finite() && e.is_finite() => Ok((s, e)),
            _ => Err(SkipReason::AnchorUnavailable),
        }
    }

    /// Advance the rope by `delta_ms` milliseconds of wall time.
    pub fn update(&mut self, delta_ms: F) -> StepStatus {
        self.update_with_observer(delta_ms, &mut NoOpStepObserver)
    }

    pub fn update_with_observer<O: StepObserver>(
        &mut self,
        delta_ms: F,
        observer: &mut O,
    ) -> StepStatus {
        if self.destroyed {
            return Self::skip(SkipReason::Destroyed, observer);
        }
        if self.start_anchor.is_none() || self.end_anchor.is_none() {
            return Self::skip(SkipReason::MissingProviders, observer);
        }
        if (self.nodes.is_empty() || self.needs_reseed) && !self.reseed(observer) {
            return Self::skip(SkipReason::AnchorUnavailable, observer);
        }
        let (start, end) = match self.anchor_positions() {
            Ok(anchors) => anchors,
            Err(reason) => return Self::skip(reason, observer),
        };

        let dt = (delta_ms / F::from_f32(1000.0))
            .max(F::zero())
            .min(self.config.max_time_step);
        let dt_sq = dt * dt;
        let gravity = self.config.gravity;
        let damping = self.config.damping;
        let wind_phase = self.wind.advance(dt);

        let count = self.nodes.len();
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if self.pins.is_pinned(i, count) {
                continue;
            }
            let wind_x = match wind_phase {
                Some(phase) => self.wind.acceleration(phase, i),
                None => F::zero(),
            };
            node.integrate(Vec2::new(wind_x, gravity), dt_sq, damping);
        }
        observer.on_integrate();

        self.pins.apply(&mut self.nodes, start, end, false);

        for i in 0..self.config.iterations {
            for c in self.constraints.iter() {
                let a_fixed = self.pins.is_pinned(c.a, count);
                let b_fixed = self.pins.is_pinned(c.b, count);
                c.solve(&mut self.nodes, a_fixed, b_fixed);
            }
            self.pins.apply(&mut self.nodes, start, end, false);
            observer.on_constraint_iteration(i);
        }

        observer.on_step_complete();

        if self.renderer.is_some() {
            let points = self.points();
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.draw(&points);
            }
        }
        StepStatus::Stepped
    }

    fn skip<O: StepObserver>(reason: SkipReason, observer: &mut O) -> StepStatus {
        log::trace!("rope frame skipped: {}", reason);
        observer.on_frame_skipped(reason);
        StepStatus::Skipped(reason)
    }

    /// Release the renderer and drop all state. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(mut renderer) = self.renderer.take() {
            renderer.release();
        }
        self.nodes.clear();
        self.constraints.clear();
        self.start_anchor = None;
        self.end_anchor = None;
        self.needs_reseed = false;
        self.wind.reset_time();
        self.destroyed = true;
        log::debug!("rope destroyed");
    }

    /// Copy of the node positions, start end first.
    pub fn points(&self) -> AllocVec<Vec2<F>> {
        self.nodes.iter().map(|n| n.pos).collect()
    }

    pub fn node(&self, index: usize) -> Option<Vec2<F>> {
        self.nodes.get(index).map(|n| n.pos)
    }

    pub fn previous_node(&self, index: usize) -> Option<Vec2<F>> {
        self.nodes.get(index).map(|n| n.prev_pos)
    }

    /// Displacement of node `index` over the last frame.
    pub fn velocity(&self, index: usize) -> Option<Vec2<F>> {
        self.nodes.get(index).map(|n| n.velocity_raw())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn rest_lengths(&self) -> AllocVec<F> {
        self.constraints.iter().map(|c| c.rest_length).collect()
    }

    pub fn total_rest_length(&self) -> F {
        self.constraints.iter().fold(F::zero(), |acc, c| acc + c.rest_length)
    }

    /// Sum of the current distances between consecutive nodes.
    pub fn current_length(&self) -> F {
        self.nodes
            .windows(2)
            .fold(F::zero(), |acc, w| acc + w[0].pos.distance(w[1].pos))
    }

    pub fn pinned_ends(&self) -> PinnedEnds {
        self.pins
    }

    pub fn wind(&self) -> &WindConfig<F> {
        &self.wind.config
    }

    /// Seconds of wind accumulated since creation.
    pub fn wind_time(&self) -> F {
        self.wind.time()
    }

    pub fn config(&self) -> &RopeConfig<F> {
        &self.config
    }

    /// Nodes have been seeded and the rope has a shape.
    pub fn is_initialized(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
