use std::cell::Cell;
use std::rc::Rc;

use tether::{
    AnchorHandle, RopeConfig, RopeRenderer, RopeSimulation, SkipReason, StepObserver, StepStatus,
    Vec2,
};

#[derive(Default)]
struct RenderLog {
    draws: Cell<usize>,
    last_len: Cell<usize>,
    releases: Cell<usize>,
}

struct CountingRenderer(Rc<RenderLog>);

impl RopeRenderer<f32> for CountingRenderer {
    fn draw(&mut self, points: &[Vec2<f32>]) {
        self.0.draws.set(self.0.draws.get() + 1);
        self.0.last_len.set(points.len());
    }

    fn release(&mut self) {
        self.0.releases.set(self.0.releases.get() + 1);
    }
}

#[derive(Default)]
struct CountingObserver {
    resets: usize,
    integrations: usize,
    iterations: usize,
    completed: usize,
    skipped: Vec<SkipReason>,
}

impl StepObserver for CountingObserver {
    fn on_reset(&mut self, _node_count: usize) {
        self.resets += 1;
    }
    fn on_integrate(&mut self) {
        self.integrations += 1;
    }
    fn on_constraint_iteration(&mut self, _iteration: usize) {
        self.iterations += 1;
    }
    fn on_step_complete(&mut self) {
        self.completed += 1;
    }
    fn on_frame_skipped(&mut self, reason: SkipReason) {
        self.skipped.push(reason);
    }
}

fn rope() -> RopeSimulation<f32> {
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(5));
    rope.set_anchor_providers(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0));
    rope
}

#[test]
fn update_without_providers_is_skipped() {
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new());
    assert_eq!(rope.update(16.0), StepStatus::Skipped(SkipReason::MissingProviders));
    assert!(!rope.is_initialized());
    assert!(!rope.reset_nodes());
}

#[test]
fn missing_anchor_freezes_last_shape() {
    let start = AnchorHandle::new(Vec2::new(0.0f32, 0.0));
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(5));
    rope.set_anchor_providers(start.clone(), Vec2::new(50.0, 0.0));
    rope.set_wind(true, 100.0, 1.0);
    for _ in 0..20 {
        rope.update(16.0);
    }
    let shape = rope.points();
    let previous = (0..rope.node_count()).map(|i| rope.previous_node(i)).collect::<Vec<_>>();
    let wind_time = rope.wind_time();

    start.clear();
    for _ in 0..5 {
        assert_eq!(rope.update(16.0), StepStatus::Skipped(SkipReason::AnchorUnavailable));
    }
    assert_eq!(rope.points(), shape);
    assert_eq!(
        (0..rope.node_count()).map(|i| rope.previous_node(i)).collect::<Vec<_>>(),
        previous,
    );
    assert_eq!(rope.wind_time(), wind_time);

    start.set(Vec2::new(0.0, 0.0));
    assert!(rope.update(16.0).is_stepped());
}

#[test]
fn length_change_while_anchor_missing_reseeds_on_return() {
    let start = AnchorHandle::new(Vec2::new(0.0f32, 0.0));
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(4));
    rope.set_anchor_providers(start.clone(), Vec2::new(100.0, 0.0));
    for _ in 0..5 {
        rope.update(16.0);
    }
    assert_eq!(rope.rest_lengths(), vec![25.0; 4]);

    start.clear();
    rope.set_segment_lengths(&[10.0, 10.0, 10.0]);
    assert_eq!(rope.node_count(), 5);
    assert_eq!(rope.update(16.0), StepStatus::Skipped(SkipReason::AnchorUnavailable));

    start.set(Vec2::new(0.0, 0.0));
    for _ in 0..10 {
        assert!(rope.update(16.0).is_stepped());
    }
    assert_eq!(rope.node_count(), 4);
    assert_eq!(rope.rest_lengths(), vec![10.0; 3]);
    assert_eq!(rope.config().segment_lengths, vec![10.0; 3]);
}

#[test]
fn segment_count_change_while_anchor_missing_reseeds_on_return() {
    let start = AnchorHandle::new(Vec2::new(0.0f32, 0.0));
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(4));
    rope.set_anchor_providers(start.clone(), Vec2::new(100.0, 0.0));
    rope.update(16.0);

    start.clear();
    rope.set_segment_count(10);
    rope.update(16.0);
    start.set(Vec2::new(0.0, 0.0));
    assert!(rope.update(16.0).is_stepped());
    assert_eq!(rope.node_count(), 11);
    assert_eq!(rope.segment_count(), 10);
}

#[test]
fn new_providers_without_position_reseed_once_available() {
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(4));
    rope.set_anchor_providers(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
    rope.update(16.0);
    assert_eq!(rope.rest_lengths(), vec![25.0; 4]);

    let start: AnchorHandle<f32> = AnchorHandle::empty();
    rope.set_anchor_providers(start.clone(), Vec2::new(200.0, 0.0));
    assert_eq!(rope.update(16.0), StepStatus::Skipped(SkipReason::AnchorUnavailable));

    start.set(Vec2::new(0.0, 0.0));
    assert!(rope.update(16.0).is_stepped());
    assert_eq!(rope.rest_lengths(), vec![50.0; 4]);
    assert_eq!(rope.node(0), Some(Vec2::new(0.0, 0.0)));
    for i in 1..rope.node_count() {
        let node = rope.node(i).unwrap_or_default();
        assert!(node.x >= 0.0 && node.x <= 200.0, "node {} at {:?}", i, node);
    }
}

#[test]
fn renderer_redrawn_on_stepped_frames_only() {
    let log = Rc::new(RenderLog::default());
    let start = AnchorHandle::new(Vec2::new(0.0f32, 0.0));
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(5));
    rope.set_anchor_providers(start.clone(), Vec2::new(50.0, 0.0));
    rope.set_renderer(CountingRenderer(log.clone()));

    rope.update(16.0);
    rope.update(16.0);
    start.clear();
    rope.update(16.0);

    assert_eq!(log.draws.get(), 2);
    assert_eq!(log.last_len.get(), 6);
    assert_eq!(log.releases.get(), 0);
}

#[test]
fn destroy_releases_and_clears_once() {
    let log = Rc::new(RenderLog::default());
    let mut rope = rope();
    rope.set_renderer(CountingRenderer(log.clone()));
    rope.set_wind(true, 100.0, 1.0);
    rope.update(16.0);

    rope.destroy();
    assert!(rope.is_destroyed());
    assert_eq!(log.releases.get(), 1);
    assert!(rope.points().is_empty());
    assert_eq!(rope.node_count(), 0);
    assert_eq!(rope.segment_count(), 0);
    assert_eq!(rope.wind_time(), 0.0);

    rope.destroy();
    assert_eq!(log.releases.get(), 1);

    assert_eq!(rope.update(16.0), StepStatus::Skipped(SkipReason::Destroyed));
    assert!(!rope.reset_nodes());
    assert!(rope.points().is_empty());
    assert_eq!(log.draws.get(), 1);
}

#[test]
fn taken_renderer_is_not_released() {
    let log = Rc::new(RenderLog::default());
    let mut rope = rope();
    rope.set_renderer(CountingRenderer(log.clone()));
    let renderer = rope.take_renderer();
    assert!(renderer.is_some());
    rope.destroy();
    assert_eq!(log.releases.get(), 0);
}

#[test]
fn observer_sees_each_phase() {
    let anchor = AnchorHandle::<f32>::empty();
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(3).with_iterations(7));
    rope.set_anchor_providers(anchor.clone(), Vec2::new(30.0, 0.0));
    let mut observer = CountingObserver::default();

    rope.update_with_observer(16.0, &mut observer);
    anchor.set(Vec2::new(0.0, 0.0));
    rope.update_with_observer(16.0, &mut observer);
    rope.update_with_observer(16.0, &mut observer);

    assert_eq!(observer.skipped, vec![SkipReason::AnchorUnavailable]);
    assert_eq!(observer.resets, 1);
    assert_eq!(observer.integrations, 2);
    assert_eq!(observer.iterations, 14);
    assert_eq!(observer.completed, 2);
}

#[test]
fn dragged_anchor_pulls_rope_along() {
    let handle = AnchorHandle::new(Vec2::new(0.0f32, 0.0));
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(6).with_gravity(0.0));
    rope.set_anchor_providers(handle.clone(), Vec2::new(60.0, 0.0));
    rope.set_pinned_ends(true, false);

    for frame in 0..120 {
        handle.set(Vec2::new(-(frame as f32), 0.0));
        rope.update(16.0);
    }

    let last = rope.node(6).unwrap();
    assert!(last.x < 55.0, "Free end should have been dragged left, at {:?}", last);
    assert_eq!(rope.node(0), Some(Vec2::new(-119.0, 0.0)));
}

#[test]
fn closure_providers_are_accepted() {
    let ticks = Rc::new(Cell::new(0.0f32));
    let source = ticks.clone();
    let mut rope: RopeSimulation<f32> = RopeSimulation::new(RopeConfig::new().with_segment_count(4));
    rope.set_anchor_providers(
        move || Some(Vec2::new(source.get(), 0.0)),
        || Some(Vec2::new(40.0f32, 0.0)),
    );
    assert!(rope.is_initialized());

    ticks.set(5.0);
    rope.update(16.0);
    assert_eq!(rope.node(0), Some(Vec2::new(5.0, 0.0)));
}
