use std::cell::RefCell;
use std::rc::Rc;

use tether::{AnchorHandle, RopeConfig, RopeRenderer, RopeSimulation, Vec2};
use wasm_bindgen::prelude::*;

/// Writes each frame as flat [x0, y0, x1, y1, ...] for the JS canvas side.
struct FlatBufferRenderer {
    buffer: Rc<RefCell<Vec<f32>>>,
}

impl RopeRenderer<f32> for FlatBufferRenderer {
    fn draw(&mut self, points: &[Vec2<f32>]) {
        let mut out = self.buffer.borrow_mut();
        out.clear();
        for p in points {
            out.push(p.x);
            out.push(p.y);
        }
    }

    fn release(&mut self) {
        self.buffer.borrow_mut().clear();
    }
}

// ---- Rope Demo ----

/// Rope between two draggable handles.
#[wasm_bindgen]
pub struct RopeDemo {
    rope: RopeSimulation<f32>,
    start: AnchorHandle<f32>,
    end: AnchorHandle<f32>,
    buffer: Rc<RefCell<Vec<f32>>>,
}

#[wasm_bindgen]
impl RopeDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(segments: usize) -> Self {
        let start = AnchorHandle::new(Vec2::new(100.0f32, 50.0));
        let end = AnchorHandle::new(Vec2::new(500.0, 50.0));
        let buffer = Rc::new(RefCell::new(Vec::new()));

        let mut rope = RopeSimulation::new(
            RopeConfig::new()
                .with_segment_count(segments)
                .with_gravity(900.0)
                .with_iterations(12)
                .with_damping(0.985),
        );
        rope.set_anchor_providers(start.clone(), end.clone());
        rope.set_renderer(FlatBufferRenderer { buffer: buffer.clone() });

        RopeDemo { rope, start, end, buffer }
    }

    pub fn update(&mut self, dt_ms: f32) {
        self.rope.update(dt_ms);
    }

    pub fn move_start(&mut self, x: f32, y: f32) {
        self.start.set(Vec2::new(x, y));
    }

    pub fn move_end(&mut self, x: f32, y: f32) {
        self.end.set(Vec2::new(x, y));
    }

    /// Handle grabbed off-canvas: freeze the rope until it comes back.
    pub fn release_start(&mut self) {
        self.start.clear();
    }

    pub fn set_pinned(&mut self, start: bool, end: bool) {
        self.rope.set_pinned_ends(start, end);
    }

    pub fn set_wind(&mut self, enabled: bool, amplitude: f32, frequency: f32) {
        self.rope.set_wind(enabled, amplitude, frequency);
    }

    pub fn set_segment_lengths(&mut self, lengths: Vec<f32>) {
        self.rope.set_segment_lengths(&lengths);
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.rope.set_gravity(gravity);
    }

    pub fn set_iterations(&mut self, iterations: usize) {
        self.rope.set_iterations(iterations);
    }

    /// Returns flat [x0, y0, x1, y1, ...] positions of the last drawn frame.
    pub fn positions(&self) -> Vec<f32> {
        self.buffer.borrow().clone()
    }

    pub fn node_count(&self) -> usize {
        self.rope.node_count()
    }

    pub fn destroy(&mut self) {
        self.rope.destroy();
    }
}

// ---- Fishing Line Demo ----

/// Line hanging from a rod tip that bobs on its own; the hook end is free.
#[wasm_bindgen]
pub struct FishingLineDemo {
    rope: RopeSimulation<f32>,
    rod_angle: Rc<RefCell<f32>>,
}

#[wasm_bindgen]
impl FishingLineDemo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let rod_angle = Rc::new(RefCell::new(0.0f32));
        let angle = rod_angle.clone();
        let pivot = Vec2::new(120.0f32, 380.0);
        let rod_length = 220.0f32;

        let mut rope = RopeSimulation::new(
            RopeConfig::new()
                .with_segment_lengths(&[12.0; 24])
                .with_gravity(600.0)
                .with_iterations(16),
        );
        rope.set_anchor_providers(
            move || {
                let a = *angle.borrow() - 0.9;
                Some(Vec2::new(pivot.x + a.cos() * rod_length, pivot.y + a.sin() * rod_length))
            },
            Vec2::new(500.0, 300.0),
        );
        rope.set_pinned_ends(true, false);
        rope.set_wind(true, 60.0, 0.4);

        FishingLineDemo { rope, rod_angle }
    }

    /// Tilt the rod, in radians from its rest angle.
    pub fn set_rod_angle(&mut self, angle: f32) {
        *self.rod_angle.borrow_mut() = angle;
    }

    pub fn update(&mut self, dt_ms: f32) {
        self.rope.update(dt_ms);
    }

    pub fn positions(&self) -> Vec<f32> {
        let pos = self.rope.points();
        let mut out = Vec::with_capacity(pos.len() * 2);
        for p in &pos {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.rope.node_count()
    }
}

impl Default for FishingLineDemo {
    fn default() -> Self {
        Self::new()
    }
}
