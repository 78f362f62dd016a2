//! Benchmarks for tether rope simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use tether::*;

fn bench_pinned_rope(c: &mut Criterion) {
    c.bench_function("rope_50_segments_both_pinned_60_frames", |b| {
        b.iter(|| {
            let mut rope: RopeSimulation<f32> = RopeSimulation::new(
                RopeConfig::new().with_segment_count(50).with_iterations(10),
            );
            rope.set_anchor_providers(Vec2::new(0.0, 0.0), Vec2::new(400.0, 0.0));
            for _ in 0..60 {
                rope.update(16.0);
            }
            rope.points()
        });
    });
}

fn bench_windy_rope(c: &mut Criterion) {
    c.bench_function("rope_50_segments_free_end_wind_60_frames", |b| {
        b.iter(|| {
            let mut rope: RopeSimulation<f32> = RopeSimulation::new(
                RopeConfig::new().with_segment_count(50).with_iterations(10),
            );
            rope.set_anchor_providers(Vec2::new(0.0, 0.0), Vec2::new(400.0, 0.0));
            rope.set_pinned_ends(true, false);
            rope.set_wind(true, 120.0, 0.8);
            for _ in 0..60 {
                rope.update(16.0);
            }
            rope.points()
        });
    });
}

fn bench_high_iteration_cable(c: &mut Criterion) {
    c.bench_function("cable_200_segments_40_iterations_60_frames", |b| {
        b.iter(|| {
            let mut rope: RopeSimulation<f64> = RopeSimulation::new(
                RopeConfig::new().with_segment_count(200).with_iterations(40),
            );
            rope.set_anchor_providers(Vec2::new(0.0, 0.0), Vec2::new(1000.0, 0.0));
            for _ in 0..60 {
                rope.update(16.0);
            }
            rope.points()
        });
    });
}

criterion_group!(benches, bench_pinned_rope, bench_windy_rope, bench_high_iteration_cable);
criterion_main!(benches);
