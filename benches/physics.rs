//! Benchmarks for sledline simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use sledline::*;

/// A long zig-zag track of solid lines with an acceleration line every tenth segment.
fn long_track() -> Track<f64> {
    let mut track: Track<f64> = Track::new();
    let mut prev = Vec2::new(0.0, 100.0);
    for i in 1..=200 {
        let next = Vec2::new(i as f64 * 40.0, 100.0 + (i % 7) as f64 * 12.0 + i as f64 * 8.0);
        let ink = if i % 10 == 0 { Ink::Acceleration } else { Ink::Solid };
        let _ = track.add_line(prev, next, ink);
        prev = next;
    }
    track
}

fn bench_world_steps(c: &mut Criterion) {
    let track = long_track();
    c.bench_function("world_600_steps", |b| {
        b.iter(|| {
            let mut world = World::with_track(track.clone(), WorldConfig::new());
            for _ in 0..600 {
                world.tick();
            }
            world.rider().anchor()
        });
    });
}

fn bench_cells_of(c: &mut Criterion) {
    let grid: LineGrid<f64> = LineGrid::new(50.0).unwrap();
    let segment = Segment::new(Vec2::new(-1234.5, 77.0), Vec2::new(4321.0, -987.25));
    c.bench_function("grid_cells_of_long_diagonal", |b| {
        b.iter(|| grid.cells_of(&segment));
    });
}

fn bench_lines_near(c: &mut Criterion) {
    let track = long_track();
    let particle = Particle { pos: Vec2::new(2010.0, 650.0), prev_pos: Vec2::new(1990.0, 620.0), mass: 1.0 };
    c.bench_function("grid_lines_near", |b| {
        b.iter(|| track.grid().lines_near(&particle));
    });
}

criterion_group!(benches, bench_world_steps, bench_cells_of, bench_lines_near);
criterion_main!(benches);
