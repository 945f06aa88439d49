// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for landmark hit-testing and overlay rendering.

use criterion::{criterion_group, criterion_main, Criterion};
use facemark::landmarks::{LandmarkEditState, LandmarkSet, Point};
use facemark::media::Frame;
use facemark::overlay;
use std::hint::black_box;

fn full_face_set() -> LandmarkSet {
    // 68 points spread over a face-sized region.
    let points = (0..68)
        .map(|n| {
            let x = 100.0 + (n % 10) as f32 * 12.0;
            let y = 80.0 + (n / 10) as f32 * 15.0;
            Some(Point::new(x, y))
        })
        .collect();
    LandmarkSet::new(points)
}

fn bench_lift_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_testing");

    group.bench_function("lift_nearest_hit", |b| {
        b.iter(|| {
            let mut set = full_face_set();
            let mut edit = LandmarkEditState::new();
            black_box(edit.lift_nearest(&mut set, black_box(Point::new(124.0, 95.0)), 720))
        });
    });

    group.bench_function("lift_nearest_miss", |b| {
        let mut set = full_face_set();
        let mut edit = LandmarkEditState::new();
        b.iter(|| black_box(edit.lift_nearest(&mut set, black_box(Point::new(500.0, 500.0)), 720)));
    });

    group.finish();
}

fn bench_overlay_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay");

    let frame = Frame::from_rgba(vec![0u8; 640 * 480 * 4], 640, 480, 0);
    let set = full_face_set();

    group.bench_function("render_68_points", |b| {
        b.iter(|| black_box(overlay::render(&frame, Some(&set), true)));
    });

    group.finish();
}

criterion_group!(benches, bench_lift_nearest, bench_overlay_render);
criterion_main!(benches);
