// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use understory_pinch_zoom::{GestureCoordinator, LayoutConstraints, ZoomConfig};

fn laid_out() -> GestureCoordinator {
    let mut view = GestureCoordinator::new(Size::new(4_000.0, 12_000.0), ZoomConfig::default());
    view.measured_size(LayoutConstraints::at_most(Size::new(800.0, 600.0)));
    view.set_transform(0.5, Vec2::new(500.0, 2_000.0));
    view
}

fn bench_fling_to_rest(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinch_zoom/fling_to_rest");

    // Frames until rest grow with the log of the initial speed.
    for speed in [0.5_f64, 5.0, 50.0] {
        group.bench_with_input(BenchmarkId::from_parameter(speed), &speed, |b, &speed| {
            b.iter_batched(
                laid_out,
                |mut view| {
                    view.on_fling_start(Vec2::new(speed * 0.3, -speed));
                    while view.is_animating() {
                        view.tick(16.0);
                    }
                    black_box(view.current_transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_pinch_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinch_zoom/pinch_updates");

    for updates in [16usize, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(updates),
            &updates,
            |b, &updates| {
                b.iter_batched(
                    laid_out,
                    |mut view| {
                        view.on_pinch_begin(Point::new(400.0, 300.0));
                        for i in 0..updates {
                            let wobble = if i % 2 == 0 { 1.01 } else { 0.995 };
                            let focal = Point::new(400.0 + (i % 7) as f64, 300.0);
                            view.on_pinch_update(wobble, focal);
                        }
                        view.on_pinch_end();
                        black_box(view.current_transform());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_double_tap_animation(c: &mut Criterion) {
    c.bench_function("pinch_zoom/double_tap_animation", |b| {
        b.iter_batched(
            laid_out,
            |mut view| {
                view.on_double_tap(Point::new(200.0, 150.0));
                while view.is_animating() {
                    view.tick(16.0);
                }
                black_box(view.current_transform());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_fling_to_rest,
    bench_pinch_stream,
    bench_double_tap_animation
);
criterion_main!(benches);
