//! Benchmarks for hit testing and event dispatch through the root

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tinsel_ui::geometry::{Point, Rect};
use tinsel_ui::input::{InputSnapshot, MouseButton};
use tinsel_ui::Root;

/// A grid of `rows * cols` panels, each holding one button.
fn grid(rows: i32, cols: i32) -> Root {
    let mut root = Root::new(Rect::from_xywh(0, 0, cols * 40, rows * 20));
    for row in 0..rows {
        for col in 0..cols {
            let panel = root.add_box(root.id(), Rect::from_xywh(col * 40, row * 20, 40, 20));
            let bounds = Rect::from_xywh(col * 40 + 2, row * 20 + 2, 36, 16);
            root.add_button(panel, bounds, "b", |_| {});
        }
    }
    root
}

fn bench_find_top(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_top");

    for side in [4, 16, 64] {
        let root = grid(side, side);
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(side * side), &root, |b, root| {
            let corner = Point::new(side * 40 - 5, side * 20 - 5);
            b.iter(|| root.tree().find_top(root.id(), black_box(corner)));
        });
    }

    group.finish();
}

fn bench_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("click");

    for side in [4, 16, 64] {
        let mut root = grid(side, side);
        let at = Point::new(side * 20, side * 10);
        let press = InputSnapshot::at(at).press_mouse(MouseButton::Left);
        let release = InputSnapshot::at(at).release_mouse(MouseButton::Left);

        group.bench_function(BenchmarkId::from_parameter(side * side), |b| {
            b.iter(|| {
                root.update(black_box(&press));
                root.update(black_box(&release))
            });
        });
    }

    group.finish();
}

fn bench_hover_sweep(c: &mut Criterion) {
    let mut root = grid(16, 16);
    let points: Vec<Point> = (0..256)
        .map(|i| Point::new((i % 16) * 40 + 10, (i / 16) * 20 + 10))
        .collect();

    c.bench_function("hover_sweep_256", |b| {
        b.iter(|| {
            for point in &points {
                root.update(&InputSnapshot::at(*point));
            }
        });
    });
}

criterion_group!(benches, bench_find_top, bench_click, bench_hover_sweep);
criterion_main!(benches);
