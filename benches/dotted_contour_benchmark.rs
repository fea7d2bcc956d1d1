use criterion::{criterion_group, criterion_main, Criterion};
use netgeom::draw::RecordingDrawer;
use netgeom::geom::{Position, PositionVector};
use netgeom::geometry::drawing::draw_dotted_contour_shape;
use netgeom::geometry::{DottedContourBuilder, DottedContourType};
use netgeom::settings::VisualizationSettings;
use std::hint::black_box;

fn winding_lane() -> PositionVector {
    (0..50)
        .map(|i| {
            let x = f64::from(i) * 8.0;
            Position::new(x, 20.0 * (x / 40.0).sin())
        })
        .collect()
}

fn dotted_contour_benchmark_1(c: &mut Criterion) {
    let settings = VisualizationSettings::default();
    let lane = winding_lane();
    c.bench_function("build dotted contour, 50 points", |b| {
        b.iter(|| DottedContourBuilder::from_shape(&settings, black_box(&lane), false))
    });
}

fn dotted_contour_benchmark_2(c: &mut Criterion) {
    let settings = VisualizationSettings::default();
    let lane = winding_lane();
    c.bench_function("draw two-sided dotted contour, 50 points", |b| {
        b.iter(|| {
            let mut drawer = RecordingDrawer::new();
            draw_dotted_contour_shape(
                &mut drawer,
                &settings,
                DottedContourType::Inspect,
                black_box(&lane),
                1.6,
                1.0,
                true,
                true,
                0.0,
            );
            drawer
        })
    });
}

criterion_group!(dotted_contour_benches, dotted_contour_benchmark_1, dotted_contour_benchmark_2);
criterion_main!(dotted_contour_benches);
