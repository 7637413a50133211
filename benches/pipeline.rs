use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use painter3d::colors::Color;
use painter3d::display::{DrawingSurface, RecordingSurface};
use painter3d::input::InputState;
use painter3d::math::vec2::Vec2;
use painter3d::math::vec3::Vec3;
use painter3d::mesh::Mesh;
use painter3d::render::Canvas;
use painter3d::triangle::Triangle;
use painter3d::{Engine, RenderConfig};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn small_triangle() -> [Vec2; 3] {
    [
        Vec2::new(100.0, 100.0),
        Vec2::new(120.0, 100.0),
        Vec2::new(110.0, 120.0),
    ]
}

fn medium_triangle() -> [Vec2; 3] {
    [
        Vec2::new(100.0, 100.0),
        Vec2::new(300.0, 100.0),
        Vec2::new(200.0, 300.0),
    ]
}

fn large_triangle() -> [Vec2; 3] {
    [
        Vec2::new(50.0, 50.0),
        Vec2::new(750.0, 100.0),
        Vec2::new(400.0, 550.0),
    ]
}

fn benchmark_canvas_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas_triangle");
    let red = Color::rgb(1.0, 0.0, 0.0);

    for (name, points) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("fill", name), &points, |b, pts| {
            let mut canvas = Canvas::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| canvas.fill_triangle(black_box(*pts), red));
        });

        group.bench_with_input(BenchmarkId::new("fill_and_stroke", name), &points, |b, pts| {
            let mut canvas = Canvas::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| canvas.draw_triangle(black_box(*pts), red));
        });
    }

    group.finish();
}

/// A flat grid of `n * n` quads facing the camera.
fn grid_mesh(n: usize) -> Mesh {
    let step = 2.0 / n as f32;
    Mesh::from_triangles((0..n).flat_map(|row| {
        (0..n).flat_map(move |col| {
            let x = -1.0 + col as f32 * step;
            let y = -1.0 + row as f32 * step;
            let a = Vec3::new(x, y, 0.0);
            let b = Vec3::new(x + step, y, 0.0);
            let c = Vec3::new(x, y + step, 0.0);
            let d = Vec3::new(x + step, y + step, 0.0);
            [Triangle::new(a, b, c), Triangle::new(b, d, c)]
        })
    }))
}

fn benchmark_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let input = InputState::new();

    group.bench_function("cube_to_canvas", |b| {
        let mut engine = Engine::new(Mesh::unit_cube(), RenderConfig::default());
        let mut canvas = Canvas::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| engine.update(black_box(0.016), &input, &mut canvas));
    });

    for n in [8, 32] {
        group.bench_with_input(BenchmarkId::new("grid_pipeline_only", n * n * 2), &n, |b, &n| {
            let mut engine = Engine::new(grid_mesh(n), RenderConfig::default());
            let mut surface = RecordingSurface::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                surface.clear();
                engine.update(black_box(0.016), &input, &mut surface)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_canvas_triangle, benchmark_frame);
criterion_main!(benches);
