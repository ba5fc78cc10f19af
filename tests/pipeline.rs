use approx::assert_abs_diff_eq;
use soft3d::prelude::*;
use soft3d::render::rasterize_vertices;
use soft3d::DepthColorBuffer;

const SIZE: u32 = 256;

/// Model-space vertex that lands exactly on screen pixel (x, y) under the
/// identity transform in a `SIZE` x `SIZE` viewport.
fn at(x: i32, y: i32, z: f32, u: f32, v: f32) -> Vertex {
    Vertex::new(
        x as f32 / SIZE as f32 - 0.5,
        y as f32 / SIZE as f32 - 0.5,
        z,
        u,
        v,
    )
}

/// Signed distance from (px, py) to the nearest edge, positive inside.
fn edge_distance(points: [(f32, f32); 3], px: f32, py: f32) -> f32 {
    let [(ax, ay), (bx, by), (cx, cy)] = points;
    let orientation = ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)).signum();
    (0..3)
        .map(|i| {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % 3];
            let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
            orientation * ((x1 - x0) * (py - y0) - (y1 - y0) * (px - x0)) / len
        })
        .fold(f32::INFINITY, f32::min)
}

fn target() -> DepthColorBuffer {
    let mut fb = DepthColorBuffer::new(SIZE, SIZE).expect("non-zero");
    fb.clear(Color::BACKGROUND, DepthColorBuffer::EMPTY_DEPTH);
    fb
}

#[test]
fn uniform_triangle_fills_its_interior_only() {
    let color = Color::rgb(10, 200, 30);
    let texture = ColorBuffer::solid(4, 4, color).expect("4x4");
    let vertices = VertexBuffer::new(vec![
        at(100, 100, 0.5, 0.0, 0.0),
        at(200, 100, 0.5, 1.0, 0.0),
        at(150, 200, 0.5, 0.5, 1.0),
    ])
    .expect("one triangle");
    let mut fb = target();

    let report = rasterize_vertices(
        &vertices,
        &Mat4::identity(),
        &texture,
        &mut fb,
        TextureAddress::Wrap,
    );
    assert_eq!(report.drawn, 1);
    assert_eq!(report.skipped(), 0);

    let points = [(100.0, 100.0), (200.0, 100.0), (150.0, 200.0)];
    let mut inside = 0;
    for y in 0..SIZE as i32 {
        for x in 0..SIZE as i32 {
            let d = edge_distance(points, x as f32 + 0.5, y as f32);
            let depth = fb.depth_at(x, y).expect("in bounds");
            if d > 1.5 {
                inside += 1;
                assert_eq!(fb.color_at(x, y), Some(color), "({x}, {y})");
                assert_abs_diff_eq!(depth, 0.5, epsilon = 1e-5);
            } else if d < -1.5 {
                assert_eq!(fb.color_at(x, y), Some(Color::BACKGROUND), "({x}, {y})");
                assert_eq!(depth, DepthColorBuffer::EMPTY_DEPTH);
            }
        }
    }
    assert!(inside > 4000, "only {inside} interior pixels checked");
    assert!(report.pixels_written >= inside);
}

#[test]
fn second_identical_pass_changes_nothing() {
    let texture = ColorBuffer::checkerboard(8, 2, Color::WHITE, Color::BLACK).expect("8x8");
    let vertices = VertexBuffer::new(vec![
        at(20, 30, 0.3, 0.0, 0.0),
        at(220, 60, 0.7, 1.0, 0.2),
        at(90, 240, 0.5, 0.4, 1.0),
        at(200, 10, 0.9, 0.0, 0.0),
        at(250, 250, 0.1, 1.0, 1.0),
        at(10, 200, 0.4, 0.0, 1.0),
    ])
    .expect("two triangles");
    let mut fb = target();

    let first =
        rasterize_vertices(&vertices, &Mat4::identity(), &texture, &mut fb, TextureAddress::Wrap);
    let colors = fb.colors().to_vec();
    let depths = fb.depths().to_vec();

    let second =
        rasterize_vertices(&vertices, &Mat4::identity(), &texture, &mut fb, TextureAddress::Wrap);
    assert!(first.pixels_written > 0);
    assert_eq!(second.pixels_written, 0);
    assert_eq!(fb.colors(), colors.as_slice());
    assert_eq!(fb.depths(), depths.as_slice());
}

#[test]
fn nearer_triangle_wins_in_either_order() {
    let red = Color::rgb(255, 0, 0);
    let green = Color::rgb(0, 255, 0);
    let texture = ColorBuffer::new(2, 1, vec![red, green]).expect("2x1");

    let far = [
        at(40, 40, 0.2, 0.25, 0.0),
        at(200, 40, 0.2, 0.25, 0.0),
        at(120, 200, 0.2, 0.25, 0.0),
    ];
    let near = [
        at(40, 40, 0.8, 0.75, 0.0),
        at(200, 40, 0.8, 0.75, 0.0),
        at(120, 200, 0.8, 0.75, 0.0),
    ];

    for order in [[far, near], [near, far]] {
        let vertices = VertexBuffer::from_triangles(order);
        let mut fb = target();
        rasterize_vertices(&vertices, &Mat4::identity(), &texture, &mut fb, TextureAddress::Wrap);
        assert_eq!(fb.color_at(120, 80), Some(green));
        assert_abs_diff_eq!(fb.depth_at(120, 80).expect("in bounds"), 0.8, epsilon = 1e-5);
    }
}

#[test]
fn triangle_on_camera_plane_is_skipped() {
    // w = 1 - z, so vertices at z = 1 sit on the camera plane.
    let mut mvp = Mat4::identity();
    mvp.set(2, 3, -1.0);

    let texture = ColorBuffer::solid(1, 1, Color::WHITE).expect("1x1");
    let vertices = VertexBuffer::new(vec![
        at(10, 10, 0.0, 0.0, 0.0),
        at(100, 10, 0.0, 0.0, 0.0),
        at(50, 100, 1.0, 0.0, 0.0),
        at(10, 10, 0.0, 0.0, 0.0),
        at(100, 10, 0.0, 0.0, 0.0),
        at(50, 100, 0.0, 0.0, 0.0),
    ])
    .expect("two triangles");
    let mut fb = target();

    let report = rasterize_vertices(&vertices, &mvp, &texture, &mut fb, TextureAddress::Wrap);
    assert_eq!(report.degenerate_transforms, 1);
    assert_eq!(report.drawn, 1);
    assert!(report.pixels_written > 0);
}

#[test]
fn vertices_saturating_screen_coordinates_still_draw() {
    // A tiny w blows NDC up far past the i32 range; screen coordinates clamp
    // to i32::MIN / i32::MAX and the triangle covers the whole target.
    let mut mvp = Mat4::identity();
    mvp.set(3, 3, 1e-20);

    let color = Color::rgb(0, 0, 255);
    let texture = ColorBuffer::solid(2, 2, color).expect("2x2");
    let vertices = VertexBuffer::new(vec![
        Vertex::new(-0.5, -0.5, 0.5, 0.0, 0.0),
        Vertex::new(0.5, 0.0, 0.5, 0.0, 0.0),
        Vertex::new(0.0, 0.5, 0.5, 0.0, 0.0),
    ])
    .expect("one triangle");
    let mut fb = target();

    let report = rasterize_vertices(&vertices, &mvp, &texture, &mut fb, TextureAddress::Wrap);
    assert_eq!(report.triangles, 1);
    assert_eq!(report.drawn, 1);
    assert_eq!(report.skipped(), 0);
    assert!(report.pixels_written > 0);
    assert_eq!(fb.color_at(128, 200), Some(color));
    assert_eq!(fb.color_at(10, 10), Some(color));
}

#[test]
fn engine_renders_from_a_saved_config() {
    let config = RenderConfig {
        viewport_width: 128,
        viewport_height: 96,
        aspect: 128.0 / 96.0,
        texture_address: TextureAddress::Clamp,
        rotation_increment_per_frame: 0.1,
        ..RenderConfig::default()
    };
    let path = std::env::temp_dir().join(format!("soft3d-test-{}.ron", std::process::id()));
    config.save(&path).expect("write config");
    let loaded = RenderConfig::load(&path).expect("read config");
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, config);

    let texture = ColorBuffer::checkerboard(16, 4, Color::WHITE, Color::BLACK).expect("16x16");
    let mut engine = Engine::new(loaded, soft3d::mesh::cube(1.0), texture).expect("valid");
    let mut ctx = RenderContext::new();
    let mut last = PassReport::default();
    for _ in 0..10 {
        last = engine.render_frame(&mut ctx);
    }

    assert_eq!(ctx.frame, 10);
    assert_abs_diff_eq!(ctx.angle, 1.0, epsilon = 1e-5);
    assert_eq!(last.triangles, 12);
    assert!(last.drawn > 0);
    assert_eq!(engine.frame_bytes().len(), 128 * 96 * 4);
}
