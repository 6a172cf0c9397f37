use bsp_csg::Solid;
use csg_viz::{draw_axes, draw_solid, draw_wireframe, BooleanOp, OrbitCamera};
use log::info;
use macroquad::prelude::*;
use nalgebra::Point3;

fn operands() -> (Solid, Solid) {
    let a = Solid::cube(Point3::new(-0.25, -0.25, -0.25), 1.0);
    let b = Solid::sphere(Point3::new(0.25, 0.25, 0.25), 0.65, 24, 12);
    (a, b)
}

fn evaluate(op: BooleanOp, a: &Solid, b: &Solid) -> Solid {
    let result = op.apply(a, b);
    info!(
        "{}: {} polygons, volume {:.4}",
        op.label(),
        result.len(),
        result.volume()
    );
    result
}

#[macroquad::main("CSG Boolean Operations")]
async fn main() {
    env_logger::init();

    let (a, b) = operands();
    info!("A: {} polygons, B: {} polygons", a.len(), b.len());

    let mut op = BooleanOp::Union;
    let mut result = evaluate(op, &a, &b);
    let mut show_operands = false;

    let mut camera = OrbitCamera::new(4.0, 0.6, 0.4).with_zoom(0.3, 1.5, 20.0);
    if let Some(bounds) = a.union(&b).bounding_box() {
        camera = camera.framing(&bounds);
    }

    loop {
        camera.update();

        if let Some(selected) = BooleanOp::from_keys().filter(|&selected| selected != op) {
            op = selected;
            result = evaluate(op, &a, &b);
        }
        if is_key_pressed(KeyCode::W) {
            show_operands = !show_operands;
        }

        clear_background(Color::from_rgba(20, 20, 30, 255));
        set_camera(&camera.to_camera3d());

        draw_solid(&result);
        if show_operands {
            draw_wireframe(&a, SKYBLUE);
            draw_wireframe(&b, PINK);
        }
        draw_axes(1.0);

        set_default_camera();

        draw_text(op.label(), 10.0, 25.0, 24.0, WHITE);
        draw_text(
            &format!(
                "{} polygons | volume {:.4}",
                result.len(),
                result.volume()
            ),
            10.0,
            50.0,
            18.0,
            GRAY,
        );
        draw_text(
            "[1] union  [2] subtract  [3] intersect  [W] operand wireframes",
            10.0,
            75.0,
            16.0,
            YELLOW,
        );
        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 95.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 115.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
