use bsp_csg::{Node, Solid};
use csg_viz::{draw_axes, BooleanOp, OrbitCamera, TreeNavigator};
use log::{debug, info};
use macroquad::prelude::*;
use nalgebra::{Matrix4, Point3, Vector3};

/// A cube with a tilted slab cut out of it, so the tree has non-axis planes.
fn scene() -> (Solid, Solid) {
    let cube = Solid::cube(Point3::origin(), 1.0);
    let slab = Solid::cuboid(Point3::origin(), Vector3::new(1.6, 0.3, 1.6))
        .transform(&Matrix4::from_euler_angles(0.3, 0.2, 0.4));
    (cube, slab)
}

fn build_tree(op: BooleanOp, a: &Solid, b: &Solid) -> Node {
    let result = op.apply(a, b);
    let tree = Node::from_polygons(result.into_polygons());
    info!(
        "{}: tree holds {} polygons, depth {}",
        op.label(),
        tree.polygon_count(),
        tree.depth()
    );
    tree
}

#[macroquad::main("CSG Tree Walker")]
async fn main() {
    env_logger::init();

    let (a, b) = scene();
    let mut op = BooleanOp::Subtract;
    let mut tree = build_tree(op, &a, &b);

    let mut camera = OrbitCamera::new(3.5, 0.4, 0.4).with_zoom(0.3, 1.5, 20.0);
    if let Some(bounds) = a.bounding_box() {
        camera = camera.framing(&bounds);
    }
    let mut navigator = TreeNavigator::new();

    loop {
        camera.update();

        if let Some(selected) = BooleanOp::from_keys().filter(|&selected| selected != op) {
            op = selected;
            tree = build_tree(op, &a, &b);
            navigator.go_root();
        }
        if navigator.update(&tree) {
            debug!("navigated to {:?}", navigator.path());
        }

        clear_background(Color::from_rgba(20, 20, 30, 255));
        set_camera(&camera.to_camera3d());

        navigator.render(&tree, camera.eye_point());
        draw_axes(1.0);

        set_default_camera();

        draw_text(
            &format!("{} - total: {} polygons", op.label(), tree.polygon_count()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!("Tree depth: {} | [1] [2] [3] switch operation", tree.depth()),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        navigator.draw_ui(&tree, 70.0);

        draw_text("Drag mouse to rotate, scroll to zoom", 10.0, 155.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 175.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
