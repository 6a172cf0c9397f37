//! Shared visualization utilities for the CSG viewers.

use std::hash::{Hash, Hasher};

use bsp_csg::{Aabb, Polygon, Solid};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use nalgebra::Point3;

pub mod navigator;
pub use navigator::TreeNavigator;

/// Generates a deterministic color from a polygon's vertex positions.
/// Fragments of the same split keep their colors across frames.
pub fn polygon_color(polygon: &Polygon) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for v in polygon.vertices() {
        v.pos.x.to_bits().hash(&mut hasher);
        v.pos.y.to_bits().hash(&mut hasher);
        v.pos.z.to_bits().hash(&mut hasher);
    }
    let hash = hasher.finish();

    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    // Keep colors off black
    Color::from_rgba(r.max(40), g.max(40), b.max(40), 255)
}

/// Draws a single polygon by fan-triangulating it into a Mesh.
pub fn draw_polygon(polygon: &Polygon) {
    let verts = polygon.vertices();
    if verts.len() < 3 {
        return;
    }

    let color = polygon_color(polygon);

    let mesh_vertices: Vec<Vertex> = verts
        .iter()
        .map(|v| Vertex::new2(vec3(v.pos.x, v.pos.y, v.pos.z), vec2(0.0, 0.0), color))
        .collect();

    let mut indices: Vec<u16> = Vec::with_capacity((verts.len() - 2) * 3);
    for i in 1..verts.len() - 1 {
        indices.push(0);
        indices.push(i as u16);
        indices.push((i + 1) as u16);
    }

    let mesh = Mesh {
        vertices: mesh_vertices,
        indices,
        texture: None,
    };

    draw_mesh(&mesh);
}

/// Draws every polygon of a solid.
pub fn draw_solid(solid: &Solid) {
    for polygon in solid.polygons() {
        draw_polygon(polygon);
    }
}

/// Draws the outline of every polygon of a solid.
pub fn draw_wireframe(solid: &Solid, color: Color) {
    for polygon in solid.polygons() {
        let verts = polygon.vertices();
        for (i, a) in verts.iter().enumerate() {
            let b = &verts[(i + 1) % verts.len()];
            draw_line_3d(
                vec3(a.pos.x, a.pos.y, a.pos.z),
                vec3(b.pos.x, b.pos.y, b.pos.z),
                color,
            );
        }
    }
}

/// The boolean operation shown by the viewers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

impl BooleanOp {
    /// Combines `a` and `b` with this operation.
    pub fn apply(self, a: &Solid, b: &Solid) -> Solid {
        match self {
            BooleanOp::Union => a.union(b),
            BooleanOp::Subtract => a.subtract(b),
            BooleanOp::Intersect => a.intersect(b),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BooleanOp::Union => "A union B",
            BooleanOp::Subtract => "A subtract B",
            BooleanOp::Intersect => "A intersect B",
        }
    }

    /// Reads the 1/2/3 keys. Returns the newly selected operation, if any.
    pub fn from_keys() -> Option<BooleanOp> {
        if is_key_pressed(KeyCode::Key1) {
            Some(BooleanOp::Union)
        } else if is_key_pressed(KeyCode::Key2) {
            Some(BooleanOp::Subtract)
        } else if is_key_pressed(KeyCode::Key3) {
            Some(BooleanOp::Intersect)
        } else {
            None
        }
    }
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 0.5,
            min_distance: 1.0,
            max_distance: 30.0,
        }
    }

    /// Sets the zoom speed and distance limits.
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Aims at the center of `bounds` from far enough away to keep all of it in view.
    pub fn framing(self, bounds: &Aabb) -> Self {
        let center = bounds.center();
        let radius = bounds.extents().norm() / 2.0;
        let distance = (radius * 3.0).clamp(self.min_distance, self.max_distance);
        Self {
            distance,
            ..self.with_target(vec3(center.x, center.y, center.z))
        }
    }

    /// Updates camera state from mouse drag, scroll and arrow keys.
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }

        // Stay clear of the poles
        self.pitch = self.pitch.clamp(-1.5, 1.5);
    }

    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }

    /// Returns the eye point for back-to-front tree traversal.
    pub fn eye_point(&self) -> Point3<f32> {
        let pos = self.position();
        Point3::new(pos.x, pos.y, pos.z)
    }
}

/// Draws the world axes at the origin.
pub fn draw_axes(length: f32) {
    let origin = vec3(0.0, 0.0, 0.0);
    draw_line_3d(origin, vec3(length, 0.0, 0.0), RED);
    draw_line_3d(origin, vec3(0.0, length, 0.0), GREEN);
    draw_line_3d(origin, vec3(0.0, 0.0, length), BLUE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_targets_bounds_center() {
        let bounds = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(3.0, 2.0, 2.0));
        let camera = OrbitCamera::new(4.0, 0.0, 0.0)
            .with_zoom(0.5, 1.0, 50.0)
            .framing(&bounds);

        assert_eq!(camera.target, vec3(2.0, 1.0, 1.0));
        // Half the diagonal of a 2 x 2 x 2 box, tripled
        assert!((camera.distance - 3.0_f32.sqrt() * 3.0).abs() < 1e-5);
        assert!((camera.position() - vec3(2.0, 1.0, 1.0 + camera.distance)).length() < 1e-5);
    }

    #[test]
    fn framing_respects_zoom_limits() {
        let tiny = Aabb::new(Point3::origin(), Point3::new(0.01, 0.01, 0.01));
        let camera = OrbitCamera::new(4.0, 0.0, 0.0)
            .with_zoom(0.5, 2.0, 10.0)
            .framing(&tiny);
        assert_eq!(camera.distance, 2.0);
    }

    #[test]
    fn boolean_op_applies_matching_operation() {
        let a = Solid::cube(Point3::origin(), 1.0);
        let b = Solid::cube(Point3::new(0.5, 0.0, 0.0), 1.0);

        let volumes = [BooleanOp::Union, BooleanOp::Subtract, BooleanOp::Intersect]
            .map(|op| op.apply(&a, &b).volume());
        assert!((volumes[0] - 1.5).abs() < 1e-4);
        assert!((volumes[1] - 0.5).abs() < 1e-4);
        assert!((volumes[2] - 0.5).abs() < 1e-4);
    }
}
