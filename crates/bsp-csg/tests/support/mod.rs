//! Test support library
//! Provides helper functions shared by the integration tests.

#![allow(dead_code)]

use bsp_csg::Solid;
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

/// Axis-aligned cube spanning `[min, min + edge]` on every axis.
pub fn cube_at(min: [f32; 3], edge: f32) -> Solid {
    let half = edge / 2.0;
    Solid::cube(
        Point3::new(min[0] + half, min[1] + half, min[2] + half),
        edge,
    )
}

/// Returns `[min_x, min_y, min_z, max_x, max_y, max_z]` of a non-empty solid.
pub fn bounds(solid: &Solid) -> [f32; 6] {
    let aabb = solid.bounding_box().expect("solid should not be empty");
    [
        aabb.mins.x,
        aabb.mins.y,
        aabb.mins.z,
        aabb.maxs.x,
        aabb.maxs.y,
        aabb.maxs.z,
    ]
}

/// Asserts that two bounding boxes agree within `eps` on every coordinate.
pub fn assert_bounds(actual: [f32; 6], expected: [f32; 6], eps: f32) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            approx_eq(*a, *e, eps),
            "bounds {:?} differ from expected {:?}",
            actual,
            expected
        );
    }
}
