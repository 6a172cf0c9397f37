//! Primitive solids.

use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

use crate::{Polygon, Solid, Vertex};

/// Corner offsets of a box, as multiples of its half extents.
const CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0], // 0: left-bottom-back
    [1.0, -1.0, -1.0],  // 1: right-bottom-back
    [1.0, 1.0, -1.0],   // 2: right-top-back
    [-1.0, 1.0, -1.0],  // 3: left-top-back
    [-1.0, -1.0, 1.0],  // 4: left-bottom-front
    [1.0, -1.0, 1.0],   // 5: right-bottom-front
    [1.0, 1.0, 1.0],    // 6: right-top-front
    [-1.0, 1.0, 1.0],   // 7: left-top-front
];

/// 6 faces with counter-clockwise winding (viewed from outside), with their normals.
const FACES: [([usize; 4], [f32; 3]); 6] = [
    ([4, 5, 6, 7], [0.0, 0.0, 1.0]),  // front (+Z)
    ([1, 0, 3, 2], [0.0, 0.0, -1.0]), // back (-Z)
    ([0, 4, 7, 3], [-1.0, 0.0, 0.0]), // left (-X)
    ([5, 1, 2, 6], [1.0, 0.0, 0.0]),  // right (+X)
    ([7, 6, 2, 3], [0.0, 1.0, 0.0]),  // top (+Y)
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]), // bottom (-Y)
];

impl Solid {
    /// An axis-aligned box with the given center and edge lengths.
    ///
    /// Each face is a quad whose vertices carry the face normal.
    pub fn cuboid(center: Point3<f32>, size: Vector3<f32>) -> Solid {
        let half = size / 2.0;

        let polygons = FACES
            .iter()
            .map(|(indices, normal)| {
                let normal = Vector3::from(*normal);
                let vertices = indices
                    .iter()
                    .map(|&i| {
                        let offset = Vector3::from(CORNERS[i]).component_mul(&half);
                        Vertex::new(center + offset, normal)
                    })
                    .collect();
                Polygon::new(vertices)
            })
            .collect();

        Solid::from_polygons(polygons)
    }

    /// An axis-aligned cube with the given center and edge length.
    pub fn cube(center: Point3<f32>, edge: f32) -> Solid {
        Self::cuboid(center, Vector3::repeat(edge))
    }

    /// A UV sphere.
    ///
    /// `slices` divide the sphere around the Y axis, `stacks` from pole to
    /// pole. Polar rows are triangles, all other faces are quads. Vertex
    /// normals point radially outward.
    ///
    /// # Panics
    /// Panics if `slices < 3` or `stacks < 2`.
    pub fn sphere(center: Point3<f32>, radius: f32, slices: usize, stacks: usize) -> Solid {
        assert!(slices >= 3 && stacks >= 2, "sphere needs at least 3 slices and 2 stacks");

        let vertex = |i: usize, j: usize| {
            let theta = i as f32 / slices as f32 * TAU;
            let phi = j as f32 / stacks as f32 * PI;
            let dir = Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            Vertex::new(center + dir * radius, dir)
        };

        let mut polygons = Vec::with_capacity(slices * stacks);
        for i in 0..slices {
            for j in 0..stacks {
                let mut vertices = vec![vertex(i, j)];
                if j > 0 {
                    vertices.push(vertex(i + 1, j));
                }
                if j < stacks - 1 {
                    vertices.push(vertex(i + 1, j + 1));
                }
                vertices.push(vertex(i, j + 1));
                polygons.push(Polygon::new(vertices));
            }
        }

        Solid::from_polygons(polygons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_faces_point_outward() {
        let center = Point3::new(1.0, 2.0, 3.0);
        let cuboid = Solid::cuboid(center, Vector3::new(2.0, 4.0, 6.0));

        assert_eq!(cuboid.len(), 6);
        for polygon in cuboid.polygons() {
            let outward = polygon.centroid() - center;
            assert!(polygon.plane().normal().dot(&outward) > 0.0);
            assert!((polygon.vertices()[0].normal - polygon.plane().normal()).norm() < 1e-6);
        }
        assert!((cuboid.volume() - 48.0).abs() < 1e-3);
    }

    #[test]
    fn cube_bounds() {
        let cube = Solid::cube(Point3::origin(), 2.0);
        let bounds = cube.bounding_box().unwrap();
        assert_eq!(bounds.mins, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.maxs, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn sphere_structure_and_volume() {
        let sphere = Solid::sphere(Point3::origin(), 1.0, 32, 16);
        assert_eq!(sphere.len(), 32 * 16);

        // Polar rows are triangles
        let triangles = sphere.polygons().iter().filter(|p| p.len() == 3).count();
        assert_eq!(triangles, 64);

        for polygon in sphere.polygons() {
            let outward = polygon.centroid().coords;
            assert!(polygon.plane().normal().dot(&outward) > 0.0);
        }

        // A tessellated sphere is slightly smaller than the exact one
        let exact = 4.0 / 3.0 * PI;
        let volume = sphere.volume();
        assert!(volume < exact && volume > exact * 0.95);
    }
}
