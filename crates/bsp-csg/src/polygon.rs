//! Convex polygon representation for BSP-based CSG.

use nalgebra::{Point3, Vector3};

use crate::{CsgError, Plane, Vertex};

/// A convex polygon in 3D space, defined by an ordered loop of vertices.
///
/// Vertices should be coplanar and in counter-clockwise winding order
/// when viewed from the front (the direction the plane normal points).
///
/// The supporting [`Plane`] is computed once from the first three vertex
/// positions. Positions are therefore not mutable through this type;
/// build a new polygon instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vertex>,
    plane: Plane,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    ///
    /// The first three vertices must not be collinear; otherwise the plane
    /// normal is NaN. Use [`Polygon::try_new`] for unvalidated input.
    ///
    /// # Panics (debug builds only)
    /// Panics if fewer than 3 vertices are provided.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        debug_assert!(
            vertices.len() >= 3,
            "Polygon must have at least 3 vertices"
        );
        let plane = Plane::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        Self { vertices, plane }
    }

    /// Creates a polygon after validating the vertex count, coordinates and plane.
    pub fn try_new(vertices: Vec<Vertex>) -> Result<Self, CsgError> {
        if vertices.len() < 3 {
            return Err(CsgError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if let Some(v) = vertices
            .iter()
            .find(|v| !v.pos.coords.iter().all(|c| c.is_finite()))
        {
            return Err(CsgError::NonFiniteCoordinate(v.pos));
        }
        let plane = Plane::try_from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos)
            .ok_or(CsgError::DegeneratePlane(vertices[0].pos))?;
        Ok(Self { vertices, plane })
    }

    /// Creates a polygon that shares the plane of the polygon it was cut from.
    pub(crate) fn with_plane(vertices: Vec<Vertex>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Consumes the polygon, returning its vertices.
    #[inline]
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    /// Returns the plane that this polygon lies on.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Reverses the winding, flips every vertex normal and flips the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.vertices.iter_mut().for_each(Vertex::flip);
        self.plane.flip();
    }

    /// Returns a flipped copy of this polygon.
    pub fn flipped(&self) -> Self {
        let mut polygon = self.clone();
        polygon.flip();
        polygon
    }

    /// Computes the centroid (vertex average) of the polygon.
    pub fn centroid(&self) -> Point3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|v| v.pos.coords).sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Fan triangulation from vertex 0.
    ///
    /// Yields `len() - 2` triangles, preserving the polygon's winding.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        let first = &self.vertices[0];
        self.vertices[1..]
            .windows(2)
            .map(move |pair| [first, &pair[0], &pair[1]])
    }

    /// Surface area of the polygon.
    pub fn area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| (b.pos - a.pos).cross(&(c.pos - a.pos)).norm() * 0.5)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(p: [f32; 3]) -> Vertex {
        Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z())
    }

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([1.0, 1.0, 0.0]),
            vertex([0.0, 1.0, 0.0]),
        ])
    }

    #[test]
    fn plane_follows_winding() {
        let square = unit_square();
        assert!((square.plane().normal() - Vector3::z()).norm() < 1e-6);
        assert!(square.plane().w().abs() < 1e-6);
    }

    #[test]
    fn flip_reverses_vertices_normals_and_plane() {
        let original = unit_square();
        let mut flipped = original.clone();
        flipped.flip();

        let positions: Vec<_> = flipped.vertices().iter().map(|v| v.pos).collect();
        let mut expected: Vec<_> = original.vertices().iter().map(|v| v.pos).collect();
        expected.reverse();
        assert_eq!(positions, expected);

        assert!(flipped.vertices().iter().all(|v| v.normal == -Vector3::z()));
        assert_eq!(flipped.plane(), &original.plane().flipped());

        flipped.flip();
        assert_eq!(flipped, original);
    }

    #[test]
    fn try_new_rejects_bad_input() {
        let two = vec![vertex([0.0, 0.0, 0.0]), vertex([1.0, 0.0, 0.0])];
        assert_eq!(
            Polygon::try_new(two),
            Err(CsgError::TooFewVertices { count: 2 })
        );

        let collinear = vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([2.0, 0.0, 0.0]),
        ];
        assert!(matches!(
            Polygon::try_new(collinear),
            Err(CsgError::DegeneratePlane(_))
        ));

        let nan = vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([f32::NAN, 0.0, 0.0]),
            vertex([0.0, 1.0, 0.0]),
        ];
        assert!(matches!(
            Polygon::try_new(nan),
            Err(CsgError::NonFiniteCoordinate(_))
        ));
    }

    #[test]
    fn try_new_accepts_valid_polygon() {
        let polygon = Polygon::try_new(unit_square().into_vertices()).unwrap();
        assert_eq!(polygon, unit_square());
    }

    #[test]
    fn fan_triangles_and_area() {
        let square = unit_square();
        let triangles: Vec<_> = square.triangles().collect();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[1][0].pos, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(triangles[1][2].pos, Point3::new(0.0, 1.0, 0.0));
        assert!((square.area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn centroid_of_square() {
        assert_eq!(unit_square().centroid(), Point3::new(0.5, 0.5, 0.0));
    }
}
