//! Conversion between solids and indexed triangle meshes.
//!
//! This is the boundary to rendering or asset code: it consumes and produces
//! plain position/normal buffers with a triangle index list, and knows
//! nothing about materials or scene graphs.

use log::warn;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::{CsgError, Polygon, Solid, Vertex};

/// A triangle mesh with per-vertex positions and normals.
///
/// `positions` and `normals` are parallel arrays; each entry of `indices`
/// names three of them, counter-clockwise when viewed from outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub indices: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Flattens a solid into triangles.
    ///
    /// Vertices are not shared between polygons. Polygons with more than
    /// three vertices are fan-triangulated from their first vertex.
    pub fn from_solid(solid: &Solid) -> Self {
        let mut mesh = Self::default();

        for polygon in solid.polygons() {
            let offset = mesh.positions.len() as u32;
            for vertex in polygon.vertices() {
                mesh.positions.push(vertex.pos);
                mesh.normals.push(vertex.normal);
            }
            for i in 2..polygon.len() as u32 {
                mesh.indices.push([offset, offset + i - 1, offset + i]);
            }
        }

        mesh
    }

    /// Builds a solid with one triangle polygon per index triple.
    ///
    /// Triangles whose corners are collinear cannot define a plane and are
    /// skipped with a warning. Out-of-range indices, mismatched buffers and
    /// non-finite positions are errors.
    pub fn to_solid(&self) -> Result<Solid, CsgError> {
        if self.positions.len() != self.normals.len() {
            return Err(CsgError::AttributeCountMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }

        let mut polygons = Vec::with_capacity(self.indices.len());
        for triangle in &self.indices {
            let vertices = triangle
                .iter()
                .map(|&index| self.vertex(index as usize))
                .collect::<Result<Vec<_>, _>>()?;

            match Polygon::try_new(vertices) {
                Ok(polygon) => polygons.push(polygon),
                Err(CsgError::DegeneratePlane(at)) => {
                    warn!("skipping degenerate triangle {triangle:?} at {at}");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Solid::from_polygons(polygons))
    }

    fn vertex(&self, index: usize) -> Result<Vertex, CsgError> {
        match (self.positions.get(index), self.normals.get(index)) {
            (Some(pos), Some(normal)) => Ok(Vertex::new(*pos, *normal)),
            _ => Err(CsgError::IndexOutOfBounds {
                index,
                len: self.positions.len(),
            }),
        }
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Applies an affine transform in place, as [`Solid::transform`] does.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        let normals = normal_matrix(matrix);

        for pos in &mut self.positions {
            *pos = matrix.transform_point(pos);
        }
        for normal in &mut self.normals {
            *normal = transform_normal(&normals, *normal);
        }
        if matrix.fixed_view::<3, 3>(0, 0).determinant() < 0.0 {
            for triangle in &mut self.indices {
                triangle.swap(1, 2);
            }
        }
    }
}

impl From<&Solid> for IndexedMesh {
    fn from(solid: &Solid) -> Self {
        Self::from_solid(solid)
    }
}

impl TryFrom<&IndexedMesh> for Solid {
    type Error = CsgError;

    fn try_from(mesh: &IndexedMesh) -> Result<Self, Self::Error> {
        mesh.to_solid()
    }
}

/// Matrix that maps normals under `matrix`: the inverse transpose of its linear part.
pub(crate) fn normal_matrix(matrix: &Matrix4<f32>) -> Matrix3<f32> {
    let linear: Matrix3<f32> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    match linear.try_inverse() {
        Some(inverse) => inverse.transpose(),
        None => {
            warn!("singular transform; normals use its linear part directly");
            linear
        }
    }
}

/// Transforms and renormalizes a normal. Zero normals stay zero.
pub(crate) fn transform_normal(normal_matrix: &Matrix3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    let transformed = normal_matrix * normal;
    transformed.try_normalize(0.0).unwrap_or(transformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad_mesh() -> IndexedMesh {
        IndexedMesh {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 4],
            indices: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    #[test]
    fn from_solid_fans_polygons() {
        let cube = Solid::cube(Point3::origin(), 1.0);
        let mesh = IndexedMesh::from_solid(&cube);

        // 6 quads, 4 unshared vertices and 2 triangles each
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.normals.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.indices[0], [0, 1, 2]);
        assert_eq!(mesh.indices[1], [0, 2, 3]);
        assert_eq!(mesh.indices[2], [4, 5, 6]);
    }

    #[test]
    fn to_solid_makes_triangles() {
        let solid = unit_quad_mesh().to_solid().unwrap();
        assert_eq!(solid.len(), 2);
        assert!(solid.polygons().iter().all(|p| p.len() == 3));
        assert!((solid.polygons()[0].plane().normal() - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn cube_survives_round_trip() {
        let cube = Solid::cube(Point3::new(0.5, 0.5, 0.5), 1.0);
        let solid = Solid::try_from(&IndexedMesh::from(&cube)).unwrap();
        assert_eq!(solid.len(), 12);
        assert!((solid.volume() - cube.volume()).abs() < 1e-5);
    }

    #[test]
    fn to_solid_skips_degenerate_triangles() {
        let mut mesh = unit_quad_mesh();
        mesh.positions.push(Point3::new(2.0, 0.0, 0.0));
        mesh.normals.push(Vector3::z());
        mesh.indices.push([0, 1, 4]);

        assert_eq!(mesh.to_solid().unwrap().len(), 2);
    }

    #[test]
    fn to_solid_reports_bad_buffers() {
        let mut mesh = unit_quad_mesh();
        mesh.indices.push([0, 1, 7]);
        assert_eq!(
            mesh.to_solid(),
            Err(CsgError::IndexOutOfBounds { index: 7, len: 4 })
        );

        let mut mesh = unit_quad_mesh();
        mesh.normals.pop();
        assert_eq!(
            mesh.to_solid(),
            Err(CsgError::AttributeCountMismatch {
                positions: 4,
                normals: 3
            })
        );
    }

    #[test]
    fn transform_scales_positions_and_renormalizes_normals() {
        let mut mesh = unit_quad_mesh();
        mesh.normals = vec![Vector3::new(1.0, 0.0, 1.0).normalize(); 4];
        mesh.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0)));

        assert_eq!(mesh.positions[2], Point3::new(2.0, 1.0, 0.0));
        let normal = mesh.normals[0];
        assert!((normal.norm() - 1.0).abs() < 1e-6);
        // Stretching along X tilts normals away from X
        assert!(normal.x < normal.z);
        assert_eq!(mesh.indices[0], [0, 1, 2]);
    }

    #[test]
    fn mirror_transform_reverses_winding() {
        let mut mesh = unit_quad_mesh();
        mesh.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, -1.0)));
        assert_eq!(mesh.indices[0], [0, 2, 1]);
        assert_eq!(mesh.normals[0], -Vector3::z());
    }
}
