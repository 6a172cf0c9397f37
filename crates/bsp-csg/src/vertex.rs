//! Vertex representation for CSG polygons.

use nalgebra::{Point3, Vector3};

/// A polygon vertex: a position plus a normal attribute.
///
/// The normal is carried along and interpolated during splitting, but it is
/// never renormalized here. Splitting planes are derived from positions only.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    /// Creates a new vertex from a position and a normal.
    #[inline]
    pub fn new(pos: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { pos, normal }
    }

    /// Negates the normal in place.
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linearly interpolates both position and normal towards `other`.
    ///
    /// `t = 0.0` yields `self`, `t = 1.0` yields `other`.
    pub fn interpolate(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            pos: self.pos + (other.pos - self.pos) * t,
            normal: self.normal.lerp(&other.normal, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_negates_normal_only() {
        let mut v = Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        v.flip();
        assert_eq!(v.pos, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn interpolate_endpoints_and_midpoint() {
        let a = Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let b = Vertex::new(Point3::new(2.0, 4.0, 0.0), Vector3::new(0.0, 1.0, 0.0));

        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);

        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.pos, Point3::new(1.0, 2.0, 0.0));
        // Interpolated normals are not renormalized
        assert_eq!(mid.normal, Vector3::new(0.5, 0.5, 0.0));
    }
}
