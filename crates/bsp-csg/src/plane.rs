//! Plane representation and classification for BSP-based CSG.

use nalgebra::{Point3, Vector3};

use crate::Polygon;

/// Default epsilon for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No vertex is behind the plane, at least one is in front
    Front,
    /// No vertex is in front of the plane, at least one is behind
    Back,
    /// All vertices are on the plane
    Coplanar,
    /// At least one vertex in front and at least one behind
    Spanning,
}

/// An oriented plane in 3D space, represented as `normal · point = w`.
///
/// The normal is kept at unit length so that [`Plane::signed_distance`] is a
/// true Euclidean distance and the epsilon band has a fixed width.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<f32>,
    w: f32,
}

impl Plane {
    /// Creates a new plane from a normal vector and offset.
    /// The normal (and offset) are rescaled so the normal has unit length.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f32>, w: f32) -> Self {
        let norm = normal.norm();
        assert!(norm > f32::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            w: w / norm,
        }
    }

    /// Creates a plane through three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Collinear or duplicate points produce a NaN normal. Use
    /// [`Plane::try_from_points`] when the input is not known to be valid.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        let w = normal.dot(&a.coords);
        Self { normal, w }
    }

    /// Like [`Plane::from_points`], but returns `None` for (nearly) collinear points.
    pub fn try_from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Option<Self> {
        let cross = (b - a).cross(&(c - a));
        let norm = cross.norm();
        if norm > f32::EPSILON && norm.is_finite() {
            let normal = cross / norm;
            Some(Self {
                normal,
                w: normal.dot(&a.coords),
            })
        } else {
            None
        }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed offset of the plane along its normal.
    #[inline]
    pub fn w(&self) -> f32 {
        self.w
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classifies which side of the plane a point lies on.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f32>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies which side of the plane a point lies on, with a custom epsilon.
    pub fn classify_point_with_epsilon(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist < -epsilon {
            PlaneSide::Back
        } else if dist > epsilon {
            PlaneSide::Front
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Classifies a polygon against this plane.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn classify_polygon(&self, polygon: &Polygon) -> Classification {
        self.classify_polygon_with_epsilon(polygon, PLANE_EPSILON)
    }

    /// Classifies a polygon against this plane, with a custom epsilon.
    ///
    /// On-plane vertices never decide the verdict on their own: a polygon is
    /// `Spanning` only if it has vertices strictly on both sides.
    pub fn classify_polygon_with_epsilon(&self, polygon: &Polygon, epsilon: f32) -> Classification {
        let mut front = 0;
        let mut back = 0;

        for vertex in polygon.vertices() {
            match self.classify_point_with_epsilon(vertex.pos, epsilon) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::OnPlane => {}
            }
        }

        match (front, back) {
            (0, 0) => Classification::Coplanar,
            (_, 0) => Classification::Front,
            (0, _) => Classification::Back,
            _ => Classification::Spanning,
        }
    }

    /// Reverses the orientation of the plane in place.
    /// The set of points on the plane is unchanged.
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Parameter `t` at which the segment `start -> end` meets the plane.
    ///
    /// Only meaningful when the endpoints lie on opposite sides; the caller is
    /// expected to have checked that.
    #[inline]
    pub(crate) fn intersection_parameter(&self, start: Point3<f32>, end: Point3<f32>) -> f32 {
        (self.w - self.normal.dot(&start.coords)) / self.normal.dot(&(end - start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vertex;

    fn make_polygon(points: &[[f32; 3]]) -> Polygon {
        Polygon::new(
            points
                .iter()
                .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
                .collect(),
        )
    }

    #[test]
    fn from_points_unit_normal_and_offset() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
        );
        assert!((plane.normal() - Vector3::z()).norm() < 1e-6);
        assert!((plane.w() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn try_from_points_rejects_collinear() {
        let plane = Plane::try_from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(plane.is_none());
    }

    #[test]
    fn new_normalizes() {
        let plane = Plane::new(Vector3::new(0.0, 2.0, 0.0), 4.0);
        assert_eq!(plane.normal(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.w(), 2.0);
    }

    #[test]
    fn flip_twice_is_identity() {
        let original = Plane::new(Vector3::new(0.3, -0.5, 0.8), 1.25);
        let mut plane = original.clone();
        plane.flip();
        assert_eq!(plane, original.flipped());
        plane.flip();
        assert_eq!(plane, original);
    }

    #[test]
    fn classify_point_sides() {
        let plane = Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        assert_eq!(plane.classify_point(Point3::new(0.0, 1.0, 0.0)), PlaneSide::Front);
        assert_eq!(plane.classify_point(Point3::new(0.0, -1.0, 0.0)), PlaneSide::Back);
        assert_eq!(plane.classify_point(Point3::new(5.0, 0.0, -3.0)), PlaneSide::OnPlane);
    }

    #[test]
    fn classify_point_within_epsilon_is_on_plane() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, 9e-6)), PlaneSide::OnPlane);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, -9e-6)), PlaneSide::OnPlane);
        // The tolerance band is inclusive
        assert_eq!(plane.signed_distance(Point3::new(0.0, 0.0, PLANE_EPSILON)), PLANE_EPSILON);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, PLANE_EPSILON)), PlaneSide::OnPlane);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, -PLANE_EPSILON)), PlaneSide::OnPlane);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, 2e-5)), PlaneSide::Front);
        assert_eq!(plane.classify_point(Point3::new(0.0, 0.0, -2e-5)), PlaneSide::Back);
    }

    #[test]
    fn classify_point_custom_epsilon() {
        let plane = Plane::new(Vector3::new(1.0, 0.0, 0.0), 0.0);
        let p = Point3::new(0.01, 0.0, 0.0);
        assert_eq!(plane.classify_point(p), PlaneSide::Front);
        assert_eq!(plane.classify_point_with_epsilon(p, 0.1), PlaneSide::OnPlane);
    }

    #[test]
    fn classify_polygon_variants() {
        let plane = Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0);

        let front = make_polygon(&[[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 2.0, 0.0]]);
        let back = make_polygon(&[[0.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, -2.0, 0.0]]);
        let coplanar = make_polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let spanning = make_polygon(&[[0.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]]);

        assert_eq!(plane.classify_polygon(&front), Classification::Front);
        assert_eq!(plane.classify_polygon(&back), Classification::Back);
        assert_eq!(plane.classify_polygon(&coplanar), Classification::Coplanar);
        assert_eq!(plane.classify_polygon(&spanning), Classification::Spanning);
    }

    #[test]
    fn on_plane_vertices_do_not_make_spanning() {
        let plane = Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        // Two vertices on the plane, one in front
        let touching = make_polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(plane.classify_polygon(&touching), Classification::Front);
    }
}
