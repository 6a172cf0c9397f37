//! Polygon-soup solids and the boolean operations on them.

use log::{debug, warn};
use nalgebra::{Matrix4, Point3, Vector3};

use crate::mesh::{normal_matrix, transform_normal};
use crate::{Node, Polygon, Vertex, PLANE_EPSILON};

/// A closed volume represented as a flat, unordered list of convex polygons.
///
/// An empty solid is the empty set: a tree without planes clips nothing,
/// so operations with an empty operand are answered directly instead of
/// running the tree recipes.
///
/// A `Solid` carries no BSP structure. Each boolean operation builds a pair
/// of [`Node`] trees from copies of the operands' polygons, combines them,
/// and returns the flattened result as a new `Solid`. The operands are never
/// modified.
///
/// # Example
///
/// ```ignore
/// use bsp_csg::Solid;
/// use nalgebra::Point3;
///
/// let a = Solid::cube(Point3::origin(), 1.0);
/// let b = Solid::cube(Point3::new(0.5, 0.0, 0.0), 1.0);
///
/// let merged = a.union(&b);
/// assert!((merged.volume() - 1.5).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    polygons: Vec<Polygon>,
    epsilon: f32,
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}

impl Solid {
    /// Creates an empty solid.
    pub fn new() -> Self {
        Self::from_polygons(Vec::new())
    }

    /// Wraps a polygon soup. The polygons should bound a closed volume with
    /// outward-facing planes.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            epsilon: PLANE_EPSILON,
        }
    }

    /// Sets the classification tolerance used by boolean operations on this solid.
    ///
    /// The default `PLANE_EPSILON` suits coordinates of roughly unit scale.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the classification tolerance.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Returns the polygons of the solid.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Consumes the solid, returning its polygons.
    #[inline]
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    /// Returns the number of polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Returns `true` if the solid has no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Returns the space covered by `self` or `other` (or both).
    ///
    /// ```text
    /// +-------+            +-------+
    /// |       |            |       |
    /// |   A   |            |       |
    /// |    +--+----+   =   |       +----+
    /// +----+--+    |       +----+       |
    ///      |   B   |            |       |
    ///      |       |            |       |
    ///      +-------+            +-------+
    /// ```
    pub fn union(&self, other: &Solid) -> Solid {
        if self.is_empty() || other.is_empty() {
            let polygons = [self.polygons(), other.polygons()].concat();
            return self.finish_empty("union", polygons);
        }
        let (mut a, mut b) = self.trees(other);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.into_polygons());

        self.finish("union", a)
    }

    /// Returns the space covered by `self` but not by `other`.
    ///
    /// ```text
    /// +-------+            +-------+
    /// |       |            |       |
    /// |   A   |            |       |
    /// |    +--+----+   =   |    +--+
    /// +----+--+    |       +----+
    ///      |   B   |
    ///      |       |
    ///      +-------+
    /// ```
    pub fn subtract(&self, other: &Solid) -> Solid {
        if self.is_empty() || other.is_empty() {
            return self.finish_empty("subtract", self.polygons.clone());
        }
        let (mut a, mut b) = self.trees(other);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.into_polygons());
        a.invert();

        self.finish("subtract", a)
    }

    /// Returns the space covered by both `self` and `other`.
    ///
    /// ```text
    /// +-------+
    /// |       |
    /// |   A   |
    /// |    +--+----+   =   +--+
    /// +----+--+    |       +--+
    ///      |   B   |
    ///      |       |
    ///      +-------+
    /// ```
    pub fn intersect(&self, other: &Solid) -> Solid {
        if self.is_empty() || other.is_empty() {
            return self.finish_empty("intersect", Vec::new());
        }
        let (mut a, mut b) = self.trees(other);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(b.into_polygons());
        a.invert();

        self.finish("intersect", a)
    }

    /// Returns the complement of this solid: every polygon flipped.
    pub fn inverse(&self) -> Solid {
        Solid {
            polygons: self.polygons.iter().map(Polygon::flipped).collect(),
            epsilon: self.epsilon,
        }
    }

    /// Builds one tree per operand from fresh copies of their polygons.
    ///
    /// The trees split and flip polygons in place, so the copies keep the
    /// operands untouched.
    fn trees(&self, other: &Solid) -> (Node, Node) {
        let mut a = Node::with_epsilon(self.epsilon);
        a.build(self.polygons.clone());
        let mut b = Node::with_epsilon(self.epsilon);
        b.build(other.polygons.clone());

        debug!(
            "bsp trees built: {} polygons (depth {}) and {} polygons (depth {})",
            a.polygon_count(),
            a.depth(),
            b.polygon_count(),
            b.depth()
        );
        (a, b)
    }

    fn finish(&self, operation: &str, tree: Node) -> Solid {
        let polygons = tree.into_polygons();
        debug!("{operation}: {} polygons in result", polygons.len());
        Solid {
            polygons,
            epsilon: self.epsilon,
        }
    }

    /// Result of an operation with an empty operand, answered without trees.
    fn finish_empty(&self, operation: &str, polygons: Vec<Polygon>) -> Solid {
        debug!(
            "{operation}: empty operand, {} polygons in result",
            polygons.len()
        );
        Solid {
            polygons,
            epsilon: self.epsilon,
        }
    }

    /// Enclosed volume, from the divergence theorem over the fan triangles.
    ///
    /// Only meaningful for closed, outward-oriented solids. An inverted solid
    /// reports a negative volume.
    pub fn volume(&self) -> f32 {
        self.polygons
            .iter()
            .flat_map(|p| p.triangles())
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
            .sum::<f32>()
            / 6.0
    }

    /// Axis-aligned bounds of all vertices, or `None` for an empty solid.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut positions = self
            .polygons
            .iter()
            .flat_map(|p| p.vertices())
            .map(|v| v.pos);

        let first = positions.next()?;
        Some(positions.fold(Aabb::new(first, first), |bounds, p| bounds.grow(p)))
    }

    /// Applies an affine transform to every vertex.
    ///
    /// Positions are transformed by `matrix`; normals by the inverse transpose
    /// of its linear part and renormalized. Mirroring transforms reverse the
    /// winding so the planes keep facing outward. Polygons that a singular
    /// matrix collapses onto a line or point are dropped with a warning.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Solid {
        let normals = normal_matrix(matrix);
        let mirrored = matrix.fixed_view::<3, 3>(0, 0).determinant() < 0.0;

        let polygons = self
            .polygons
            .iter()
            .filter_map(|polygon| {
                let mut vertices: Vec<Vertex> = polygon
                    .vertices()
                    .iter()
                    .map(|v| {
                        Vertex::new(
                            matrix.transform_point(&v.pos),
                            transform_normal(&normals, v.normal),
                        )
                    })
                    .collect();
                if mirrored {
                    vertices.reverse();
                }
                match Polygon::try_new(vertices) {
                    Ok(polygon) => Some(polygon),
                    Err(err) => {
                        warn!("dropping polygon collapsed by transform: {err}");
                        None
                    }
                }
            })
            .collect();

        Solid {
            polygons,
            epsilon: self.epsilon,
        }
    }

    /// Moves the solid by an offset.
    pub fn translate(&self, offset: Vector3<f32>) -> Solid {
        self.transform(&Matrix4::new_translation(&offset))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub mins: Point3<f32>,
    pub maxs: Point3<f32>,
}

impl Aabb {
    pub fn new(mins: Point3<f32>, maxs: Point3<f32>) -> Self {
        Self { mins, maxs }
    }

    /// Returns the box extended to contain `point`.
    pub fn grow(self, point: Point3<f32>) -> Self {
        Self {
            mins: self.mins.inf(&point),
            maxs: self.maxs.sup(&point),
        }
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    pub fn extents(&self) -> Vector3<f32> {
        self.maxs - self.mins
    }
}
