//! Polygon splitting against a plane.

use log::trace;

use crate::{Classification, Plane, PlaneSide, Polygon, Vertex, PLANE_EPSILON};

/// Outcome of splitting a polygon by a plane.
///
/// The polygon is moved into whichever variant applies; nothing is cloned
/// unless it is actually cut.
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    /// Lies on the plane and faces the same way as the plane normal.
    CoplanarFront(Polygon),
    /// Lies on the plane and faces opposite to the plane normal.
    CoplanarBack(Polygon),
    /// Entirely in front of the plane.
    Front(Polygon),
    /// Entirely behind the plane.
    Back(Polygon),
    /// Cut into two pieces. A piece is `None` if it had fewer than 3 vertices.
    Spanning {
        front: Option<Polygon>,
        back: Option<Polygon>,
    },
}

impl Plane {
    /// Splits a polygon by this plane.
    /// Uses the default `PLANE_EPSILON` tolerance.
    #[inline]
    pub fn split_polygon(&self, polygon: Polygon) -> Split {
        self.split_polygon_with_epsilon(polygon, PLANE_EPSILON)
    }

    /// Splits a polygon by this plane, with a custom epsilon.
    ///
    /// # Return values by classification
    ///
    /// - **Coplanar**: `CoplanarFront` if the polygon's normal points the
    ///   same general direction as the plane normal, else `CoplanarBack`
    /// - **Front** / **Back**: the polygon, unmodified
    /// - **Spanning**: the front and back pieces
    pub fn split_polygon_with_epsilon(&self, polygon: Polygon, epsilon: f32) -> Split {
        match self.classify_polygon_with_epsilon(&polygon, epsilon) {
            Classification::Coplanar => {
                if self.normal().dot(&polygon.plane().normal()) > 0.0 {
                    Split::CoplanarFront(polygon)
                } else {
                    Split::CoplanarBack(polygon)
                }
            }
            Classification::Front => Split::Front(polygon),
            Classification::Back => Split::Back(polygon),
            Classification::Spanning => {
                let (front, back) = split_spanning(self, &polygon, epsilon);
                Split::Spanning { front, back }
            }
        }
    }
}

/// Splits a spanning polygon into front and back parts.
///
/// Uses a variant of the Sutherland-Hodgman algorithm:
/// walks the polygon edges and builds two vertex lists,
/// adding intersection points when edges cross the plane.
fn split_spanning(
    plane: &Plane,
    polygon: &Polygon,
    epsilon: f32,
) -> (Option<Polygon>, Option<Polygon>) {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);

    // Classify all vertices upfront
    let sides: Vec<PlaneSide> = vertices
        .iter()
        .map(|v| plane.classify_point_with_epsilon(v.pos, epsilon))
        .collect();

    for i in 0..n {
        let j = (i + 1) % n;
        let (vi, vj) = (&vertices[i], &vertices[j]);
        let (ti, tj) = (sides[i], sides[j]);

        // On-plane vertices go to both sides
        if ti != PlaneSide::Back {
            front_verts.push(vi.clone());
        }
        if ti != PlaneSide::Front {
            back_verts.push(vi.clone());
        }

        let crosses = matches!(
            (ti, tj),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );

        if crosses {
            let t = plane.intersection_parameter(vi.pos, vj.pos);
            let v = vi.interpolate(vj, t);
            front_verts.push(v.clone());
            back_verts.push(v);
        }
    }

    (
        into_fragment(front_verts, polygon),
        into_fragment(back_verts, polygon),
    )
}

/// Builds a piece of `parent`, or drops it if it is degenerate.
fn into_fragment(vertices: Vec<Vertex>, parent: &Polygon) -> Option<Polygon> {
    if vertices.len() >= 3 {
        Some(Polygon::with_plane(vertices, parent.plane().clone()))
    } else {
        trace!("dropping degenerate split fragment with {} vertices", vertices.len());
        None
    }
}
