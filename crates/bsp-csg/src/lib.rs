//! Boolean operations on 3D solids using BSP trees.
//!
//! A [`Solid`] is a soup of convex [`Polygon`]s bounding a closed volume.
//! [`Solid::union`], [`Solid::subtract`] and [`Solid::intersect`] combine two
//! solids by building a BSP [`Node`] tree for each and clipping them against
//! one another.

pub mod bsp;
mod error;
mod mesh;
mod plane;
mod polygon;
mod shapes;
mod solid;
mod split;
mod vertex;

pub use bsp::Node;
pub use error::CsgError;
pub use mesh::IndexedMesh;
pub use plane::{Classification, Plane, PlaneSide, PLANE_EPSILON};
pub use polygon::Polygon;
pub use solid::{Aabb, Solid};
pub use split::Split;
pub use vertex::Vertex;
