//! Errors raised when validating geometry entering the CSG engine.
//!
//! The boolean operations themselves are total over well-formed input and
//! never fail; these errors only come from the checked constructors and the
//! mesh adapter.

use nalgebra::Point3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CsgError {
    /// A polygon needs at least three vertices
    #[error("polygon has {count} vertices, at least 3 are required")]
    TooFewVertices { count: usize },

    /// A position contains NaN or infinity
    #[error("non-finite coordinate at {0}")]
    NonFiniteCoordinate(Point3<f32>),

    /// The first three vertices are collinear or coincident
    #[error("cannot derive a plane: degenerate vertices starting at {0}")]
    DegeneratePlane(Point3<f32>),

    /// A triangle index points past the end of the vertex buffers
    #[error("vertex index {index} out of bounds for {len} vertices")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Positions and normals must be parallel arrays
    #[error("{positions} positions but {normals} normals")]
    AttributeCountMismatch { positions: usize, normals: usize },
}
