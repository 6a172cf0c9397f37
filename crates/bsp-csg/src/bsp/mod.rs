//! Binary Space Partitioning tree used by the boolean operations.
//!
//! A [`Node`] recursively partitions space using planes taken from the
//! polygons inserted into it. Beyond ordering polygons, the tree gives each
//! region of space a solid or empty meaning: the back side of a leaf plane is
//! solid. That meaning is what the clipping operations rely on:
//!
//! - [`Node::clip_polygons`] removes the parts of a polygon list inside the solid
//! - [`Node::clip_to`] applies that to every polygon stored in another tree
//! - [`Node::invert`] swaps solid and empty space
//!
//! # Example
//!
//! ```ignore
//! use bsp_csg::{Node, Polygon};
//!
//! let a = Node::from_polygons(a_polygons);
//! let mut b = Node::from_polygons(b_polygons);
//!
//! // Drop the parts of b that lie inside a
//! b.clip_to(&a);
//! let outside = b.into_polygons();
//! ```

mod node;

pub use node::Node;
