//! BSP tree node implementation.

use log::trace;

use crate::{Plane, Polygon, Split, PLANE_EPSILON};

/// A node in the BSP tree.
///
/// Each node partitions space using a splitting plane and stores polygons
/// that are coplanar with that plane. Polygons on the front or back of the
/// plane are stored in the respective child subtrees.
///
/// A node without a plane is empty: it has no polygons and no children.
/// A node without a back child stands for solid space behind its plane,
/// which is what makes [`Node::clip_polygons`] discard fragments there.
///
/// # Traversal
///
/// Every operation walks the tree with an explicit work stack, so the
/// depth of an unbalanced tree is bounded by memory rather than by the
/// thread's call stack. Flattening order is pre-order: a node's own
/// polygons, then its front subtree, then its back subtree.
#[derive(Debug, Clone)]
pub struct Node {
    /// The splitting plane, adopted from the first polygon built into this node.
    plane: Option<Plane>,

    /// Polygons coplanar with the plane, facing either way.
    polygons: Vec<Polygon>,

    /// Subtree for the half-space in FRONT of the splitting plane.
    front: Option<Box<Node>>,

    /// Subtree for the half-space BEHIND the splitting plane.
    back: Option<Box<Node>>,

    /// Classification tolerance used when splitting against this subtree.
    epsilon: f32,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Creates an empty node using the default `PLANE_EPSILON` tolerance.
    pub fn new() -> Self {
        Self::with_epsilon(PLANE_EPSILON)
    }

    /// Creates an empty node with a custom classification tolerance.
    ///
    /// Children created while building inherit the same tolerance.
    pub fn with_epsilon(epsilon: f32) -> Self {
        Self {
            plane: None,
            polygons: Vec::new(),
            front: None,
            back: None,
            epsilon,
        }
    }

    /// Builds a tree from a list of polygons.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::new();
        node.build(polygons);
        node
    }

    /// Returns the splitting plane, or `None` for an empty node.
    #[inline]
    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Returns the polygons stored at this node.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&Node> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&Node> {
        self.back.as_deref()
    }

    /// Returns the classification tolerance.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns `true` if nothing has been built into this node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plane.is_none()
    }

    /// Inserts polygons into the tree.
    ///
    /// An empty node adopts the plane of the first polygon. Each polygon is
    /// then split against the node's plane: coplanar pieces stay here,
    /// the rest go down into front and back children, created on demand.
    /// Calling this on an already-built tree extends it in place.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack: Vec<(&mut Node, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, incoming)) = stack.pop() {
            let Some(first) = incoming.first() else {
                continue;
            };

            let Node {
                plane,
                polygons,
                front,
                back,
                epsilon,
            } = node;
            let epsilon = *epsilon;
            let plane: &Plane = plane.get_or_insert_with(|| first.plane().clone());

            let mut front_list = Vec::new();
            let mut back_list = Vec::new();

            for polygon in incoming {
                match plane.split_polygon_with_epsilon(polygon, epsilon) {
                    Split::CoplanarFront(p) | Split::CoplanarBack(p) => polygons.push(p),
                    Split::Front(p) => front_list.push(p),
                    Split::Back(p) => back_list.push(p),
                    Split::Spanning { front: f, back: b } => {
                        front_list.extend(f);
                        back_list.extend(b);
                    }
                }
            }

            if !front_list.is_empty() {
                let child = front.get_or_insert_with(|| Box::new(Node::with_epsilon(epsilon)));
                stack.push((child.as_mut(), front_list));
            }
            if !back_list.is_empty() {
                let child = back.get_or_insert_with(|| Box::new(Node::with_epsilon(epsilon)));
                stack.push((child.as_mut(), back_list));
            }
        }
    }

    /// Removes every part of `polygons` that lies inside the solid this tree represents.
    ///
    /// Pieces in front of a plane are passed to the front child, or kept if
    /// there is none. Pieces behind a plane are passed to the back child, or
    /// dropped if there is none. An empty node returns the input unchanged.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::with_capacity(polygons.len());
        let mut stack: Vec<(&Node, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, incoming)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                result.extend(incoming);
                continue;
            };

            let mut front_list = Vec::new();
            let mut back_list = Vec::new();

            for polygon in incoming {
                match plane.split_polygon_with_epsilon(polygon, node.epsilon) {
                    Split::CoplanarFront(p) | Split::Front(p) => front_list.push(p),
                    Split::CoplanarBack(p) | Split::Back(p) => back_list.push(p),
                    Split::Spanning { front: f, back: b } => {
                        front_list.extend(f);
                        back_list.extend(b);
                    }
                }
            }

            // Back is pushed first so the front subtree's output comes first
            match node.back.as_deref() {
                Some(back) => stack.push((back, back_list)),
                None if !back_list.is_empty() => {
                    trace!("clipped {} polygons in solid space", back_list.len());
                }
                None => {}
            }
            match node.front.as_deref() {
                Some(front) => stack.push((front, front_list)),
                None => result.extend(front_list),
            }
        }

        result
    }

    /// Removes from this tree every polygon piece that lies inside `other`.
    ///
    /// Each node's own polygons are clipped against the whole of `other`.
    pub fn clip_to(&mut self, other: &Node) {
        let mut stack: Vec<&mut Node> = vec![self];

        while let Some(node) = stack.pop() {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);

            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Converts solid space to empty space and vice versa, for the whole subtree.
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut Node> = vec![self];

        while let Some(node) = stack.pop() {
            node.polygons.iter_mut().for_each(Polygon::flip);
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);

            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Collects clones of all polygons in the subtree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::with_capacity(self.polygon_count());
        let mut stack: Vec<&Node> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());
            if let Some(back) = node.back.as_deref() {
                stack.push(back);
            }
            if let Some(front) = node.front.as_deref() {
                stack.push(front);
            }
        }

        result
    }

    /// Consumes the tree, returning all of its polygons in the same order
    /// as [`Node::all_polygons`].
    pub fn into_polygons(mut self) -> Vec<Polygon> {
        let mut result = std::mem::take(&mut self.polygons);
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.back.take());
        stack.extend(self.front.take());

        while let Some(mut node) = stack.pop() {
            result.append(&mut node.polygons);
            stack.extend(node.back.take());
            stack.extend(node.front.take());
        }

        result
    }

    /// Returns the total number of polygons in this subtree (including all descendants).
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = vec![self];

        while let Some(node) = stack.pop() {
            count += node.polygons.len();
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }

        count
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node, usize)> = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(front) = node.front.as_deref() {
                stack.push((front, depth + 1));
            }
            if let Some(back) = node.back.as_deref() {
                stack.push((back, depth + 1));
            }
        }

        max_depth
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Detach children first so deep trees are freed without recursion
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}
