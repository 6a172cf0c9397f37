//! Interactive walking of a BSP node tree.

use bsp_csg::{Node, PlaneSide};
use macroquad::prelude::*;
use nalgebra::Point3;

use crate::draw_polygon;

/// Direction taken at each node in the navigation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Front,
    Back,
}

/// Tracks the path from the root to the node being inspected.
#[derive(Debug, Default)]
pub struct TreeNavigator {
    path: Vec<Direction>,
}

impl TreeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Steps into the front child. Returns true if it exists.
    pub fn go_front(&mut self, root: &Node) -> bool {
        if self.current_node(root).and_then(Node::front).is_some() {
            self.path.push(Direction::Front);
            return true;
        }
        false
    }

    /// Steps into the back child. Returns true if it exists.
    pub fn go_back(&mut self, root: &Node) -> bool {
        if self.current_node(root).and_then(Node::back).is_some() {
            self.path.push(Direction::Back);
            return true;
        }
        false
    }

    /// Returns false when already at the root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Handles the F/B/P/R keys. Returns true if the position changed.
    pub fn update(&mut self, root: &Node) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::F) {
            changed = self.go_front(root);
        }
        if is_key_pressed(KeyCode::B) {
            changed = self.go_back(root);
        }
        if is_key_pressed(KeyCode::P) {
            changed = self.go_parent();
        }
        if is_key_pressed(KeyCode::R) && !self.path.is_empty() {
            self.go_root();
            changed = true;
        }

        changed
    }

    /// The node at the end of the path, or None if the path no longer fits the tree.
    pub fn current_node<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        let mut current = root;
        for dir in &self.path {
            current = match dir {
                Direction::Front => current.front()?,
                Direction::Back => current.back()?,
            };
        }
        Some(current)
    }

    /// Renders the polygons of the current subtree back to front.
    pub fn render(&self, root: &Node, eye: Point3<f32>) {
        if let Some(node) = self.current_node(root) {
            render_back_to_front(node, eye);
        }
    }

    /// Draws the navigation overlay.
    pub fn draw_ui(&self, root: &Node, y_offset: f32) {
        let (subtree_polygons, own_polygons, has_front, has_back, is_leaf) =
            match self.current_node(root) {
                Some(node) => (
                    node.polygon_count(),
                    node.polygons().len(),
                    node.front().is_some(),
                    node.back().is_some(),
                    node.is_leaf(),
                ),
                None => (0, 0, false, false, true),
            };

        let path_str = if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path
                .iter()
                .map(|d| match d {
                    Direction::Front => "F",
                    Direction::Back => "B",
                })
                .collect::<Vec<_>>()
                .join(" -> ")
        };

        draw_text(
            &format!("Subtree: {subtree_polygons} polygons ({own_polygons} on this plane)"),
            10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!("Path: {} (depth {})", path_str, self.path.len()),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        draw_text(
            &format!(
                "Children: {}{}{}",
                if has_front { "[F]ront " } else { "" },
                if has_back { "[B]ack " } else { "" },
                if is_leaf { "(leaf)" } else { "" }
            ),
            10.0,
            y_offset + 40.0,
            18.0,
            if is_leaf { ORANGE } else { GREEN },
        );
        draw_text("[P]arent | [R]oot", 10.0, y_offset + 60.0, 16.0, DARKGRAY);
    }
}

/// Draws a subtree so that polygons nearer the eye come last.
fn render_back_to_front(root: &Node, eye: Point3<f32>) {
    enum Step<'a> {
        Visit(&'a Node),
        Draw(&'a Node),
    }

    let mut stack = vec![Step::Visit(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Draw(node) => {
                for polygon in node.polygons() {
                    draw_polygon(polygon);
                }
            }
            Step::Visit(node) => {
                let eye_in_front = node
                    .plane()
                    .is_none_or(|plane| plane.classify_point(eye) != PlaneSide::Back);
                let (near, far) = if eye_in_front {
                    (node.front(), node.back())
                } else {
                    (node.back(), node.front())
                };

                // Popped in reverse: far side, this plane, near side
                stack.extend(near.map(Step::Visit));
                stack.push(Step::Draw(node));
                stack.extend(far.map(Step::Visit));
            }
        }
    }
}
