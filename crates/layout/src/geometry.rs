use serde::{Deserialize, Serialize};

pub const NODE_WIDTH: f32 = 140.0;
pub const NODE_HEIGHT: f32 = 45.0;
pub const HORIZONTAL_GAP: f32 = 30.0;
pub const VERTICAL_GAP: f32 = 80.0;
pub const PARTNER_GAP: f32 = 8.0;

/// 2D point with f32 coordinates
///
/// `x` is the horizontal center of a node, `y` the top of its row, growing
/// downwards with the generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a point at the origin
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Node sizes and spacing of a family tree layout
///
/// The defaults are shared with the renderers, changing them breaks the
/// alignment of the drawn boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub node_width: f32,
    pub node_height: f32,
    /// Space between sibling subtrees
    pub horizontal_gap: f32,
    /// Space between two generation rows
    pub vertical_gap: f32,
    /// Space between partners of a family unit
    pub partner_gap: f32,
    /// Extra push added when two nodes of a row overlap
    pub collision_margin: f32,
    /// Space between disconnected trees, in node widths
    pub tree_margin_nodes: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            node_width: NODE_WIDTH,
            node_height: NODE_HEIGHT,
            horizontal_gap: HORIZONTAL_GAP,
            vertical_gap: VERTICAL_GAP,
            partner_gap: PARTNER_GAP,
            collision_margin: 2.0,
            tree_margin_nodes: 2.0,
        }
    }
}

impl Geometry {
    /// Horizontal distance between the centers of two partners
    pub fn partner_step(&self) -> f32 {
        self.node_width + self.partner_gap
    }

    /// Vertical distance between two generations
    pub fn row_height(&self) -> f32 {
        self.node_height + self.vertical_gap
    }

    /// Width of a family unit of `members` partners
    pub fn family_width(&self, members: usize) -> f32 {
        let members = members as f32;
        members * self.node_width + (members - 1.0).max(0.0) * self.partner_gap
    }

    pub fn tree_margin(&self) -> f32 {
        self.tree_margin_nodes * self.node_width
    }
}
