use crate::{Category, Relationship};
use serde::{Serialize, Serializer};
use std::fmt;

/// Opaque RGB color, displayed as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub const fn hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a person node is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeColors {
    pub fill: Color,
    pub border: Color,
    pub stroke_width: u8,
}

impl NodeColors {
    const fn new(fill: Color, border: Color, stroke_width: u8) -> Self {
        Self {
            fill,
            border,
            stroke_width,
        }
    }
}

pub const EDGE_PARENT: Color = Color::hex(0x4169E1);
pub const EDGE_CHILD: Color = Color::hex(0x228B22);
pub const EDGE_PARTNER: Color = Color::hex(0xFF1493);
pub const EDGE_SIBLING: Color = Color::hex(0x8B008B);
pub const EDGE_EXTENDED: Color = Color::hex(0xFF8C00);
pub const EDGE_DEFAULT: Color = Color::rgb(150, 150, 180);

/// Fill color of each category as shown in the legend
pub const LEGEND: [(Category, Color); 7] = [
    (Category::Myself, Color::hex(0xFFD700)),
    (Category::Parent, Color::hex(0x87CEEB)),
    (Category::Child, Color::hex(0x98FB98)),
    (Category::Partner, Color::hex(0xFFB6C1)),
    (Category::Sibling, Color::hex(0xDDA0DD)),
    (Category::Extended, Color::hex(0xFFD700)),
    (Category::Distant, Color::hex(0xE6E6FA)),
];

/// Node colors of a person with the given relationship and kinship degree
pub fn node_colors(relationship: &Relationship, degree: i32) -> NodeColors {
    match relationship.category() {
        Category::Myself => NodeColors::new(Color::hex(0xFFD700), Color::hex(0x000000), 3),
        Category::Parent => match degree {
            1 => NodeColors::new(Color::hex(0x87CEEB), Color::hex(0x4169E1), 2),
            2 => NodeColors::new(Color::hex(0xB0E0E6), Color::hex(0x5F9EA0), 2),
            _ => {
                let red = fade(200, 10, degree, 135);
                NodeColors::new(Color::rgb(red, 206, 235), Color::hex(0x778899), 1)
            }
        },
        Category::Child => match degree {
            1 => NodeColors::new(Color::hex(0x98FB98), Color::hex(0x228B22), 2),
            2 => NodeColors::new(Color::hex(0x90EE90), Color::hex(0x32CD32), 2),
            _ => {
                let level = fade(250, 15, degree, 144);
                NodeColors::new(Color::rgb(level, 238, level), Color::hex(0x6B8E23), 1)
            }
        },
        Category::Partner => NodeColors::new(Color::hex(0xFFB6C1), Color::hex(0xFF1493), 2),
        Category::Sibling => match degree {
            2 => NodeColors::new(Color::hex(0xDDA0DD), Color::hex(0x8B008B), 2),
            4 => NodeColors::new(Color::hex(0xD8BFD8), Color::hex(0x9370DB), 2),
            _ => NodeColors::new(Color::hex(0xE6E6FA), Color::hex(0x9932CC), 1),
        },
        Category::Extended if degree <= 3 => {
            NodeColors::new(Color::hex(0xFFD700), Color::hex(0xFF8C00), 2)
        }
        Category::Extended => NodeColors::new(Color::hex(0xFFDAB9), Color::hex(0xCD853F), 1),
        Category::Distant => {
            if *relationship == Relationship::Unrelated || degree >= 15 {
                NodeColors::new(Color::hex(0x808080), Color::hex(0xFF0000), 2)
            } else if degree < crate::UNRELATED {
                NodeColors::new(Color::gray(fade(255, 5, degree, 200)), Color::hex(0x696969), 1)
            } else {
                NodeColors::new(Color::hex(0xD3D3D3), Color::hex(0xA9A9A9), 1)
            }
        }
    }
}

/// Color of an edge, from the categories of its two ends
///
/// `focus_end` is the category of the other end when the edge touches the
/// focus person.
pub fn edge_color(source: Category, target: Category, focus_end: Option<Category>) -> Color {
    use Category::*;

    if let Some(other) = focus_end {
        return match other {
            Parent => EDGE_PARENT,
            Child => EDGE_CHILD,
            Partner => EDGE_PARTNER,
            Sibling => EDGE_SIBLING,
            Extended => EDGE_EXTENDED,
            Myself | Distant => EDGE_DEFAULT,
        };
    }

    match (source, target) {
        (Parent, Parent) => EDGE_PARTNER,
        (Parent, Child) | (Child, Parent) => EDGE_PARENT,
        (Sibling, Sibling) => EDGE_SIBLING,
        (Child, Child) => EDGE_CHILD,
        (Partner, _) | (_, Partner) => EDGE_PARTNER,
        (Extended, _) | (_, Extended) => EDGE_EXTENDED,
        _ => EDGE_DEFAULT,
    }
}

/// `start - step * degree`, never below `floor`
fn fade(start: i32, step: i32, degree: i32, floor: i32) -> u8 {
    start
        .saturating_sub(step.saturating_mul(degree))
        .clamp(floor, 255) as u8
}
