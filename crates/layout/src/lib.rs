//! Family tree layout
//!
//! This crate computes 2D positions for the persons of a family graph,
//! relative to a focus person. It works with any store implementing
//! [`Genealogy`](lineage_graph::Genealogy).
//!
//! # Layout Engines
//!
//! - [`FamilyTreeLayout`]: top-down layout, one row per generation, parents
//!   centered above their children
//!
//! # Example
//!
//! ```
//! use lineage_graph::{FamilyGraph, PersonId};
//! use lineage_layout::{FamilyTreeLayout, GenerationResolver, LayoutEngine};
//!
//! let graph = FamilyGraph::sample();
//! let focus = PersonId(6);
//!
//! // Generations alone, relative to the focus
//! let generations = GenerationResolver.resolve(&graph, focus);
//! assert_eq!(generations[&PersonId(1)], -2);
//!
//! // Positions, falling back to a single node if anything goes wrong
//! let engine = FamilyTreeLayout::default();
//! let positions = engine.layout(&graph, focus).unwrap();
//! assert_eq!(positions.len(), 6);
//!
//! // Or with the error surfaced
//! let positions = engine.try_layout(&graph, focus).unwrap();
//! ```

mod engine;
mod generations;
mod geometry;

pub mod family;

pub use engine::LayoutEngine;
pub use generations::GenerationResolver;
pub use geometry::{
    Geometry, Point, HORIZONTAL_GAP, NODE_HEIGHT, NODE_WIDTH, PARTNER_GAP, VERTICAL_GAP,
};

pub use family::{FamilyTreeLayout, LayoutError};
