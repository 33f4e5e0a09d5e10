//! Kinship between persons of a family graph
//!
//! Given a focus person, [`KinshipCalculator`] answers how far every other
//! person is (generation and degree through the nearest common ancestor),
//! what to call it and how to paint it.
//!
//! ```
//! use lineage_graph::{FamilyGraph, PersonId};
//! use lineage_kinship::{Category, KinshipCalculator, Locale};
//!
//! let graph = FamilyGraph::sample();
//! let mut calc = KinshipCalculator::new(&graph);
//!
//! // Enosh is the son of Seth, a brother of Cain
//! let kinship = calc.kinship(PersonId(3), PersonId(6), Locale::English);
//! assert_eq!(kinship.category, Category::Extended);
//! assert_eq!(kinship.label, "niece/nephew");
//! assert_eq!(kinship.colors.fill.to_string(), "#FFD700");
//! ```

mod ancestry;
mod calculator;
mod palette;
mod relationship;

pub use ancestry::{ancestors_with_depth, UNRELATED};
pub use calculator::{Kinship, KinshipCalculator};
pub use palette::{
    edge_color, node_colors, Color, NodeColors, EDGE_CHILD, EDGE_DEFAULT, EDGE_EXTENDED,
    EDGE_PARENT, EDGE_PARTNER, EDGE_SIBLING, LEGEND,
};
pub use relationship::{Category, Locale, Relationship};
