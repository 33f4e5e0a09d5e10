//! Family graph model
//!
//! Persons are stored by value under a [`PersonId`], partner and child
//! relations are typed edges. Algorithms only ever see the read-only
//! [`Genealogy`] trait, so any store can feed them.
//!
//! ```
//! use lineage_graph::{FamilyGraph, Genealogy, ParentRole};
//!
//! let mut graph = FamilyGraph::new();
//! let father = graph.add_person("Father");
//! let son = graph.add_person("Son");
//! graph.add_parent(son, father, ParentRole::Father).unwrap();
//!
//! assert_eq!(graph.parents(son), vec![father]);
//! assert!(graph.children(father).contains(&son));
//! ```

mod family;
mod genealogy;
mod indexed;
mod person;

pub mod ser;

pub use family::FamilyGraph;
pub use genealogy::Genealogy;
pub use indexed::Indexed;
pub use person::{Document, ParentRole, Person, PersonId, Relation};

use thiserror::Error;

/// Errors raised while editing or loading a family graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("person {0} not found")]
    PersonNotFound(PersonId),

    #[error("person {0} cannot be related to itself")]
    SelfRelation(PersonId),

    #[error("invalid person id {0:?}")]
    InvalidId(String),

    #[error("malformed node-link document: {0}")]
    Json(#[from] serde_json::Error),
}
