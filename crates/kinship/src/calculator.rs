use crate::ancestry::{self, Lineage};
use crate::palette::{self, Color, NodeColors};
use crate::relationship::Facts;
use crate::{Category, Locale, Relationship};
use lineage_graph::{Genealogy, ParentRole, PersonId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::trace;

/// Everything known about a person as seen from the focus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kinship {
    pub person: PersonId,
    pub category: Category,
    pub relationship: Relationship,
    pub label: String,
    pub generation: i32,
    pub degree: i32,
    pub colors: NodeColors,
}

/// Kinship queries over a borrowed family graph
///
/// Generations and relationships are cached per ordered pair. The graph is
/// borrowed for the lifetime of the calculator, so the caches cannot outlive
/// an edit; [`KinshipCalculator::clear_cache`] is there for stores with
/// interior mutability.
pub struct KinshipCalculator<'g, G> {
    graph: &'g G,
    generation_cache: HashMap<(PersonId, PersonId), i32>,
    relationship_cache: HashMap<(PersonId, PersonId), Relationship>,
}

impl<'g, G: Genealogy> KinshipCalculator<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            generation_cache: HashMap::new(),
            relationship_cache: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn clear_cache(&mut self) {
        self.generation_cache.clear();
        self.relationship_cache.clear();
    }

    /// Every proper ancestor of `person` with its distance in parent hops
    pub fn ancestors_with_depth(&self, person: PersonId) -> BTreeMap<PersonId, i32> {
        ancestry::ancestors_with_depth(self.graph, person)
    }

    /// Signed generation of `person` relative to `focus`, negative for
    /// ancestors and [`UNRELATED`](crate::UNRELATED) without a common ancestor
    pub fn generation_level(&mut self, focus: PersonId, person: PersonId) -> i32 {
        if let Some(&generation) = self.generation_cache.get(&(focus, person)) {
            return generation;
        }

        let generation = Lineage::between(self.graph, focus, person).generation();
        self.generation_cache.insert((focus, person), generation);
        generation
    }

    /// Number of parent links between two persons through their nearest
    /// common ancestor, [`UNRELATED`](crate::UNRELATED) without one
    pub fn degree_of_relationship(&self, focus: PersonId, person: PersonId) -> i32 {
        Lineage::between(self.graph, focus, person).degree()
    }

    /// Persons sharing parents with `person`
    ///
    /// With both parents known, siblings must have the same two parents.
    /// With a single known parent, any person with that parent in the same
    /// slot counts.
    pub fn siblings(&self, person: PersonId) -> BTreeSet<PersonId> {
        let father = self.graph.father(person);
        let mother = self.graph.mother(person);

        let matches = |other: PersonId| match (father, mother) {
            (Some(_), Some(_)) => {
                self.graph.father(other) == father && self.graph.mother(other) == mother
            }
            (Some(_), None) => self.graph.father(other) == father,
            (None, Some(_)) => self.graph.mother(other) == mother,
            (None, None) => false,
        };

        self.graph
            .person_ids()
            .into_iter()
            .filter(|&other| other != person && matches(other))
            .collect()
    }

    /// Explicit partners plus the other parents of shared children
    pub fn partners(&self, person: PersonId) -> BTreeSet<PersonId> {
        self.graph.partners(person)
    }

    /// Relationship of `person` as seen from `focus`
    pub fn relationship_type(&mut self, focus: PersonId, person: PersonId) -> Relationship {
        if focus == person {
            return Relationship::Myself;
        }
        if let Some(&relationship) = self.relationship_cache.get(&(focus, person)) {
            return relationship;
        }

        let lineage = Lineage::between(self.graph, focus, person);
        let generation = self.generation_level(focus, person);
        let role = [ParentRole::Father, ParentRole::Mother]
            .into_iter()
            .find(|&role| self.graph.parent(focus, role) == Some(person));

        let facts = Facts {
            same: false,
            partner: self.partners(focus).contains(&person),
            sibling: self.siblings(focus).contains(&person),
            generation,
            degree: lineage.degree(),
            role,
        };
        let relationship = Relationship::classify(&facts);
        trace!("{person} is {relationship:?} of {focus} ({facts:?})");

        self.relationship_cache.insert((focus, person), relationship);
        relationship
    }

    /// Fill, border and stroke width of the node of `person`
    pub fn node_color(&mut self, focus: PersonId, person: PersonId) -> NodeColors {
        let relationship = self.relationship_type(focus, person);
        palette::node_colors(&relationship, self.degree_of_relationship(focus, person))
    }

    /// Color of the edge between `source` and `target`
    pub fn edge_color(&mut self, focus: PersonId, source: PersonId, target: PersonId) -> Color {
        let source_category = self.relationship_type(focus, source).category();
        let target_category = self.relationship_type(focus, target).category();

        let focus_end = if source == focus {
            Some(target_category)
        } else if target == focus {
            Some(source_category)
        } else {
            None
        };

        palette::edge_color(source_category, target_category, focus_end)
    }

    /// Full description of `person` as seen from `focus`
    pub fn kinship(&mut self, focus: PersonId, person: PersonId, locale: Locale) -> Kinship {
        let relationship = self.relationship_type(focus, person);
        let degree = self.degree_of_relationship(focus, person);

        Kinship {
            person,
            category: relationship.category(),
            relationship,
            label: relationship.label(locale),
            generation: self.generation_level(focus, person),
            degree,
            colors: palette::node_colors(&relationship, degree),
        }
    }
}
