use crate::{ParentRole, Person, PersonId, Relation};
use std::collections::BTreeSet;

/// Read-only view over a family graph.
///
/// Implementors only need to expose node lookup and typed edge iteration;
/// everything else is derived. Child edges and the father/mother attributes
/// are redundant, and neither is trusted to be complete, so the derived
/// helpers consult both.
pub trait Genealogy {
    /// Whether the person exists in the graph
    fn contains(&self, id: PersonId) -> bool;

    /// The record of a person
    fn person(&self, id: PersonId) -> Option<&Person>;

    /// Every person id, in ascending order
    fn person_ids(&self) -> Vec<PersonId>;

    /// Targets of the outgoing edges of `id` with the given relation
    fn related(&self, id: PersonId, relation: Relation) -> Vec<PersonId>;

    /// The recorded parent for the given slot, if it exists in the graph
    fn parent(&self, id: PersonId, role: ParentRole) -> Option<PersonId> {
        self.person(id)
            .and_then(|p| p.parent(role))
            .filter(|&parent| self.contains(parent))
    }

    fn father(&self, id: PersonId) -> Option<PersonId> {
        self.parent(id, ParentRole::Father)
    }

    fn mother(&self, id: PersonId) -> Option<PersonId> {
        self.parent(id, ParentRole::Mother)
    }

    /// Father then mother, skipping missing and dangling ones
    fn parents(&self, id: PersonId) -> Vec<PersonId> {
        self.father(id).into_iter().chain(self.mother(id)).collect()
    }

    /// Children through child edges or through the father/mother attributes
    fn children(&self, id: PersonId) -> BTreeSet<PersonId> {
        let mut children: BTreeSet<_> = self
            .related(id, Relation::Child)
            .into_iter()
            .filter(|&c| c != id && self.contains(c))
            .collect();

        for other in self.person_ids() {
            if other != id && self.person(other).is_some_and(|p| p.has_parent(id)) {
                children.insert(other);
            }
        }

        children
    }

    /// Explicit partners plus every other parent of a shared child
    fn partners(&self, id: PersonId) -> BTreeSet<PersonId> {
        let mut partners: BTreeSet<_> = self
            .related(id, Relation::Partner)
            .into_iter()
            .filter(|&p| p != id && self.contains(p))
            .collect();

        for child in self.children(id) {
            partners.extend(self.parents(child).into_iter().filter(|&p| p != id));
        }

        partners
    }

    /// A person without any known parent in the graph
    fn is_effective_root(&self, id: PersonId) -> bool {
        self.father(id).is_none() && self.mother(id).is_none()
    }
}
