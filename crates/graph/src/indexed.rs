use crate::{Genealogy, Person, PersonId, Relation};
use std::collections::{BTreeSet, HashMap};

/// A [`Genealogy`] with the person list and the parent to children lookup
/// computed once
///
/// The provided [`Genealogy::children`] scans every person, which makes whole
/// graph walks quadratic. Algorithms visiting every person wrap their input
/// in this view first.
pub struct Indexed<'g, G> {
    inner: &'g G,
    ids: Vec<PersonId>,
    children: HashMap<PersonId, BTreeSet<PersonId>>,
}

impl<'g, G: Genealogy> Indexed<'g, G> {
    pub fn new(inner: &'g G) -> Self {
        let ids = inner.person_ids();
        let mut children: HashMap<PersonId, BTreeSet<PersonId>> = HashMap::new();

        for &id in &ids {
            for child in inner.related(id, Relation::Child) {
                if child != id && inner.contains(child) {
                    children.entry(id).or_default().insert(child);
                }
            }
            if let Some(person) = inner.person(id) {
                for parent in [person.father, person.mother].into_iter().flatten() {
                    if parent != id {
                        children.entry(parent).or_default().insert(id);
                    }
                }
            }
        }

        Self {
            inner,
            ids,
            children,
        }
    }
}

impl<G: Genealogy> Genealogy for Indexed<'_, G> {
    fn contains(&self, id: PersonId) -> bool {
        self.inner.contains(id)
    }

    fn person(&self, id: PersonId) -> Option<&Person> {
        self.inner.person(id)
    }

    fn person_ids(&self) -> Vec<PersonId> {
        self.ids.clone()
    }

    fn related(&self, id: PersonId, relation: Relation) -> Vec<PersonId> {
        self.inner.related(id, relation)
    }

    fn children(&self, id: PersonId) -> BTreeSet<PersonId> {
        self.children.get(&id).cloned().unwrap_or_default()
    }
}
