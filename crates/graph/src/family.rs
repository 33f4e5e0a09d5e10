use crate::{Document, GraphError, Genealogy, ParentRole, Person, PersonId, Relation};
use petgraph::graphmap::DiGraphMap;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// In-memory family graph: person records stored by id, relations as edges
#[derive(Debug, Clone)]
pub struct FamilyGraph {
    pub(crate) persons: BTreeMap<PersonId, Person>,
    pub(crate) edges: DiGraphMap<PersonId, Relation>,
    pub(crate) next_id: u64,
}

impl Default for FamilyGraph {
    fn default() -> Self {
        Self {
            persons: BTreeMap::new(),
            edges: DiGraphMap::new(),
            next_id: 1,
        }
    }
}

impl FamilyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Person records in id order
    pub fn persons(&self) -> impl Iterator<Item = (PersonId, &Person)> + '_ {
        self.persons.iter().map(|(&id, p)| (id, p))
    }

    pub fn add_person(&mut self, label: impl Into<String>) -> PersonId {
        self.insert_person(Person::new(label))
    }

    /// Insert a full record under a freshly assigned id
    pub fn insert_person(&mut self, person: Person) -> PersonId {
        let id = PersonId(self.next_id);
        self.next_id += 1;
        debug!("Adding person {id} ({})", person.label);
        self.persons.insert(id, person);
        self.edges.add_node(id);
        id
    }

    /// Insert a record under a known id, used when loading stored trees
    pub(crate) fn insert_with_id(&mut self, id: PersonId, person: Person) {
        self.next_id = self.next_id.max(id.0 + 1);
        self.persons.insert(id, person);
        self.edges.add_node(id);
    }

    pub fn person_mut(&mut self, id: PersonId) -> Result<&mut Person, GraphError> {
        self.persons
            .get_mut(&id)
            .ok_or(GraphError::PersonNotFound(id))
    }

    pub fn set_label(&mut self, id: PersonId, label: impl Into<String>) -> Result<(), GraphError> {
        let person = self.person_mut(id)?;
        let label = label.into();
        if person.label != label {
            debug!("Renaming {id}: {} -> {label}", person.label);
            person.label = label;
        }
        Ok(())
    }

    pub fn set_birth_date(
        &mut self,
        id: PersonId,
        date: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.person_mut(id)?.birth_date = date.into();
        Ok(())
    }

    pub fn set_death_date(
        &mut self,
        id: PersonId,
        date: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.person_mut(id)?.death_date = date.into();
        Ok(())
    }

    pub fn set_notes(&mut self, id: PersonId, notes: impl Into<String>) -> Result<(), GraphError> {
        self.person_mut(id)?.notes = notes.into();
        Ok(())
    }

    /// Attach a document, ignoring a filename that is already attached
    pub fn add_document(&mut self, id: PersonId, document: Document) -> Result<(), GraphError> {
        let person = self.person_mut(id)?;
        if !person
            .documents
            .iter()
            .any(|d| d.filename == document.filename)
        {
            person.documents.push(document);
        }
        Ok(())
    }

    pub fn remove_document(&mut self, id: PersonId, filename: &str) -> Result<(), GraphError> {
        self.person_mut(id)?
            .documents
            .retain(|d| d.filename != filename);
        Ok(())
    }

    /// Remove a person with all its edges, and clear the parent slots that
    /// pointed to it
    pub fn remove_person(&mut self, id: PersonId) -> Result<Person, GraphError> {
        let person = self
            .persons
            .remove(&id)
            .ok_or(GraphError::PersonNotFound(id))?;

        for other in self.persons.values_mut() {
            if other.father == Some(id) {
                other.father = None;
            }
            if other.mother == Some(id) {
                other.mother = None;
            }
        }
        self.edges.remove_node(id);

        debug!("Removed person {id} ({})", person.label);
        Ok(person)
    }

    /// Record `parent` in the given slot of `child` and add the child edge
    pub fn add_parent(
        &mut self,
        child: PersonId,
        parent: PersonId,
        role: ParentRole,
    ) -> Result<(), GraphError> {
        self.check_pair(child, parent)?;
        *self.person_mut(child)?.parent_mut(role) = Some(parent);
        self.link(parent, child, Relation::Child);
        Ok(())
    }

    /// Add a child edge, filling the first free parent slot of the child
    /// (father first). When both slots are taken only the edge is added.
    pub fn add_child(&mut self, parent: PersonId, child: PersonId) -> Result<(), GraphError> {
        self.check_pair(parent, child)?;
        let record = self.person_mut(child)?;
        if record.father.is_none() {
            record.father = Some(parent);
        } else if record.mother.is_none() {
            record.mother = Some(parent);
        }
        self.link(parent, child, Relation::Child);
        Ok(())
    }

    /// Link two persons as partners, in both directions
    pub fn add_partner(&mut self, a: PersonId, b: PersonId) -> Result<(), GraphError> {
        self.check_pair(a, b)?;
        self.link(a, b, Relation::Partner);
        self.link(b, a, Relation::Partner);
        Ok(())
    }

    /// Add a single directed edge, without touching the person records
    pub fn add_edge(
        &mut self,
        from: PersonId,
        to: PersonId,
        relation: Relation,
    ) -> Result<(), GraphError> {
        self.check_pair(from, to)?;
        self.link(from, to, relation);
        Ok(())
    }

    /// Store the edge `from -> to`, returning the relation it replaced
    ///
    /// Only one edge is kept per ordered pair, a partner and a child link
    /// between the same two persons cannot coexist.
    fn link(&mut self, from: PersonId, to: PersonId, relation: Relation) -> Option<Relation> {
        let replaced = self.edges.add_edge(from, to, relation);
        if let Some(old) = replaced.filter(|&old| old != relation) {
            warn!("Edge {from} -> {to} was {old:?}, replaced by {relation:?}");
        }
        replaced
    }

    pub fn edges(&self) -> impl Iterator<Item = (PersonId, PersonId, Relation)> + '_ {
        self.edges.all_edges().map(|(a, b, &r)| (a, b, r))
    }

    fn check_pair(&self, a: PersonId, b: PersonId) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfRelation(a));
        }
        for id in [a, b] {
            if !self.persons.contains_key(&id) {
                return Err(GraphError::PersonNotFound(id));
            }
        }
        Ok(())
    }

    /// The six-person lineage used throughout the tests and demos:
    /// Adam and Eve, their sons Cain, Abel and Seth, and Seth's son Enosh.
    pub fn sample() -> Self {
        let mut graph = Self::new();
        let adam = graph.add_person("Adam");
        let eve = graph.add_person("Eve");
        let cain = graph.add_person("Cain");
        let abel = graph.add_person("Abel");
        let seth = graph.add_person("Seth");
        let enosh = graph.add_person("Enosh");

        graph
            .add_partner(adam, eve)
            .expect("sample ids are distinct");
        for child in [cain, abel, seth] {
            graph
                .add_parent(child, adam, ParentRole::Father)
                .expect("sample ids are distinct");
            graph
                .add_parent(child, eve, ParentRole::Mother)
                .expect("sample ids are distinct");
        }
        graph
            .add_parent(enosh, seth, ParentRole::Father)
            .expect("sample ids are distinct");

        graph
    }
}

impl Genealogy for FamilyGraph {
    fn contains(&self, id: PersonId) -> bool {
        self.persons.contains_key(&id)
    }

    fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    fn person_ids(&self) -> Vec<PersonId> {
        self.persons.keys().copied().collect()
    }

    fn related(&self, id: PersonId, relation: Relation) -> Vec<PersonId> {
        if !self.edges.contains_node(id) {
            return Vec::new();
        }
        let mut related: Vec<_> = self
            .edges
            .edges(id)
            .filter(|(_, _, r)| **r == relation)
            .map(|(_, to, _)| to)
            .collect();
        related.sort();
        related
    }
}
