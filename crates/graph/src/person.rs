use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Identifier of a person, assigned in increasing order by the store.
///
/// The ordering of ids is the insertion order, and it is used as the
/// tie-break wherever a set of persons has to be walked deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, From, Display,
)]
pub struct PersonId(pub u64);

/// Kind of an edge between two persons
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Symmetric, always stored as a pair of edges
    Partner,
    /// Directed from parent to child
    Child,
}

/// Which parent slot of a child record a parent occupies
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentRole {
    Father,
    Mother,
}

#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub display_name: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    pub label: String,
    pub father: Option<PersonId>,
    pub mother: Option<PersonId>,
    // Dates are free text, genealogical records are often partial ("c. 1850")
    pub birth_date: String,
    pub death_date: String,
    pub notes: String,
    pub documents: Vec<Document>,
}

impl Person {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// The recorded parent for the given slot, which may dangle
    pub fn parent(&self, role: ParentRole) -> Option<PersonId> {
        match role {
            ParentRole::Father => self.father,
            ParentRole::Mother => self.mother,
        }
    }

    pub fn parent_mut(&mut self, role: ParentRole) -> &mut Option<PersonId> {
        match role {
            ParentRole::Father => &mut self.father,
            ParentRole::Mother => &mut self.mother,
        }
    }

    /// Whether `id` is recorded as father or mother of this person
    pub fn has_parent(&self, id: PersonId) -> bool {
        self.father == Some(id) || self.mother == Some(id)
    }
}
