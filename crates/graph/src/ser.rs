//! Node-link JSON documents.
//!
//! Trees are stored as a list of nodes carrying the person attributes and a
//! list of typed links. Ids are written as decimal strings, which is what the
//! existing `family.tree` files contain; plain numbers are accepted on read.

use crate::{Document, FamilyGraph, GraphError, Person, PersonId, Relation};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn parse(&self) -> Result<PersonId, GraphError> {
        match self {
            RawId::Number(n) => Ok(PersonId(*n)),
            RawId::Text(s) => s
                .trim()
                .parse()
                .map(PersonId)
                .map_err(|_| GraphError::InvalidId(s.clone())),
        }
    }
}

impl From<PersonId> for RawId {
    fn from(id: PersonId) -> Self {
        RawId::Text(id.0.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRecord {
    id: RawId,
    #[serde(default)]
    label: String,
    #[serde(default)]
    father: Option<RawId>,
    #[serde(default)]
    mother: Option<RawId>,
    #[serde(default)]
    birth_date: String,
    #[serde(default)]
    death_date: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinkRecord {
    source: RawId,
    target: RawId,
    #[serde(rename = "type")]
    relation: Option<Relation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeLinkDocument {
    #[serde(default = "directed")]
    directed: bool,
    #[serde(default)]
    multigraph: bool,
    #[serde(default)]
    graph: serde_json::Map<String, serde_json::Value>,
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    links: Vec<LinkRecord>,
}

fn directed() -> bool {
    true
}

/// Parent ids are kept even when they dangle, an empty string means unset
/// and an unreadable one is dropped
fn parse_parent(raw: &Option<RawId>, child: PersonId) -> Option<PersonId> {
    match raw {
        None => None,
        Some(RawId::Text(s)) if s.trim().is_empty() => None,
        Some(raw) => raw
            .parse()
            .map_err(|e| warn!("Dropping parent of {child}: {e}"))
            .ok(),
    }
}

impl FamilyGraph {
    pub fn from_node_link_str(json: &str) -> Result<Self, GraphError> {
        let document: NodeLinkDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_node_link_reader(reader: impl Read) -> Result<Self, GraphError> {
        let document: NodeLinkDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn to_node_link_string(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn write_node_link(&self, writer: impl Write) -> Result<(), GraphError> {
        serde_json::to_writer_pretty(writer, &self.to_document())?;
        Ok(())
    }

    fn from_document(document: NodeLinkDocument) -> Result<Self, GraphError> {
        let mut graph = FamilyGraph::new();

        for node in document.nodes {
            let id = match node.id.parse() {
                Ok(id) => id,
                Err(e) => {
                    warn!("Skipping node {:?}: {e}", node.label);
                    continue;
                }
            };
            let person = Person {
                father: parse_parent(&node.father, id),
                mother: parse_parent(&node.mother, id),
                label: node.label,
                birth_date: node.birth_date,
                death_date: node.death_date,
                notes: node.notes,
                documents: node.documents,
            };
            graph.insert_with_id(id, person);
        }

        for link in document.links {
            let (source, target) = match (link.source.parse(), link.target.parse()) {
                (Ok(source), Ok(target)) => (source, target),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Skipping link: {e}");
                    continue;
                }
            };
            let Some(relation) = link.relation else {
                warn!("Ignoring untyped link {source} -> {target}");
                continue;
            };
            if let Err(e) = graph.add_edge(source, target, relation) {
                warn!("Ignoring link {source} -> {target}: {e}");
            }
        }

        debug!(
            "Loaded {} persons, next id is {}",
            graph.len(),
            graph.next_id
        );
        Ok(graph)
    }

    fn to_document(&self) -> NodeLinkDocument {
        let nodes = self
            .persons()
            .map(|(id, p)| NodeRecord {
                id: id.into(),
                label: p.label.clone(),
                father: p.father.map(RawId::from),
                mother: p.mother.map(RawId::from),
                birth_date: p.birth_date.clone(),
                death_date: p.death_date.clone(),
                notes: p.notes.clone(),
                documents: p.documents.clone(),
            })
            .collect();

        let mut edges: Vec<_> = self.edges().collect();
        edges.sort_by_key(|&(source, target, _)| (source, target));
        let links = edges
            .into_iter()
            .map(|(source, target, relation)| LinkRecord {
                source: source.into(),
                target: target.into(),
                relation: Some(relation),
            })
            .collect();

        NodeLinkDocument {
            directed: true,
            multigraph: false,
            graph: Default::default(),
            nodes,
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Genealogy;
    use pretty_assertions::assert_eq;
    use test_log::test;

    const STORED: &str = r#"{
        "directed": true,
        "multigraph": false,
        "graph": {},
        "nodes": [
            {"label": "Adam", "documents": [], "birth_date": "", "notes": "", "id": "1"},
            {"label": "Eve", "documents": [], "birth_date": "", "notes": "", "id": "2"},
            {"label": "Cain", "documents": [], "birth_date": "", "notes": "",
             "father": "1", "mother": "2", "id": "3"},
            {"label": "Lost", "father": "99", "mother": null, "id": "7"}
        ],
        "links": [
            {"type": "partner", "source": "1", "target": "2"},
            {"type": "partner", "source": "2", "target": "1"},
            {"type": "child", "source": "1", "target": "3"},
            {"type": "child", "source": "2", "target": "3"},
            {"source": "1", "target": "7"},
            {"type": "child", "source": "1", "target": "55"}
        ]
    }"#;

    #[test]
    fn test_load_stored_tree() {
        let graph = FamilyGraph::from_node_link_str(STORED).unwrap();
        let [adam, eve, cain, lost] = [1, 2, 3, 7].map(PersonId);

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.parents(cain), vec![adam, eve]);
        assert!(graph.partners(adam).contains(&eve));
        // The dangling father is kept in the record but never resolved
        assert_eq!(graph.person(lost).unwrap().father, Some(PersonId(99)));
        assert_eq!(graph.father(lost), None);
        // New ids continue after the highest stored one
        let mut graph = graph;
        assert_eq!(graph.add_person("New"), PersonId(8));
    }

    #[test]
    fn test_save_and_reload() {
        let graph = FamilyGraph::sample();
        let json = graph.to_node_link_string().unwrap();
        let reloaded = FamilyGraph::from_node_link_str(&json).unwrap();

        assert_eq!(
            graph.persons().collect::<Vec<_>>(),
            reloaded.persons().collect::<Vec<_>>()
        );
        let mut edges: Vec<_> = graph.edges().collect();
        let mut reloaded_edges: Vec<_> = reloaded.edges().collect();
        edges.sort_by_key(|&(a, b, _)| (a, b));
        reloaded_edges.sort_by_key(|&(a, b, _)| (a, b));
        assert_eq!(edges, reloaded_edges);
    }

    #[test]
    fn test_unreadable_ids_are_skipped() {
        let json = r#"{
            "nodes": [
                {"id": "abc", "label": "x"},
                {"id": "1", "label": "y", "father": "abc", "mother": "2"},
                {"id": "2", "label": "z"}
            ],
            "links": [
                {"type": "child", "source": "abc", "target": "1"},
                {"type": "child", "source": "2", "target": "1"}
            ]
        }"#;
        let graph = FamilyGraph::from_node_link_str(json).unwrap();
        let [y, z] = [1, 2].map(PersonId);

        assert_eq!(graph.person_ids(), vec![y, z]);
        assert_eq!(graph.person(y).unwrap().father, None);
        assert_eq!(graph.mother(y), Some(z));
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn test_numeric_ids() {
        let json = r#"{"nodes": [{"id": 4, "label": "x"}, {"id": 5, "father": 4}]}"#;
        let graph = FamilyGraph::from_node_link_str(json).unwrap();
        assert_eq!(graph.father(PersonId(5)), Some(PersonId(4)));
    }
}
