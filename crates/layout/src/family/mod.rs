mod collisions;
mod roots;
mod subtree;

use crate::{GenerationResolver, Geometry, LayoutEngine, Point};
use lineage_graph::{Genealogy, Indexed, PersonId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, error};

use collisions::resolve_collisions;
use roots::ordered_roots;
use subtree::Placement;

/// Errors that can occur during family tree layout
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The focus person is not part of the graph
    #[error("focus person {0} is not in the graph")]
    FocusNotFound(PersonId),

    /// A person reachable through the graph has no generation, the graph
    /// answered inconsistently between two queries
    #[error("no generation resolved for person {0}")]
    MissingGeneration(PersonId),

    /// A coordinate overflowed or the geometry is not usable
    #[error("non-finite position computed for person {0}")]
    NonFinitePosition(PersonId),

    /// The graph implementation panicked during the layout
    #[error("layout aborted: {0}")]
    Aborted(String),
}

/// Top-down family tree layout
///
/// Each family unit (a person and its partners of the same generation) is
/// centered above its children, disconnected trees are put side by side and
/// overlapping nodes of a row are pushed apart.
#[derive(Debug, Clone, Default)]
pub struct FamilyTreeLayout {
    pub geometry: Geometry,
}

impl FamilyTreeLayout {
    /// Create a new layout with the given geometry
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    /// Compute the position of every person, for display around `focus`
    ///
    /// Returns `None` when the focus is not in the graph (which includes an
    /// empty graph). Any other failure is logged and degrades to the focus
    /// alone at the origin, so that a view always has something to draw.
    pub fn layout<G: Genealogy>(
        &self,
        graph: &G,
        focus: PersonId,
    ) -> Option<HashMap<PersonId, Point>> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.try_layout(graph, focus)))
            .unwrap_or_else(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_default();
                Err(LayoutError::Aborted(message))
            });

        match result {
            Ok(positions) => Some(positions),
            Err(LayoutError::FocusNotFound(_)) => None,
            Err(e) => {
                error!("Layout around {focus} failed, falling back to a single node: {e}");
                Some(HashMap::from([(focus, Point::zero())]))
            }
        }
    }
}

impl<G: Genealogy> LayoutEngine<G> for FamilyTreeLayout {
    type NodeId = PersonId;
    type Error = LayoutError;

    fn try_layout(
        &self,
        graph: &G,
        focus: PersonId,
    ) -> Result<HashMap<PersonId, Point>, LayoutError> {
        if !graph.contains(focus) {
            return Err(LayoutError::FocusNotFound(focus));
        }

        let graph = &Indexed::new(graph);
        let generations = GenerationResolver.resolve(graph, focus);
        let roots = ordered_roots(graph, focus);
        debug!("Laying out around {focus}, roots: {roots:?}");

        let mut placement = Placement::new(graph, &self.geometry, &generations);
        let mut positions = HashMap::new();
        let mut current_x = 0.0;

        // Persons left over after the roots only exist in cyclic data, they
        // become roots of their own
        for root in roots.into_iter().chain(graph.person_ids()) {
            if placement.is_placed(root) {
                continue;
            }

            let tree = placement.place(root, current_x)?;
            debug!(
                "Tree of {root}: {} persons, width {}",
                tree.positions.len(),
                tree.width
            );

            // Parents wider than their children overhang the subtree on the
            // left, the margin is kept from the outermost node
            let half = self.geometry.node_width / 2.0;
            let (left, right) = tree.positions.values().fold(
                (f32::INFINITY, f32::NEG_INFINITY),
                |(left, right), p| (left.min(p.x - half), right.max(p.x + half)),
            );
            if left > right {
                continue;
            }
            let shift = current_x - left;
            positions.extend(
                tree.positions
                    .into_iter()
                    .map(|(id, p)| (id, Point::new(p.x + shift, p.y))),
            );
            current_x = right + shift + self.geometry.tree_margin();
        }

        resolve_collisions(&mut positions, &generations, &self.geometry);

        if let Some((&id, _)) = positions.iter().find(|(_, pos)| !pos.is_finite()) {
            return Err(LayoutError::NonFinitePosition(id));
        }

        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_graph::{FamilyGraph, ParentRole, Person, Relation};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use test_log::test;

    #[test]
    fn test_absent_focus() {
        let layout = FamilyTreeLayout::default();
        assert_eq!(layout.layout(&FamilyGraph::new(), PersonId(1)), None);
        assert_eq!(layout.layout(&FamilyGraph::sample(), PersonId(42)), None);
    }

    #[test]
    fn test_sample_layout() {
        let graph = FamilyGraph::sample();
        let positions = FamilyTreeLayout::default()
            .layout(&graph, PersonId(6))
            .unwrap();

        assert_eq!(positions.len(), 6);
        // Adam and Eve are two generations above Enosh
        assert_eq!(positions[&PersonId(1)].y, 0.0);
        assert_eq!(positions[&PersonId(5)].y, 125.0);
        assert_eq!(positions[&PersonId(6)].y, 250.0);
        assert_eq!(positions[&PersonId(6)].x, positions[&PersonId(5)].x);
    }

    #[test]
    fn test_standalone_person() {
        let mut graph = FamilyGraph::sample();
        let loner = graph.add_person("Loner");

        let positions = FamilyTreeLayout::default().layout(&graph, loner).unwrap();
        assert_eq!(positions.len(), 7);
        // Laid out first since it is the only root connected to itself
        assert_eq!(positions[&loner], Point::new(70.0, 0.0));
        // The sample family starts after the loner and a two node margin
        let leftmost = positions
            .iter()
            .filter(|(&id, _)| id != loner)
            .map(|(_, p)| p.x)
            .fold(f32::INFINITY, f32::min);
        assert!(leftmost - 70.0 >= 140.0 + 280.0);
    }

    #[test]
    fn test_non_finite_geometry_falls_back() {
        let geometry = Geometry {
            vertical_gap: f32::INFINITY,
            ..Default::default()
        };
        let positions = FamilyTreeLayout::new(geometry)
            .layout(&FamilyGraph::sample(), PersonId(6))
            .unwrap();

        assert_eq!(positions, HashMap::from([(PersonId(6), Point::zero())]));
    }

    /// A store whose person listing fails
    struct Flaky(FamilyGraph);

    impl Genealogy for Flaky {
        fn contains(&self, id: PersonId) -> bool {
            self.0.contains(id)
        }

        fn person(&self, id: PersonId) -> Option<&Person> {
            self.0.person(id)
        }

        fn person_ids(&self) -> Vec<PersonId> {
            panic!("store went away")
        }

        fn related(&self, id: PersonId, relation: Relation) -> Vec<PersonId> {
            self.0.related(id, relation)
        }
    }

    #[test]
    fn test_panicking_graph_falls_back() {
        let positions = FamilyTreeLayout::default()
            .layout(&Flaky(FamilyGraph::sample()), PersonId(3))
            .unwrap();
        assert_eq!(positions, HashMap::from([(PersonId(3), Point::zero())]));
    }

    /// A store counting how often the person list is read
    struct Counting {
        graph: FamilyGraph,
        listings: Cell<usize>,
    }

    impl Genealogy for Counting {
        fn contains(&self, id: PersonId) -> bool {
            self.graph.contains(id)
        }

        fn person(&self, id: PersonId) -> Option<&Person> {
            self.graph.person(id)
        }

        fn person_ids(&self) -> Vec<PersonId> {
            self.listings.set(self.listings.get() + 1);
            self.graph.person_ids()
        }

        fn related(&self, id: PersonId, relation: Relation) -> Vec<PersonId> {
            self.graph.related(id, relation)
        }
    }

    #[test]
    fn test_person_list_is_read_once() {
        let mut graph = FamilyGraph::new();
        let ids: Vec<_> = (0..300).map(|i| graph.add_person(format!("g{i}"))).collect();
        for pair in ids.windows(2) {
            graph.add_child(pair[0], pair[1]).unwrap();
        }
        let store = Counting {
            graph,
            listings: Cell::new(0),
        };

        let positions = FamilyTreeLayout::default().layout(&store, ids[150]).unwrap();
        assert_eq!(positions.len(), 300);
        assert_eq!(store.listings.get(), 1);
    }

    #[test]
    fn test_deep_lineage_is_laid_out() {
        let mut graph = FamilyGraph::new();
        let ids: Vec<_> = (0..5000).map(|i| graph.add_person(format!("g{i}"))).collect();
        for pair in ids.windows(2) {
            graph.add_parent(pair[1], pair[0], ParentRole::Mother).unwrap();
        }

        let positions = FamilyTreeLayout::default().layout(&graph, ids[4999]).unwrap();
        assert_eq!(positions.len(), 5000);
        assert_eq!(positions[&ids[0]], Point::new(70.0, 0.0));
        assert_eq!(positions[&ids[4999]], Point::new(70.0, 4999.0 * 125.0));
    }

    #[test]
    fn test_remarried_parent() {
        // A father with two partners, one child from each
        let mut graph = FamilyGraph::new();
        let father = graph.add_person("Father");
        let first = graph.add_person("First wife");
        let second = graph.add_person("Second wife");
        let elder = graph.add_person("Elder");
        let younger = graph.add_person("Younger");
        graph.add_partner(father, first).unwrap();
        graph.add_partner(father, second).unwrap();
        graph.add_parent(elder, father, ParentRole::Father).unwrap();
        graph.add_parent(elder, first, ParentRole::Mother).unwrap();
        graph.add_parent(younger, father, ParentRole::Father).unwrap();
        graph.add_parent(younger, second, ParentRole::Mother).unwrap();

        let positions = FamilyTreeLayout::default().layout(&graph, elder).unwrap();

        assert_eq!(positions.len(), 5);
        let top: Vec<_> = [father, first, second]
            .iter()
            .map(|id| positions[id])
            .collect();
        assert!(top.iter().all(|p| p.y == 0.0));
        assert!(top[0].x < top[1].x && top[1].x < top[2].x);
        assert!(positions[&elder].x < positions[&younger].x);
    }
}
