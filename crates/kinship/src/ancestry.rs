use lineage_graph::{Genealogy, PersonId};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Generation and degree of two persons that share no ancestor
pub const UNRELATED: i32 = 999;

/// Every proper ancestor of `person` with its distance in parent hops
///
/// Only the father/mother attributes are followed, parents missing from the
/// graph are skipped.
pub fn ancestors_with_depth<G: Genealogy>(graph: &G, person: PersonId) -> BTreeMap<PersonId, i32> {
    let mut ancestors = BTreeMap::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([(person, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        if current != person {
            ancestors.insert(current, depth);
        }
        for parent in graph.parents(current) {
            queue.push_back((parent, depth + 1));
        }
    }

    ancestors
}

/// How two persons are connected through their ancestors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lineage {
    Same,
    /// The person is an ancestor of the focus, `depth` generations up
    Ancestor(i32),
    /// The person is a descendant of the focus, `depth` generations down
    Descendant(i32),
    /// Both descend from a nearest common ancestor
    Collateral { focus_depth: i32, person_depth: i32 },
    Unrelated,
}

impl Lineage {
    pub fn between<G: Genealogy>(graph: &G, focus: PersonId, person: PersonId) -> Self {
        if focus == person {
            return Lineage::Same;
        }

        let focus_ancestors = ancestors_with_depth(graph, focus);
        if let Some(&depth) = focus_ancestors.get(&person) {
            return Lineage::Ancestor(depth);
        }

        let person_ancestors = ancestors_with_depth(graph, person);
        if let Some(&depth) = person_ancestors.get(&focus) {
            return Lineage::Descendant(depth);
        }

        // Nearest by total path length, ties go to the lowest ancestor id so
        // that the answer does not depend on which side is the focus
        let mut nearest: Option<(i32, i32)> = None;
        for (ancestor, &focus_depth) in &focus_ancestors {
            let Some(&person_depth) = person_ancestors.get(ancestor) else {
                continue;
            };
            let shorter = nearest.map_or(true, |(f, p)| focus_depth + person_depth < f + p);
            if shorter {
                nearest = Some((focus_depth, person_depth));
            }
        }

        match nearest {
            Some((focus_depth, person_depth)) => Lineage::Collateral {
                focus_depth,
                person_depth,
            },
            None => Lineage::Unrelated,
        }
    }

    /// Signed generation difference, negative towards the ancestors
    pub fn generation(&self) -> i32 {
        match *self {
            Lineage::Same => 0,
            Lineage::Ancestor(depth) => -depth,
            Lineage::Descendant(depth) => depth,
            Lineage::Collateral {
                focus_depth,
                person_depth,
            } => person_depth - focus_depth,
            Lineage::Unrelated => UNRELATED,
        }
    }

    /// Number of parent links on the path through the nearest common ancestor
    pub fn degree(&self) -> i32 {
        match *self {
            Lineage::Same => 0,
            Lineage::Ancestor(depth) | Lineage::Descendant(depth) => depth,
            Lineage::Collateral {
                focus_depth,
                person_depth,
            } => focus_depth + person_depth,
            Lineage::Unrelated => UNRELATED,
        }
    }
}
