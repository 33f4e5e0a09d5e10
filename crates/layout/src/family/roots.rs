use lineage_graph::{Genealogy, PersonId};
use std::collections::HashSet;

/// Effective roots of the graph, the ones connected to the focus first
///
/// The sort is stable, so within each group roots keep the id order.
pub(crate) fn ordered_roots<G: Genealogy>(graph: &G, focus: PersonId) -> Vec<PersonId> {
    let component = component_of(graph, focus);
    let mut roots: Vec<_> = graph
        .person_ids()
        .into_iter()
        .filter(|&id| graph.is_effective_root(id))
        .collect();

    roots.sort_by_key(|root| !component.contains(root));
    roots
}

/// Everyone reachable from `start` through parent, child and partner links
pub(crate) fn component_of<G: Genealogy>(graph: &G, start: PersonId) -> HashSet<PersonId> {
    let mut visited = HashSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }

        stack.extend(graph.parents(current));
        stack.extend(graph.partners(current));
        stack.extend(graph.children(current));
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_graph::{FamilyGraph, ParentRole};
    use test_log::test;

    #[test]
    fn test_connected_roots_come_first() {
        let mut graph = FamilyGraph::new();
        let loner = graph.add_person("Loner");
        let father = graph.add_person("Father");
        let mother = graph.add_person("Mother");
        let child = graph.add_person("Child");
        graph.add_parent(child, father, ParentRole::Father).unwrap();
        graph.add_parent(child, mother, ParentRole::Mother).unwrap();

        assert_eq!(ordered_roots(&graph, child), vec![father, mother, loner]);
        assert_eq!(ordered_roots(&graph, loner), vec![loner, father, mother]);
    }

    #[test]
    fn test_connection_through_in_laws() {
        // The focus' father-in-law is only reachable by going down to the
        // grandchild and back up through its other parent
        let mut graph = FamilyGraph::new();
        let father_in_law = graph.add_person("Father in law");
        let spouse = graph.add_person("Spouse");
        let focus = graph.add_person("Focus");
        let grandchild = graph.add_person("Grandchild");
        graph
            .add_parent(spouse, father_in_law, ParentRole::Father)
            .unwrap();
        graph
            .add_parent(grandchild, focus, ParentRole::Father)
            .unwrap();
        graph
            .add_parent(grandchild, spouse, ParentRole::Mother)
            .unwrap();

        let stranger = graph.add_person("Stranger");

        let component = component_of(&graph, focus);
        assert!(component.contains(&father_in_law));
        assert!(!component.contains(&stranger));
        assert_eq!(component, component_of(&graph, father_in_law));
        assert_eq!(
            ordered_roots(&graph, focus),
            vec![father_in_law, focus, stranger]
        );
    }
}
