use lineage_graph::{Genealogy, Indexed, PersonId};
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// Assigns a generation to every person relative to a focus person
///
/// Parents sit one generation above (-1), children one below (+1), partners
/// on the same row. The traversal is breadth-first so that every person gets
/// the generation of its shortest path to the focus.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationResolver;

impl GenerationResolver {
    /// Resolve the generation of every person of the graph
    ///
    /// Persons that cannot be reached from the focus (other trees of the
    /// same graph) are put on generation 0, like the focus itself.
    pub fn resolve<G: Genealogy>(&self, graph: &G, focus: PersonId) -> HashMap<PersonId, i32> {
        let graph = &Indexed::new(graph);
        let mut generations = HashMap::new();
        let mut queue = VecDeque::new();

        if graph.contains(focus) {
            generations.insert(focus, 0);
            queue.push_back((focus, 0));
        }

        while let Some((current, generation)) = queue.pop_front() {
            let neighbours = graph
                .parents(current)
                .into_iter()
                .map(|p| (p, generation - 1))
                .chain(graph.children(current).into_iter().map(|c| (c, generation + 1)))
                .chain(graph.partners(current).into_iter().map(|p| (p, generation)));

            for (next, next_generation) in neighbours {
                if !generations.contains_key(&next) {
                    trace!("Generation of {next} is {next_generation} (via {current})");
                    generations.insert(next, next_generation);
                    queue.push_back((next, next_generation));
                }
            }
        }

        for id in graph.person_ids() {
            generations.entry(id).or_insert(0);
        }

        generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_graph::{FamilyGraph, ParentRole};
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_sample_generations_from_seth() {
        let graph = FamilyGraph::sample();
        let generations = GenerationResolver.resolve(&graph, PersonId(5));

        let expected: HashMap<_, _> = [(1, -1), (2, -1), (3, 0), (4, 0), (5, 0), (6, 1)]
            .into_iter()
            .map(|(id, g)| (PersonId(id), g))
            .collect();
        assert_eq!(generations, expected);
    }

    #[test]
    fn test_focus_is_generation_zero() {
        let graph = FamilyGraph::sample();
        for id in graph.person_ids() {
            assert_eq!(GenerationResolver.resolve(&graph, id)[&id], 0);
        }
    }

    #[test]
    fn test_unreached_persons_default_to_zero() {
        let mut graph = FamilyGraph::sample();
        let stranger = graph.add_person("Stranger");
        let stranger_child = graph.add_person("Stranger child");
        graph
            .add_parent(stranger_child, stranger, ParentRole::Mother)
            .unwrap();

        let generations = GenerationResolver.resolve(&graph, PersonId(6));
        assert_eq!(generations[&PersonId(1)], -2);
        assert_eq!(generations[&stranger], 0);
        assert_eq!(generations[&stranger_child], 0);
    }

    #[test]
    fn test_shortest_path_wins() {
        // The grandfather is also recorded as a partner of the focus, the
        // partner edge is the shorter path
        let mut graph = FamilyGraph::new();
        let grandfather = graph.add_person("Grandfather");
        let father = graph.add_person("Father");
        let focus = graph.add_person("Focus");
        graph
            .add_parent(father, grandfather, ParentRole::Father)
            .unwrap();
        graph.add_parent(focus, father, ParentRole::Father).unwrap();
        graph.add_partner(focus, grandfather).unwrap();

        let generations = GenerationResolver.resolve(&graph, focus);
        assert_eq!(generations[&grandfather], 0);
        assert_eq!(generations[&father], -1);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = FamilyGraph::new();
        let a = graph.add_person("a");
        let b = graph.add_person("b");
        graph.add_parent(a, b, ParentRole::Father).unwrap();
        graph.add_parent(b, a, ParentRole::Father).unwrap();

        let generations = GenerationResolver.resolve(&graph, a);
        assert_eq!(generations.len(), 2);
        assert_eq!(generations[&b], -1);
    }
}
