use lineage_graph::{FamilyGraph, Genealogy, PersonId, Relation};
use lineage_kinship::{Category, Color, Kinship, KinshipCalculator, Locale, LEGEND};
use lineage_layout::Point;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A person and where the layout put it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placed {
    pub id: PersonId,
    pub label: String,
    pub generation: i32,
    pub x: f32,
    pub y: f32,
}

impl fmt::Display for Placed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}  {:<24} gen {:>3}  ({:>8.1}, {:>7.1})",
            self.id, self.label, self.generation, self.x, self.y
        )
    }
}

/// Positions sorted by person id
pub fn placed(
    graph: &FamilyGraph,
    positions: &HashMap<PersonId, Point>,
    generations: &HashMap<PersonId, i32>,
) -> Vec<Placed> {
    let mut rows: Vec<_> = positions
        .iter()
        .map(|(&id, point)| Placed {
            id,
            label: label_of(graph, id),
            generation: generations.get(&id).copied().unwrap_or_default(),
            x: point.x,
            y: point.y,
        })
        .collect();
    rows.sort_by_key(|row| row.id);
    rows
}

/// Kinship of a person, with its label for display
#[derive(Debug, Clone, Serialize)]
pub struct Related {
    pub name: String,
    #[serde(flatten)]
    pub kinship: Kinship,
}

impl fmt::Display for Related {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = &self.kinship;
        write!(
            f,
            "{:>4}  {:<24} {:<9} gen {:>3}  deg {:>3}  {}  {} ({})",
            k.person,
            self.name,
            k.category,
            k.generation,
            k.degree,
            k.colors.fill,
            k.label,
            k.colors.border,
        )
    }
}

pub fn related<G: Genealogy>(
    calc: &mut KinshipCalculator<G>,
    focus: PersonId,
    persons: &[PersonId],
    locale: Locale,
) -> Vec<Related> {
    persons
        .iter()
        .map(|&person| Related {
            name: label_of(calc.graph(), person),
            kinship: calc.kinship(focus, person, locale),
        })
        .collect()
}

/// An edge with the color it is drawn with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredEdge {
    pub source: PersonId,
    pub target: PersonId,
    pub relation: Relation,
    pub color: Color,
}

impl fmt::Display for ColoredEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self.relation {
            Relation::Partner => "partner",
            Relation::Child => "child",
        };
        write!(
            f,
            "{:>4} -> {:<4} {:<8} {}",
            self.source, self.target, relation, self.color
        )
    }
}

/// Every stored edge, a partner pair only once
pub fn colored_edges(
    calc: &mut KinshipCalculator<'_, FamilyGraph>,
    focus: PersonId,
) -> Vec<ColoredEdge> {
    calc.graph()
        .edges()
        .filter(|&(source, target, relation)| relation == Relation::Child || source < target)
        .map(|(source, target, relation)| ColoredEdge {
            source,
            target,
            relation,
            color: calc.edge_color(focus, source, target),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: Category,
    pub caption: &'static str,
    pub color: Color,
}

impl fmt::Display for LegendEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.color, self.caption)
    }
}

pub fn legend(locale: Locale) -> Vec<LegendEntry> {
    LEGEND
        .iter()
        .map(|&(category, color)| LegendEntry {
            category,
            caption: category.caption(locale),
            color,
        })
        .collect()
}

fn label_of(graph: &impl Genealogy, id: PersonId) -> String {
    graph
        .person(id)
        .map(|p| p.label.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_layout::{FamilyTreeLayout, GenerationResolver};
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_placed_rows() {
        let graph = FamilyGraph::sample();
        let focus = PersonId(6);
        let positions = FamilyTreeLayout::default().layout(&graph, focus).unwrap();
        let generations = GenerationResolver.resolve(&graph, focus);

        let rows = placed(&graph, &positions, &generations);
        let ids: Vec<_> = rows.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
        assert_eq!(rows[0].label, "Adam");
        assert_eq!(rows[0].generation, -2);
        assert_eq!(rows[5].generation, 0);
    }

    #[test]
    fn test_edges_are_listed_once() {
        let graph = FamilyGraph::sample();
        let mut calc = KinshipCalculator::new(&graph);

        let edges = colored_edges(&mut calc, PersonId(6));
        let partners: Vec<_> = edges
            .iter()
            .filter(|e| e.relation == Relation::Partner)
            .collect();
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].color.to_string(), "#FF1493");

        let seth_to_enosh = edges
            .iter()
            .find(|e| e.source == PersonId(5) && e.target == PersonId(6))
            .unwrap();
        assert_eq!(seth_to_enosh.color.to_string(), "#4169E1");
    }

    #[test]
    fn test_legend_captions() {
        let entries = legend(Locale::Ukrainian);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].caption, "Фокусна людина");
        assert_eq!(entries[0].to_string(), "#FFD700  Фокусна людина");
    }

    #[test]
    fn test_related_rows() {
        let graph = FamilyGraph::sample();
        let mut calc = KinshipCalculator::new(&graph);

        let rows = related(&mut calc, PersonId(3), &[PersonId(6)], Locale::English);
        assert_eq!(rows[0].name, "Enosh");
        assert_eq!(rows[0].kinship.label, "niece/nephew");
    }

    #[test]
    fn test_labels_come_from_the_calculated_tree() {
        let mut graph = FamilyGraph::sample();
        let stranger = graph.add_person("Stranger");
        graph.add_edge(PersonId(6), stranger, Relation::Child).unwrap();
        let mut calc = KinshipCalculator::new(&graph);

        let rows = related(&mut calc, PersonId(1), &[stranger], Locale::English);
        assert_eq!(rows[0].name, "Stranger");
        // Both partner edges are stored, only one is listed
        let edges = colored_edges(&mut calc, PersonId(1));
        assert_eq!(edges.len(), 8);
        assert!(edges.iter().any(|e| e.target == stranger));
    }
}
