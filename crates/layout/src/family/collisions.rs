use crate::{Geometry, Point};
use lineage_graph::PersonId;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Push apart the nodes of a generation that are closer than a node width
///
/// Rows are scanned left to right and every node right of an overlap is
/// shifted by the same amount, so the order within a row never changes.
/// Nodes are only ever moved right.
pub(crate) fn resolve_collisions(
    positions: &mut HashMap<PersonId, Point>,
    generations: &HashMap<PersonId, i32>,
    geometry: &Geometry,
) {
    let mut rows: BTreeMap<i32, Vec<PersonId>> = BTreeMap::new();
    for &node in positions.keys() {
        let generation = generations.get(&node).copied().unwrap_or(0);
        rows.entry(generation).or_default().push(node);
    }

    let min_distance = geometry.partner_step();

    for row in rows.values_mut() {
        // Ties on x are broken by id to keep the result reproducible
        row.sort_by(|a, b| {
            positions[a]
                .x
                .partial_cmp(&positions[b].x)
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(b))
        });

        for i in 1..row.len() {
            let distance = positions[&row[i]].x - positions[&row[i - 1]].x;
            if distance >= min_distance {
                continue;
            }

            let push = min_distance - distance + geometry.collision_margin;
            for node in &row[i..] {
                if let Some(pos) = positions.get_mut(node) {
                    pos.x += push;
                }
            }
        }
    }
}
