use super::LayoutError;
use crate::{Geometry, Point};
use lineage_graph::{Genealogy, PersonId};
use std::collections::{btree_set, BTreeSet, HashMap, HashSet};

/// Positions of a laid out subtree
#[derive(Debug, Default)]
pub(crate) struct Subtree {
    pub positions: HashMap<PersonId, Point>,
    pub width: f32,
    /// Middle of the family unit at the top of the subtree, used to center
    /// the parents above it
    pub family_center: f32,
}

/// Extent of a placed subtree, as seen by the family above it
#[derive(Debug, Default, Clone, Copy)]
struct Span {
    width: f32,
    family_center: f32,
}

/// A family unit waiting for its children to be placed
struct Family {
    members: Vec<PersonId>,
    y: f32,
    x_offset: f32,
    children: btree_set::IntoIter<PersonId>,
    child_x: f32,
    children_width: f32,
    anchors: Vec<f32>,
}

impl Family {
    fn absorb(&mut self, child: Span, gap: f32) {
        // Placed meanwhile by one of its siblings' subtrees
        if child.width <= 0.0 {
            return;
        }

        self.anchors.push(child.family_center);
        self.child_x += child.width + gap;
        self.children_width += child.width + gap;
    }
}

/// Placement of family units above their children
///
/// Subtrees are walked with an explicit stack of pending families, so the
/// depth of a lineage is only bounded by memory.
pub(crate) struct Placement<'a, G> {
    graph: &'a G,
    geometry: &'a Geometry,
    generations: &'a HashMap<PersonId, i32>,
    min_generation: i32,
    visited: HashSet<PersonId>,
}

impl<'a, G: Genealogy> Placement<'a, G> {
    pub fn new(
        graph: &'a G,
        geometry: &'a Geometry,
        generations: &'a HashMap<PersonId, i32>,
    ) -> Self {
        Self {
            graph,
            geometry,
            generations,
            min_generation: generations.values().copied().min().unwrap_or(0),
            visited: HashSet::new(),
        }
    }

    pub fn is_placed(&self, node: PersonId) -> bool {
        self.visited.contains(&node)
    }

    fn generation(&self, node: PersonId) -> Result<i32, LayoutError> {
        self.generations
            .get(&node)
            .copied()
            .ok_or(LayoutError::MissingGeneration(node))
    }

    /// Lay out the subtree of `node`, its leftmost edge at `x_offset`
    ///
    /// Nodes already placed by another subtree are skipped, a node that was
    /// already placed yields an empty subtree.
    pub fn place(&mut self, node: PersonId, x_offset: f32) -> Result<Subtree, LayoutError> {
        let mut positions = HashMap::new();
        let mut stack = Vec::new();
        let mut span = self.open(node, x_offset, &mut stack, &mut positions)?;

        while let Some(family) = stack.last_mut() {
            if let Some(child) = span.take() {
                family.absorb(child, self.geometry.horizontal_gap);
                continue;
            }

            match family.children.next() {
                Some(child) => {
                    let child_x = family.child_x;
                    span = self.open(child, child_x, &mut stack, &mut positions)?;
                }
                None => {
                    if let Some(done) = stack.pop() {
                        span = Some(self.close(done, &mut positions));
                    }
                }
            }
        }

        let span = span.unwrap_or_default();
        Ok(Subtree {
            positions,
            width: span.width,
            family_center: span.family_center,
        })
    }

    /// Start the family unit of `node`
    ///
    /// A childless family is placed right away and its span returned, other
    /// ones are pushed on the stack until their children are done.
    fn open(
        &mut self,
        node: PersonId,
        x_offset: f32,
        stack: &mut Vec<Family>,
        positions: &mut HashMap<PersonId, Point>,
    ) -> Result<Option<Span>, LayoutError> {
        if self.visited.contains(&node) {
            return Ok(Some(Span::default()));
        }

        let generation = self.generation(node)?;
        let y = (generation - self.min_generation) as f32 * self.geometry.row_height();

        // The family unit is the node and its partners of the same generation
        let mut members = vec![node];
        for partner in self.graph.partners(node) {
            if !self.visited.contains(&partner) && self.generations.get(&partner) == Some(&generation)
            {
                members.push(partner);
            }
        }
        self.visited.extend(members.iter().copied());

        let children: BTreeSet<_> = members
            .iter()
            .flat_map(|&member| self.graph.children(member))
            .filter(|child| !self.visited.contains(child))
            .collect();

        if children.is_empty() {
            let family_width = self.geometry.family_width(members.len());
            positions.extend(self.place_family(&members, x_offset, y));
            return Ok(Some(Span {
                width: family_width,
                family_center: x_offset + family_width / 2.0,
            }));
        }

        stack.push(Family {
            members,
            y,
            x_offset,
            children: children.into_iter(),
            child_x: x_offset,
            children_width: 0.0,
            anchors: Vec::new(),
        });
        Ok(None)
    }

    /// Center a family whose children are all placed above them
    fn close(&self, family: Family, positions: &mut HashMap<PersonId, Point>) -> Span {
        let family_width = self.geometry.family_width(family.members.len());
        let children_width = if family.children_width > 0.0 {
            family.children_width - self.geometry.horizontal_gap
        } else {
            0.0
        };

        let family_x = match (family.anchors.first(), family.anchors.last()) {
            (Some(first), Some(last)) => (first + last) / 2.0 - family_width / 2.0,
            _ => family.x_offset,
        };
        positions.extend(self.place_family(&family.members, family_x, family.y));

        Span {
            width: family_width.max(children_width),
            family_center: family_x + family_width / 2.0,
        }
    }

    /// Place the members of a family unit left to right, starting at `x`
    fn place_family(&self, family: &[PersonId], x: f32, y: f32) -> HashMap<PersonId, Point> {
        family
            .iter()
            .enumerate()
            .map(|(i, &member)| {
                let center = x + self.geometry.node_width / 2.0
                    + i as f32 * self.geometry.partner_step();
                (member, Point::new(center, y))
            })
            .collect()
    }
}
