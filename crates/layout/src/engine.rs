use crate::Point;
use std::collections::HashMap;
use std::hash::Hash;

/// A layout engine that can compute positions for graph nodes
///
/// This trait is generic over the graph type `G`, so engines can state the
/// graph capabilities they need. Positions are always computed relative to a
/// focus node, which decides the generation rows.
pub trait LayoutEngine<G> {
    /// The type used to identify nodes in the graph
    type NodeId: Copy + Ord + Hash;

    /// Error raised when no layout can be produced
    type Error;

    /// Compute node positions for the given graph
    ///
    /// # Errors
    /// Returns an error if the focus is not part of the graph, or if the
    /// layout computation failed
    fn try_layout(
        &self,
        graph: &G,
        focus: Self::NodeId,
    ) -> Result<HashMap<Self::NodeId, Point>, Self::Error>;
}
