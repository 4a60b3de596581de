//! Graph statistics for the legend.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use entity_graph::{Entity, Graph};

/// Per-type and per-tag counts over a graph snapshot.
///
/// Computed fresh on every call with one pass over nodes and one over
/// edges; callers needing live numbers re-collect after mutating. Type
/// counts sum to the entity count (type is single-valued); tag counts may
/// exceed it (tags are not).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,

    /// Counts keyed by node type, in first-seen order.
    pub node_type_counts: IndexMap<String, usize>,

    /// Counts keyed by node tag, in first-seen order.
    pub node_tag_counts: IndexMap<String, usize>,

    /// Counts keyed by edge type, in first-seen order.
    pub edge_type_counts: IndexMap<String, usize>,

    /// Counts keyed by edge tag, in first-seen order.
    pub edge_tag_counts: IndexMap<String, usize>,
}

impl GraphStatistics {
    /// Count everything in the given graph.
    pub fn collect(graph: &Graph) -> Self {
        let mut stats = Self::default();

        for node in graph.nodes() {
            stats.node_count += 1;
            *stats
                .node_type_counts
                .entry(node.entity_type().to_string())
                .or_default() += 1;
            for tag in node.tags() {
                *stats.node_tag_counts.entry(tag.clone()).or_default() += 1;
            }
        }
        for edge in graph.edges() {
            stats.edge_count += 1;
            *stats
                .edge_type_counts
                .entry(edge.entity_type().to_string())
                .or_default() += 1;
            for tag in edge.tags() {
                *stats.edge_tag_counts.entry(tag.clone()).or_default() += 1;
            }
        }

        stats
    }
}
