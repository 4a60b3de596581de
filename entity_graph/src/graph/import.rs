//! Bulk graph import.
//!
//! The persistence/import collaborator hands over flat record lists; the
//! graph is populated in one pass under the strict contract, so a record
//! set with duplicate ids or dangling edge endpoints is rejected as a
//! whole rather than half-loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Graph;
use crate::entity::{Edge, Node};
use crate::error::GraphError;

/// A node as described by the import layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,

    #[serde(rename = "type", default)]
    pub entity_type: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub user_data: HashMap<String, serde_json::Value>,
}

impl NodeRecord {
    /// Build the node this record describes.
    pub fn into_node(self) -> Node {
        let mut node = Node::new(self.id)
            .with_type(self.entity_type)
            .with_tags(self.tags)
            .with_label(self.label)
            .with_description(self.description);
        for (key, value) in self.user_data {
            node = node.with_user_data(key, value);
        }
        node
    }
}

/// An edge as described by the import layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,

    #[serde(rename = "type", default)]
    pub entity_type: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub user_data: HashMap<String, serde_json::Value>,
}

impl EdgeRecord {
    /// Build the edge this record describes.
    pub fn into_edge(self) -> Edge {
        let mut edge = Edge::new(self.id, self.source, self.target)
            .with_type(self.entity_type)
            .with_tags(self.tags)
            .with_label(self.label)
            .with_description(self.description);
        for (key, value) in self.user_data {
            edge = edge.with_user_data(key, value);
        }
        edge
    }
}

impl Graph {
    /// Populate a fresh graph from import records in one pass.
    ///
    /// Nodes load first so edge endpoint checks see the full node set.
    pub fn from_records(
        nodes: impl IntoIterator<Item = NodeRecord>,
        edges: impl IntoIterator<Item = EdgeRecord>,
    ) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        for record in nodes {
            graph.add_node(record.into_node())?;
        }
        for record in edges {
            graph.add_edge(record.into_edge())?;
        }
        log::debug!(
            "imported graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}
