//! Render-state views - the boundary the rendering layer consumes.
//!
//! The renderer gets resolved color/visibility (plus a position for nodes)
//! and nothing else; type and tag semantics stop here.

use serde::{Deserialize, Serialize};

use entity_graph::{Edge, Entity, EntityId, Graph, Node, Position};

/// Resolved display state for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRenderState {
    pub color: String,
    pub visible: bool,
    pub position: Position,
}

impl NodeRenderState {
    /// Read the state resolved onto a node; a missing cached position reads
    /// as the origin.
    pub fn of(node: &Node) -> Self {
        Self {
            color: node.color().to_string(),
            visible: node.visible(),
            position: node.position().unwrap_or_default(),
        }
    }
}

/// Resolved display state for one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRenderState {
    pub color: String,
    pub visible: bool,
}

impl EdgeRenderState {
    pub fn of(edge: &Edge) -> Self {
        Self {
            color: edge.color().to_string(),
            visible: edge.visible(),
        }
    }
}

/// Render states for every node, in insertion order.
pub fn node_render_states(graph: &Graph) -> impl Iterator<Item = (&EntityId, NodeRenderState)> {
    graph.nodes().map(|node| (node.id(), NodeRenderState::of(node)))
}

/// Render states for every edge, in insertion order.
pub fn edge_render_states(graph: &Graph) -> impl Iterator<Item = (&EntityId, EdgeRenderState)> {
    graph.edges().map(|edge| (edge.id(), EdgeRenderState::of(edge)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayEntry, DisplayMode, RenderingConfig};
    use crate::overlay::apply_to_graph;

    #[test]
    fn test_render_states_reflect_applied_config() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("n1").with_type("Foo")).expect("fresh id");
        graph.add_node(Node::new("n2").with_type("Bar")).expect("fresh id");
        graph.add_edge(Edge::new("e1", "n1", "n2").with_type("rel")).expect("valid edge");

        let mut config = RenderingConfig::new();
        config.node_types.set("Foo", DisplayEntry::new("blue", true));
        config.node_types.set("Bar", DisplayEntry::new("green", false));
        config.edge_types.set("rel", DisplayEntry::new("red", true));
        config.set_position("n1", Position::new(1.0, 1.0, 0.0));
        apply_to_graph(&mut graph, &config, DisplayMode::Type);

        let states: Vec<_> = node_render_states(&graph).collect();
        assert_eq!(states[0].0.as_str(), "n1");
        assert_eq!(states[0].1.color, "blue");
        assert!(states[0].1.visible);
        assert_eq!(states[0].1.position, Position::new(1.0, 1.0, 0.0));
        // n2 has no cached position, so it reads as the origin.
        assert_eq!(states[1].1.position, Position::origin());

        let edge_states: Vec<_> = edge_render_states(&graph).collect();
        assert_eq!(edge_states[0].1.color, "red");
        // Hidden endpoint, hidden edge.
        assert!(!edge_states[0].1.visible);
    }
}
