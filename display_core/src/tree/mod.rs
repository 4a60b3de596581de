//! Drill-down tree extraction.
//!
//! A graph with cycles cannot be presented as-is in a sequential drill-down
//! view, so extraction walks it depth-first with a path-scoped visited set:
//! a node enters the set when the walk descends into it and leaves on the
//! way back up. The same node may therefore appear under several sibling
//! branches (diamond reuse), but a node on the current path is emitted as
//! an unexpanded leaf instead of recursing. A depth cap bounds the walk
//! independently of cycle handling.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use entity_graph::{Edge, Entity, EntityId, Graph, Node};

/// Tuning for tree extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Types whose nodes may serve as the root.
    pub root_types: Vec<String>,

    /// Edge type or tag labels that count as parent-child links.
    pub child_link_labels: Vec<String>,

    /// Maximum descent depth below the root.
    pub max_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root_types: Vec::new(),
            child_link_labels: Vec::new(),
            max_depth: 10,
        }
    }
}

impl TreeConfig {
    /// Whether nodes of this type may serve as the root.
    pub fn is_root_type(&self, entity_type: &str) -> bool {
        self.root_types.iter().any(|root| root == entity_type)
    }

    /// Whether this edge counts as a parent-child link, by type or any tag.
    pub fn is_child_link(&self, edge: &Edge) -> bool {
        self.child_link_labels
            .iter()
            .any(|label| label == edge.entity_type() || edge.has_tag(label))
    }
}

/// One node of the extracted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: EntityId,
    pub label: String,
    pub children: Vec<TreeNode>,
}

/// An extracted tree. A graph with no eligible root yields the empty tree,
/// which is a value, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub root: Option<TreeNode>,
}

impl Tree {
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// Extract a drill-down tree from the graph.
///
/// Root selection order: the requested id if it resolves; else the first
/// root-eligible node with no incoming child link; else the first
/// root-eligible node in iteration order; else the empty tree.
pub fn extract_tree(graph: &Graph, config: &TreeConfig, requested_root: Option<&str>) -> Tree {
    let Some(root) = select_root(graph, config, requested_root) else {
        return Tree::default();
    };
    log::debug!("extracting tree below `{}`", root.id());

    let mut path = HashSet::new();
    Tree {
        root: Some(descend(graph, config, root, &mut path, 0)),
    }
}

fn select_root<'g>(graph: &'g Graph, config: &TreeConfig, requested: Option<&str>) -> Option<&'g Node> {
    if let Some(id) = requested {
        if let Some(node) = graph.node(id) {
            return Some(node);
        }
    }

    let eligible: Vec<&Node> = graph
        .nodes()
        .filter(|node| config.is_root_type(node.entity_type()))
        .collect();

    eligible
        .iter()
        .copied()
        .find(|node| !has_incoming_child_link(graph, config, node))
        .or_else(|| eligible.first().copied())
}

fn has_incoming_child_link(graph: &Graph, config: &TreeConfig, node: &Node) -> bool {
    graph
        .incoming_edges(node.id().as_str())
        .any(|edge| config.is_child_link(edge))
}

fn descend(
    graph: &Graph,
    config: &TreeConfig,
    node: &Node,
    path: &mut HashSet<EntityId>,
    depth: u32,
) -> TreeNode {
    let mut tree_node = leaf(node);
    if depth >= config.max_depth {
        return tree_node;
    }

    path.insert(node.id().clone());
    for edge in graph.edges_from(node.id().as_str()) {
        if !config.is_child_link(edge) {
            continue;
        }
        let Some(target) = graph.node(edge.target().as_str()) else {
            continue;
        };
        if path.contains(target.id()) {
            // An ancestor on the current path: keep the link, stop the walk.
            tree_node.children.push(leaf(target));
        } else {
            tree_node.children.push(descend(graph, config, target, path, depth + 1));
        }
    }
    path.remove(node.id());

    tree_node
}

fn leaf(node: &Node) -> TreeNode {
    let label = if node.label().is_empty() {
        node.id().to_string()
    } else {
        node.label().to_string()
    };
    TreeNode {
        id: node.id().clone(),
        label,
        children: Vec::new(),
    }
}
