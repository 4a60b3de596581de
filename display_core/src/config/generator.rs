//! Default display-configuration generation.

use entity_graph::{Entity, Graph};

use super::{palette, DisplayConfig, DisplayEntry, RenderingConfig};

/// Extend a configuration so every type and tag present in the graph has an
/// entry, without touching entries that already exist.
///
/// New entries are visible and get a palette color. Calling this again with
/// the result as the starter is a no-op.
pub fn generate_default_config(graph: &Graph, starter: Option<RenderingConfig>) -> RenderingConfig {
    let mut config = starter.unwrap_or_default();
    let mut created = 0usize;

    for node in graph.nodes() {
        created += ensure_key(&mut config.node_types, node.entity_type());
        for tag in node.tags() {
            created += ensure_key(&mut config.node_tags, tag);
        }
    }
    for edge in graph.edges() {
        created += ensure_key(&mut config.edge_types, edge.entity_type());
        for tag in edge.tags() {
            created += ensure_key(&mut config.edge_tags, tag);
        }
    }

    if created > 0 {
        log::debug!("created {created} default display entries");
    }
    config
}

/// Untyped entities resolve through the sentinel, not a config entry.
fn ensure_key(config: &mut DisplayConfig, key: &str) -> usize {
    if key.is_empty() {
        return 0;
    }
    usize::from(config.ensure(key, || DisplayEntry::new(palette::color_for(key), true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::palette::in_palette;
    use entity_graph::{Edge, Node};

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        graph
            .add_node(Node::new("n1").with_type("Person").with_tag("friendly"))
            .expect("fresh id");
        graph
            .add_node(Node::new("n2").with_type("Place").with_tags(["friendly", "remote"]))
            .expect("fresh id");
        graph
            .add_edge(Edge::new("e1", "n1", "n2").with_type("visits").with_tag("travel"))
            .expect("valid edge");
        graph
    }

    #[test]
    fn test_every_key_gets_an_entry() {
        let config = generate_default_config(&sample_graph(), None);

        for key in ["Person", "Place"] {
            let entry = config.node_types.get(key).expect("node type entry");
            assert!(entry.visible);
            assert!(in_palette(&entry.color));
        }
        for key in ["friendly", "remote"] {
            assert!(config.node_tags.contains(key));
        }
        assert!(config.edge_types.contains("visits"));
        assert!(config.edge_tags.contains("travel"));
    }

    #[test]
    fn test_existing_entries_survive() {
        let mut starter = RenderingConfig::new();
        starter.node_types.set("Person", DisplayEntry::new("black", false));

        let config = generate_default_config(&sample_graph(), Some(starter));

        let entry = config.node_types.get("Person").expect("starter entry");
        assert_eq!(entry.color, "black");
        assert!(!entry.visible);
        assert!(config.node_types.contains("Place"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let graph = sample_graph();
        let first = generate_default_config(&graph, None);
        let second = generate_default_config(&graph, Some(first.clone()));

        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_config_drives_resolution() {
        use crate::config::{color_by_type, edge_visible, DisplayMode};
        use entity_graph::Entity;

        let mut graph = Graph::new();
        graph.add_node(Node::new("n1").with_type("Foo")).expect("fresh id");
        graph.add_node(Node::new("n2").with_type("Bar")).expect("fresh id");
        graph
            .add_edge(Edge::new("e1", "n1", "n2").with_type("rel"))
            .expect("valid edge");

        let mut config = generate_default_config(&graph, None);

        let n1 = graph.node("n1").expect("node");
        let assigned = config.node_types.get("Foo").expect("generated entry").color.clone();
        assert_eq!(color_by_type(n1, &config.node_types), assigned);

        let e1 = graph.edge("e1").expect("edge");
        assert!(edge_visible(e1, &graph, &config, DisplayMode::Type));

        // Hiding the source's type hides the edge even though its own
        // entry stays visible.
        config.node_types.set_visible("Foo", false);
        assert!(config.edge_types.get("rel").expect("generated entry").visible);
        assert!(!edge_visible(e1, &graph, &config, DisplayMode::Type));
    }

    #[test]
    fn test_untyped_entities_create_no_entry() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("n1")).expect("fresh id");

        let config = generate_default_config(&graph, None);
        assert!(config.node_types.is_empty());
    }
}
