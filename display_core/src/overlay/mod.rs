//! Committed/active display overlays.
//!
//! The committed configuration is the persisted baseline; the active one is
//! the ephemeral overlay the legend works against while the user highlights
//! and filters. Scoping the active overlay to currently-visible keys keeps
//! the legend small without destroying customization stored in the
//! committed baseline.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use entity_graph::{Entity, EntityId, Graph};

use crate::config::{
    resolve_color, resolve_visibility, DisplayEntry, DisplayMode, EntityClass, RenderingConfig,
};

/// Keys the filter-rule evaluator wants kept in a scoped configuration even
/// when no visible entity carries them, per entity class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncludedKeys {
    pub node_keys: HashSet<String>,
    pub edge_keys: HashSet<String>,
}

impl IncludedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    fn for_class(&self, class: EntityClass) -> &HashSet<String> {
        match class {
            EntityClass::Node => &self.node_keys,
            EntityClass::Edge => &self.edge_keys,
        }
    }
}

/// Resolve and write display state onto every entity in the graph.
///
/// Two passes, nodes strictly before edges: an edge is visible only when
/// its own per-mode entry and both endpoint nodes are, so the edge pass
/// consumes the node visibilities resolved in pass one. Cached layout
/// positions carried by the config are applied alongside.
pub fn apply_to_graph(graph: &mut Graph, config: &RenderingConfig, mode: DisplayMode) {
    let node_config = config.config(EntityClass::Node, mode);
    let mut node_visible: HashMap<EntityId, bool> = HashMap::with_capacity(graph.node_count());

    for node in graph.nodes_mut() {
        let color = resolve_color(&*node, node_config, mode).to_string();
        let visible = resolve_visibility(&*node, node_config, mode);
        if let Some(position) = config.positions.get(node.id().as_str()).copied() {
            node.set_position(position);
        }
        node_visible.insert(node.id().clone(), visible);
        node.data_mut().set_resolved(color, visible);
    }

    let edge_config = config.config(EntityClass::Edge, mode);
    let unconfigured = edge_config.is_empty();

    for edge in graph.edges_mut() {
        let color = resolve_color(&*edge, edge_config, mode).to_string();
        let visible = if unconfigured {
            true
        } else {
            resolve_visibility(&*edge, edge_config, mode)
                && node_visible.get(edge.source()).copied().unwrap_or(false)
                && node_visible.get(edge.target()).copied().unwrap_or(false)
        };
        edge.data_mut().set_resolved(color, visible);
    }

    log::debug!(
        "applied {mode:?}-mode display state to {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
}

/// Prune a committed configuration down to the keys worth showing in the
/// legend: those carried by at least one currently-visible entity, plus
/// those the filter-rule evaluator explicitly includes.
///
/// Committed key order is preserved; keys discovered on entities but absent
/// from the committed maps append after, with overlay or defaulted entries.
/// Colors come from the active overlay when it has the key, else from the
/// committed baseline.
pub fn scoped_config_for_visible_entities(
    graph: &Graph,
    committed: &RenderingConfig,
    overlay_colors: &RenderingConfig,
    mode: DisplayMode,
    included: Option<&IncludedKeys>,
) -> RenderingConfig {
    let mut scoped = RenderingConfig {
        mode,
        ..RenderingConfig::default()
    };

    for class in [EntityClass::Node, EntityClass::Edge] {
        let carried = carried_keys(graph, class, mode);
        let committed_config = committed.config(class, mode);
        let overlay_config = overlay_colors.config(class, mode);
        let included_keys = included.map(|keys| keys.for_class(class));

        let out = scoped.config_mut(class, mode);
        for (key, entry) in committed_config.iter() {
            let keep = carried.contains(key)
                || included_keys.is_some_and(|keys| keys.contains(key));
            if !keep {
                continue;
            }
            let color = overlay_config
                .get(key)
                .map(|overlay_entry| overlay_entry.color.clone())
                .unwrap_or_else(|| entry.color.clone());
            out.set(key, DisplayEntry::new(color, entry.visible));
        }
        for key in carried {
            if out.contains(&key) {
                continue;
            }
            let entry = overlay_config.get(&key).cloned().unwrap_or_default();
            out.set(key, entry);
        }
    }

    scoped
}

/// Keys carried by currently-visible entities of one class, in discovery
/// order.
fn carried_keys(graph: &Graph, class: EntityClass, mode: DisplayMode) -> IndexSet<String> {
    let mut keys = IndexSet::new();
    match class {
        EntityClass::Node => {
            for node in graph.nodes().filter(|node| node.visible()) {
                collect_keys(node, mode, &mut keys);
            }
        }
        EntityClass::Edge => {
            for edge in graph.edges().filter(|edge| edge.visible()) {
                collect_keys(edge, mode, &mut keys);
            }
        }
    }
    keys
}

fn collect_keys(entity: &impl Entity, mode: DisplayMode, keys: &mut IndexSet<String>) {
    match mode {
        DisplayMode::Type => {
            if !entity.entity_type().is_empty() {
                keys.insert(entity.entity_type().to_string());
            }
        }
        DisplayMode::Tag => {
            for tag in entity.tags() {
                keys.insert(tag.clone());
            }
        }
    }
}

/// The committed baseline and its ephemeral working overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayManager {
    /// The persisted baseline configuration.
    pub committed: RenderingConfig,

    /// The transient overlay the legend mutates.
    pub active: RenderingConfig,
}

impl OverlayManager {
    /// Start with a committed baseline; the active overlay begins as a copy.
    pub fn new(committed: RenderingConfig) -> Self {
        let active = committed.clone();
        Self { committed, active }
    }

    /// Apply the committed baseline to the graph under its own mode.
    pub fn apply_committed(&self, graph: &mut Graph) {
        apply_to_graph(graph, &self.committed, self.committed.mode);
    }

    /// Apply the active overlay to the graph under its own mode.
    pub fn apply_active(&self, graph: &mut Graph) {
        apply_to_graph(graph, &self.active, self.active.mode);
    }

    /// Switch both configurations to a new mode.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.committed.mode = mode;
        self.active.mode = mode;
    }

    /// Promote the working overlay to the new baseline.
    pub fn commit_active(&mut self) {
        self.committed = self.active.clone();
    }

    /// Discard the working overlay and rederive it as the committed
    /// baseline scoped to what is currently visible.
    pub fn reset_active_to_committed(&mut self, graph: &Graph) {
        self.active = scoped_config_for_visible_entities(
            graph,
            &self.committed,
            &RenderingConfig::default(),
            self.committed.mode,
            None,
        );
    }
}
