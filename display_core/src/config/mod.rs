//! Display configuration - the two-mode mapping from type/tag keys to
//! color and visibility.
//!
//! A [`RenderingConfig`] bundles four key maps (node-by-type, node-by-tag,
//! edge-by-type, edge-by-tag), the current [`DisplayMode`], and a sparse
//! node-position cache written by the layout collaborator.

mod generator;
mod palette;
mod resolver;

pub use generator::*;
pub use palette::*;
pub use resolver::*;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use entity_graph::{EntityId, Position, DEFAULT_COLOR};

/// Which label an entity is resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    /// Resolve through the single type label.
    #[default]
    Type,
    /// Resolve through the tag set, first configured tag winning.
    Tag,
}

/// Which entity kind a concern addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Node,
    Edge,
}

/// Display settings for one type or tag key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub color: String,
    pub visible: bool,
}

impl DisplayEntry {
    pub fn new(color: impl Into<String>, visible: bool) -> Self {
        Self {
            color: color.into(),
            visible,
        }
    }
}

impl Default for DisplayEntry {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            visible: true,
        }
    }
}

/// An insertion-ordered map from type/tag keys to display entries.
///
/// Key order is preserved because the legend renders these maps directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    entries: IndexMap<String, DisplayEntry>,
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&DisplayEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut DisplayEntry> {
        self.entries.get_mut(key)
    }

    /// Insert or overwrite the entry for a key.
    pub fn set(&mut self, key: impl Into<String>, entry: DisplayEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Create an entry only if the key has none yet.
    ///
    /// Returns `true` when a new entry was created.
    pub fn ensure(&mut self, key: &str, default: impl FnOnce() -> DisplayEntry) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), default());
        true
    }

    /// Remove an entry, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<DisplayEntry> {
        self.entries.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in key insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DisplayEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Flip visibility for a key. Returns `false` if the key has no entry.
    pub fn set_visible(&mut self, key: &str, visible: bool) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Recolor a key. Returns `false` if the key has no entry.
    pub fn set_color(&mut self, key: &str, color: impl Into<String>) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.color = color.into();
                true
            }
            None => false,
        }
    }
}

impl FromIterator<(String, DisplayEntry)> for DisplayConfig {
    fn from_iter<I: IntoIterator<Item = (String, DisplayEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The complete display state: four key maps, the current mode, and the
/// layout engine's sparse node-position cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderingConfig {
    pub node_types: DisplayConfig,
    pub node_tags: DisplayConfig,
    pub edge_types: DisplayConfig,
    pub edge_tags: DisplayConfig,

    /// The mode resolution currently keys off.
    pub mode: DisplayMode,

    /// Cached layout positions. Missing entries read as the origin.
    #[serde(default)]
    pub positions: HashMap<EntityId, Position>,
}

impl RenderingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The key map for one entity class under one mode.
    pub fn config(&self, class: EntityClass, mode: DisplayMode) -> &DisplayConfig {
        match (class, mode) {
            (EntityClass::Node, DisplayMode::Type) => &self.node_types,
            (EntityClass::Node, DisplayMode::Tag) => &self.node_tags,
            (EntityClass::Edge, DisplayMode::Type) => &self.edge_types,
            (EntityClass::Edge, DisplayMode::Tag) => &self.edge_tags,
        }
    }

    pub fn config_mut(&mut self, class: EntityClass, mode: DisplayMode) -> &mut DisplayConfig {
        match (class, mode) {
            (EntityClass::Node, DisplayMode::Type) => &mut self.node_types,
            (EntityClass::Node, DisplayMode::Tag) => &mut self.node_tags,
            (EntityClass::Edge, DisplayMode::Type) => &mut self.edge_types,
            (EntityClass::Edge, DisplayMode::Tag) => &mut self.edge_tags,
        }
    }

    /// The key map for one entity class under the current mode.
    pub fn current(&self, class: EntityClass) -> &DisplayConfig {
        self.config(class, self.mode)
    }

    /// Read a cached position; missing entries default to the origin.
    pub fn position_of(&self, id: &str) -> Position {
        self.positions.get(id).copied().unwrap_or_default()
    }

    /// Cache a layout position. Called by the layout collaborator.
    pub fn set_position(&mut self, id: impl Into<EntityId>, position: Position) {
        self.positions.insert(id.into(), position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_is_non_destructive() {
        let mut config = DisplayConfig::new();
        assert!(config.ensure("Person", || DisplayEntry::new("blue", true)));
        assert!(!config.ensure("Person", || DisplayEntry::new("red", false)));

        let entry = config.get("Person").expect("ensured entry");
        assert_eq!(entry.color, "blue");
        assert!(entry.visible);
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut config = DisplayConfig::new();
        config.set("b", DisplayEntry::default());
        config.set("a", DisplayEntry::default());
        config.set("c", DisplayEntry::default());
        config.remove("a");
        config.set("d", DisplayEntry::default());

        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys, ["b", "c", "d"]);
    }

    #[test]
    fn test_set_visible_and_color() {
        let mut config = DisplayConfig::new();
        config.set("Person", DisplayEntry::new("blue", true));

        assert!(config.set_visible("Person", false));
        assert!(config.set_color("Person", "red"));
        assert!(!config.set_visible("Ghost", false));

        let entry = config.get("Person").expect("entry");
        assert_eq!(entry.color, "red");
        assert!(!entry.visible);
    }

    #[test]
    fn test_rendering_config_map_selection() {
        let mut rendering = RenderingConfig::new();
        rendering.node_types.set("Person", DisplayEntry::new("blue", true));
        rendering.edge_tags.set("social", DisplayEntry::new("green", true));

        assert!(rendering.config(EntityClass::Node, DisplayMode::Type).contains("Person"));
        assert!(rendering.config(EntityClass::Edge, DisplayMode::Tag).contains("social"));
        assert!(rendering.config(EntityClass::Node, DisplayMode::Tag).is_empty());

        rendering.mode = DisplayMode::Tag;
        assert!(rendering.current(EntityClass::Edge).contains("social"));
    }

    #[test]
    fn test_missing_position_reads_as_origin() {
        let mut rendering = RenderingConfig::new();
        rendering.set_position("n1", Position::new(1.0, 2.0, 0.0));

        assert_eq!(rendering.position_of("n1"), Position::new(1.0, 2.0, 0.0));
        assert_eq!(rendering.position_of("ghost"), Position::origin());
    }
}
