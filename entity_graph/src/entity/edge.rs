//! Edge definitions.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityData, EntityId};

/// A directed edge between two nodes.
///
/// The endpoints are fixed at creation; rewiring an edge is spelled
/// remove-and-recreate so the adjacency indices never chase moving targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    data: EntityData,
    source: EntityId,
    target: EntityId,
}

impl Edge {
    /// Create a new edge from `source` to `target`.
    pub fn new(
        id: impl Into<EntityId>,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
    ) -> Self {
        Self {
            data: EntityData::new(id),
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> &EntityId {
        &self.source
    }

    pub fn target(&self) -> &EntityId {
        &self.target
    }

    /// Check whether this edge has the given node as source or target.
    pub fn touches(&self, id: &str) -> bool {
        self.source.as_str() == id || self.target.as_str() == id
    }

    /// Set the type label.
    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.data.set_entity_type(entity_type.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.data.insert_tag(tag.into());
        self
    }

    /// Add multiple tags, preserving the given order.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            self.data.insert_tag(tag.into());
        }
        self
    }

    /// Set the human-readable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = label.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.data.description = description.into();
        self
    }

    /// Attach an opaque user-data value.
    pub fn with_user_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.user_data.insert(key.into(), value);
        self
    }
}

impl Entity for Edge {
    fn data(&self) -> &EntityData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut EntityData {
        &mut self.data
    }
}
