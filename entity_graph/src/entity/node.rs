//! Node definitions.

use serde::{Deserialize, Serialize};

use super::{Entity, EntityData, EntityId, Position};

/// A node in the entity graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    data: EntityData,
}

impl Node {
    /// Create a new node with the given id.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            data: EntityData::new(id),
        }
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

    /// The cached layout position, if any.
    pub fn position(&self) -> Option<Position> {
        self.data.position
    }

    /// Cache a layout position. Called by layout collaborators.
    pub fn set_position(&mut self, position: Position) {
        self.data.position = Some(position);
    }
}

impl Entity for Node {
    fn data(&self) -> &EntityData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut EntityData {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = Node::new("n1")
            .with_type("Person")
            .with_tag("friendly")
            .with_tag("important")
            .with_label("Alice");

        assert_eq!(node.id().as_str(), "n1");
        assert_eq!(node.entity_type(), "Person");
        assert!(node.has_tag("friendly"));
        assert!(node.has_tag("important"));
        assert_eq!(node.label(), "Alice");
    }

    #[test]
    fn test_node_position() {
        let mut node = Node::new("n1");
        assert!(node.position().is_none());

        node.set_position(Position::new(1.0, 2.0, 3.0));
        assert_eq!(node.position(), Some(Position::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_node_user_data() {
        let node = Node::new("n1").with_user_data("weight", serde_json::json!(0.5));
        assert_eq!(node.data().user_data["weight"], serde_json::json!(0.5));
    }
}
