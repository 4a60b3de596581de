//! Entity definitions - the shared record carried by every node and edge.

mod edge;
mod node;

pub use edge::*;
pub use node::*;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The sentinel color entities start with and display resolution falls back to.
pub const DEFAULT_COLOR: &str = "grey";

/// Unique identifier for entities, opaque to the engine.
///
/// Callers usually bring their own ids (import records, UI handles);
/// [`EntityId::random`] mints one for callers that do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::borrow::Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cached layout position. Written only by layout collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The origin, used when no cached position exists.
    pub fn origin() -> Self {
        Self::default()
    }
}

fn default_visible() -> bool {
    true
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// The fields every graph entity carries.
///
/// `entity_type` and `tags` are mutable only through the owning store, which
/// keeps the type/tag indices in step with every change. `color` and
/// `visible` are derived values written by the display pass via
/// [`EntityData::set_resolved`]; application code never sets them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityData {
    id: EntityId,

    /// Single classification label.
    entity_type: String,

    /// Non-exclusive labels, iterated in insertion order.
    tags: IndexSet<String>,

    /// Human-readable name. Falls back to the id where a name is needed.
    pub label: String,

    pub description: String,

    /// Derived visibility, recomputed by the display pass.
    #[serde(default = "default_visible")]
    visible: bool,

    /// Derived color, recomputed by the display pass.
    #[serde(default = "default_color")]
    color: String,

    /// Opaque bag owned by external collaborators.
    #[serde(default)]
    pub user_data: HashMap<String, serde_json::Value>,

    /// Cached layout position, if the layout engine supplied one.
    #[serde(default)]
    pub position: Option<Position>,
}

impl EntityData {
    /// Create a fresh record with derived fields at their defaults.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            entity_type: String::new(),
            tags: IndexSet::new(),
            label: String::new(),
            description: String::new(),
            visible: true,
            color: DEFAULT_COLOR.to_string(),
            user_data: HashMap::new(),
            position: None,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Tags in insertion order.
    pub fn tags(&self) -> &IndexSet<String> {
        &self.tags
    }

    /// Check whether this entity carries a specific tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Write the resolved color/visibility pair. Called by the display pass.
    pub fn set_resolved(&mut self, color: impl Into<String>, visible: bool) {
        self.color = color.into();
        self.visible = visible;
    }

    /// Case-insensitive substring match over id, type, and tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.id.as_str().to_lowercase().contains(&query)
            || self.entity_type.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }

    pub(crate) fn set_entity_type(&mut self, entity_type: String) {
        self.entity_type = entity_type;
    }

    pub(crate) fn insert_tag(&mut self, tag: String) -> bool {
        self.tags.insert(tag)
    }

    pub(crate) fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.shift_remove(tag)
    }

    pub(crate) fn replace_tags(&mut self, tags: IndexSet<String>) -> IndexSet<String> {
        std::mem::replace(&mut self.tags, tags)
    }
}

/// Shared read access to the record behind a node or edge.
///
/// This is the seam the display resolver works through: it only ever needs
/// the type, the ordered tag set, and the derived color/visibility pair.
pub trait Entity {
    fn data(&self) -> &EntityData;
    fn data_mut(&mut self) -> &mut EntityData;

    fn id(&self) -> &EntityId {
        self.data().id()
    }

    fn entity_type(&self) -> &str {
        self.data().entity_type()
    }

    /// Tags in insertion order.
    fn tags(&self) -> &IndexSet<String> {
        self.data().tags()
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.data().has_tag(tag)
    }

    fn label(&self) -> &str {
        &self.data().label
    }

    fn visible(&self) -> bool {
        self.data().visible()
    }

    fn color(&self) -> &str {
        self.data().color()
    }

    /// Case-insensitive substring match over id, type, and tags.
    fn matches_query(&self, query: &str) -> bool {
        self.data().matches_query(query)
    }
}
