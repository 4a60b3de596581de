//! Indexed entity storage.
//!
//! An [`EntityStore`] owns the records of one entity kind and keeps two
//! reverse indices over them:
//! - **type index**: type label -> ids carrying that type
//! - **tag index**: tag label -> ids carrying that tag
//!
//! Every mutating call updates the indices before it returns, so no caller
//! can observe a window where an index disagrees with an entity.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entity::{Entity, EntityId};
use crate::error::GraphError;

/// Insertion-ordered storage for one entity kind, with type/tag indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore<T> {
    items: IndexMap<EntityId, T>,

    /// Index: type label -> ids of entities with that type.
    by_type: HashMap<String, IndexSet<EntityId>>,

    /// Index: tag label -> ids of entities carrying that tag.
    by_tag: HashMap<String, IndexSet<EntityId>>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
            by_type: HashMap::new(),
            by_tag: HashMap::new(),
        }
    }
}

impl<T: Entity> EntityStore<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity under its id.
    ///
    /// Fails with [`GraphError::DuplicateEntity`] if the id is taken.
    pub fn insert(&mut self, item: T) -> Result<EntityId, GraphError> {
        let id = item.id().clone();
        if self.items.contains_key(&id) {
            return Err(GraphError::DuplicateEntity(id));
        }
        self.index_item(&item);
        self.items.insert(id.clone(), item);
        Ok(id)
    }

    /// Insert the entity unless its id is taken, in which case the existing
    /// entity is left untouched. Never fails.
    pub fn ensure(&mut self, item: T) -> EntityId {
        let id = item.id().clone();
        if !self.items.contains_key(&id) {
            self.index_item(&item);
            self.items.insert(id.clone(), item);
        }
        id
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    /// Mutable access to an entity. Type and tags are only writable through
    /// the store's own setters, so the indices stay safe.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Remove an entity and drop it from every index.
    ///
    /// Iteration order of the remaining entities is preserved.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let item = self.items.shift_remove(id)?;
        self.unindex_item(&item);
        Some(item)
    }

    /// Entities with the given type, in insertion order.
    pub fn by_type<'a>(&'a self, entity_type: &str) -> impl Iterator<Item = &'a T> + 'a {
        self.by_type
            .get(entity_type)
            .into_iter()
            .flatten()
            .filter_map(|id| self.items.get(id))
    }

    /// Entities carrying the given tag, in insertion order.
    pub fn by_tag<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a T> + 'a {
        self.by_tag
            .get(tag)
            .into_iter()
            .flatten()
            .filter_map(|id| self.items.get(id))
    }

    /// All entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Mutable iteration in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace an entity's type label, re-indexing before returning.
    ///
    /// Returns `false` if the id is unknown.
    pub fn set_type(&mut self, id: &str, entity_type: impl Into<String>) -> bool {
        let entity_type = entity_type.into();
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        let data = item.data_mut();
        let old_type = data.entity_type().to_string();
        if old_type == entity_type {
            return true;
        }
        let owned_id = data.id().clone();
        data.set_entity_type(entity_type.clone());

        remove_from_index(&mut self.by_type, &old_type, &owned_id);
        self.by_type.entry(entity_type).or_default().insert(owned_id);
        true
    }

    /// Add a tag to an entity, re-indexing before returning.
    ///
    /// Returns `false` if the id is unknown.
    pub fn add_tag(&mut self, id: &str, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        let data = item.data_mut();
        let owned_id = data.id().clone();
        if data.insert_tag(tag.clone()) {
            self.by_tag.entry(tag).or_default().insert(owned_id);
        }
        true
    }

    /// Remove a tag from an entity, re-indexing before returning.
    ///
    /// Returns `false` if the id is unknown or the tag was not present.
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        let data = item.data_mut();
        let owned_id = data.id().clone();
        if !data.remove_tag(tag) {
            return false;
        }
        remove_from_index(&mut self.by_tag, tag, &owned_id);
        true
    }

    /// Replace an entity's whole tag set, re-indexing before returning.
    ///
    /// Returns `false` if the id is unknown.
    pub fn set_tags(&mut self, id: &str, tags: impl IntoIterator<Item = impl Into<String>>) -> bool {
        let new_tags: IndexSet<String> = tags.into_iter().map(Into::into).collect();
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        let data = item.data_mut();
        let owned_id = data.id().clone();
        let old_tags = data.replace_tags(new_tags.clone());

        for tag in &old_tags {
            if !new_tags.contains(tag) {
                remove_from_index(&mut self.by_tag, tag, &owned_id);
            }
        }
        for tag in new_tags {
            self.by_tag.entry(tag).or_default().insert(owned_id.clone());
        }
        true
    }

    /// Entities matching a case-insensitive substring query over id, type,
    /// and tags, in insertion order.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a T> + 'a {
        self.items.values().filter(move |item| item.matches_query(query))
    }

    fn index_item(&mut self, item: &T) {
        let data = item.data();
        let id = data.id().clone();
        self.by_type
            .entry(data.entity_type().to_string())
            .or_default()
            .insert(id.clone());
        for tag in data.tags() {
            self.by_tag.entry(tag.clone()).or_default().insert(id.clone());
        }
    }

    fn unindex_item(&mut self, item: &T) {
        let data = item.data();
        remove_from_index(&mut self.by_type, data.entity_type(), data.id());
        for tag in data.tags() {
            remove_from_index(&mut self.by_tag, tag, data.id());
        }
    }
}

/// Drop an id from one index bucket, retiring the bucket when it empties.
fn remove_from_index(index: &mut HashMap<String, IndexSet<EntityId>>, key: &str, id: &EntityId) {
    if let Some(ids) = index.get_mut(key) {
        ids.shift_remove(id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Node;

    fn ids<'a>(iter: impl Iterator<Item = &'a Node>) -> Vec<&'a str> {
        iter.map(|n| n.id().as_str()).collect()
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = EntityStore::new();
        store.insert(Node::new("n1").with_type("Person")).expect("fresh id");

        assert!(store.contains("n1"));
        assert_eq!(store.get("n1").map(|n| n.entity_type()), Some("Person"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_fails() {
        let mut store = EntityStore::new();
        store.insert(Node::new("n1")).expect("fresh id");

        let err = store.insert(Node::new("n1")).expect_err("duplicate id");
        assert_eq!(err, GraphError::DuplicateEntity(EntityId::new("n1")));
    }

    #[test]
    fn test_ensure_keeps_existing() {
        let mut store = EntityStore::new();
        store.insert(Node::new("n1").with_type("Person")).expect("fresh id");

        store.ensure(Node::new("n1").with_type("Robot"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("n1").map(|n| n.entity_type()), Some("Person"));
    }

    #[test]
    fn test_iteration_is_insertion_ordered() {
        let mut store = EntityStore::new();
        for id in ["c", "a", "b"] {
            store.insert(Node::new(id)).expect("fresh id");
        }
        assert_eq!(ids(store.iter()), ["c", "a", "b"]);

        store.remove("a");
        store.insert(Node::new("d")).expect("fresh id");
        assert_eq!(ids(store.iter()), ["c", "b", "d"]);
    }

    #[test]
    fn test_type_index_follows_set_type() {
        let mut store = EntityStore::new();
        store.insert(Node::new("n1").with_type("Person")).expect("fresh id");
        store.insert(Node::new("n2").with_type("Person")).expect("fresh id");

        assert_eq!(ids(store.by_type("Person")), ["n1", "n2"]);

        assert!(store.set_type("n1", "Robot"));
        assert_eq!(ids(store.by_type("Person")), ["n2"]);
        assert_eq!(ids(store.by_type("Robot")), ["n1"]);
        assert_eq!(store.get("n1").map(|n| n.entity_type()), Some("Robot"));
    }

    #[test]
    fn test_tag_index_follows_mutations() {
        let mut store = EntityStore::new();
        store.insert(Node::new("n1").with_tag("red")).expect("fresh id");

        assert!(store.add_tag("n1", "blue"));
        assert_eq!(ids(store.by_tag("red")), ["n1"]);
        assert_eq!(ids(store.by_tag("blue")), ["n1"]);

        assert!(store.remove_tag("n1", "red"));
        assert_eq!(ids(store.by_tag("red")), Vec::<&str>::new());

        assert!(store.set_tags("n1", ["green", "yellow"]));
        assert_eq!(ids(store.by_tag("blue")), Vec::<&str>::new());
        assert_eq!(ids(store.by_tag("green")), ["n1"]);
        assert_eq!(ids(store.by_tag("yellow")), ["n1"]);
    }

    #[test]
    fn test_remove_unindexes() {
        let mut store = EntityStore::new();
        store
            .insert(Node::new("n1").with_type("Person").with_tag("red"))
            .expect("fresh id");

        let removed = store.remove("n1");
        assert!(removed.is_some());
        assert_eq!(ids(store.by_type("Person")), Vec::<&str>::new());
        assert_eq!(ids(store.by_tag("red")), Vec::<&str>::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_index_consistency_after_mutation_sequence() {
        let mut store = EntityStore::new();
        store.insert(Node::new("n1").with_type("A").with_tag("x")).expect("fresh id");
        store.insert(Node::new("n2").with_type("A").with_tag("y")).expect("fresh id");
        store.insert(Node::new("n3").with_type("B")).expect("fresh id");

        store.set_type("n2", "B");
        store.add_tag("n3", "x");
        store.remove_tag("n1", "x");
        store.set_tags("n2", ["x", "z"]);

        for node in store.iter() {
            let id = node.id().as_str();
            assert!(ids(store.by_type(node.entity_type())).contains(&id));
            for tag in node.tags() {
                assert!(ids(store.by_tag(tag)).contains(&id));
            }
        }
        assert_eq!(ids(store.by_type("A")), ["n1"]);
        assert_eq!(ids(store.by_type("B")), ["n3", "n2"]);
        assert_eq!(ids(store.by_tag("x")), ["n3", "n2"]);
    }

    #[test]
    fn test_search() {
        let mut store = EntityStore::new();
        store.insert(Node::new("alpha-1").with_type("Person")).expect("fresh id");
        store.insert(Node::new("beta-2").with_tag("alphabet")).expect("fresh id");
        store.insert(Node::new("gamma-3")).expect("fresh id");

        assert_eq!(ids(store.search("ALPHA")), ["alpha-1", "beta-2"]);
        assert_eq!(ids(store.search("person")), ["alpha-1"]);
        assert_eq!(ids(store.search("nothing")), Vec::<&str>::new());
    }
}
