//! Color and visibility resolution.
//!
//! All functions here are pure: (entity, configuration, mode) in, logical
//! color or visibility out. Nothing is cached and no ambient state is
//! consulted; the overlay layer is responsible for writing results back
//! onto entities.
//!
//! Tag-mode resolution iterates tags in their insertion order, so the
//! "first matching tag wins" tie-break is deterministic.

use entity_graph::{Edge, Entity, EntityId, Graph, DEFAULT_COLOR};

use super::{DisplayConfig, DisplayMode, EntityClass, RenderingConfig};
use crate::error::DisplayError;

/// Color keyed by the type label; sentinel when the type has no entry.
pub fn color_by_type<'c>(entity: &impl Entity, config: &'c DisplayConfig) -> &'c str {
    config
        .get(entity.entity_type())
        .map(|entry| entry.color.as_str())
        .unwrap_or(DEFAULT_COLOR)
}

/// Color of the first configured tag, in tag insertion order; sentinel when
/// no tag matches or the entity has none.
pub fn color_by_tag<'c>(entity: &impl Entity, config: &'c DisplayConfig) -> &'c str {
    entity
        .tags()
        .iter()
        .find_map(|tag| config.get(tag))
        .map(|entry| entry.color.as_str())
        .unwrap_or(DEFAULT_COLOR)
}

/// Visibility keyed by the type label. An unconfigured type is visible.
pub fn visible_by_type(entity: &impl Entity, config: &DisplayConfig) -> bool {
    config
        .get(entity.entity_type())
        .map(|entry| entry.visible)
        .unwrap_or(true)
}

/// Visibility of the first configured tag, in tag insertion order.
///
/// Asymmetric with type mode: an entity whose tags are all unconfigured is
/// hidden, while an entity with no tags at all stays visible.
pub fn visible_by_tag(entity: &impl Entity, config: &DisplayConfig) -> bool {
    if entity.tags().is_empty() {
        return true;
    }
    match entity.tags().iter().find_map(|tag| config.get(tag)) {
        Some(entry) => entry.visible,
        None => false,
    }
}

/// Resolve an entity's color under the given mode.
pub fn resolve_color<'c>(entity: &impl Entity, config: &'c DisplayConfig, mode: DisplayMode) -> &'c str {
    match mode {
        DisplayMode::Type => color_by_type(entity, config),
        DisplayMode::Tag => color_by_tag(entity, config),
    }
}

/// Resolve an entity's visibility under the given mode.
pub fn resolve_visibility(entity: &impl Entity, config: &DisplayConfig, mode: DisplayMode) -> bool {
    match mode {
        DisplayMode::Type => visible_by_type(entity, config),
        DisplayMode::Tag => visible_by_tag(entity, config),
    }
}

/// Strict color resolution for tooling that wants incomplete configurations
/// surfaced instead of papered over with the sentinel.
///
/// Fails with [`DisplayError::UnresolvedColor`] when the key an entity
/// would resolve through has no entry. An entity with no tags has no key to
/// miss in tag mode and resolves to the sentinel.
pub fn resolve_color_strict<'c>(
    entity: &impl Entity,
    config: &'c DisplayConfig,
    mode: DisplayMode,
) -> Result<&'c str, DisplayError> {
    match mode {
        DisplayMode::Type => config
            .get(entity.entity_type())
            .map(|entry| entry.color.as_str())
            .ok_or_else(|| DisplayError::UnresolvedColor(entity.entity_type().to_string())),
        DisplayMode::Tag => {
            if entity.tags().is_empty() {
                return Ok(DEFAULT_COLOR);
            }
            entity
                .tags()
                .iter()
                .find_map(|tag| config.get(tag))
                .map(|entry| entry.color.as_str())
                .ok_or_else(|| {
                    DisplayError::UnresolvedColor(entity.tags().first().cloned().unwrap_or_default())
                })
        }
    }
}

/// Whether an edge should be shown: its own per-mode visibility must
/// resolve true and both endpoints must be visible under the same mode.
///
/// Escape hatch: a completely empty per-mode edge map means the display has
/// never been configured, and every edge is treated as visible.
pub fn edge_visible(edge: &Edge, graph: &Graph, rendering: &RenderingConfig, mode: DisplayMode) -> bool {
    let edge_config = rendering.config(EntityClass::Edge, mode);
    if edge_config.is_empty() {
        return true;
    }
    if !resolve_visibility(edge, edge_config, mode) {
        return false;
    }
    let node_config = rendering.config(EntityClass::Node, mode);
    endpoint_visible(graph, edge.source(), node_config, mode)
        && endpoint_visible(graph, edge.target(), node_config, mode)
}

/// A dangling endpoint counts as invisible rather than a failure; the
/// strict creation contract makes it unreachable through normal mutation.
fn endpoint_visible(graph: &Graph, id: &EntityId, config: &DisplayConfig, mode: DisplayMode) -> bool {
    graph
        .node(id.as_str())
        .map(|node| resolve_visibility(node, config, mode))
        .unwrap_or(false)
}
