//! Error types for graph mutation.

use thiserror::Error;

use crate::entity::EntityId;

/// Errors produced by strict graph mutation.
///
/// All variants are local, recoverable outcomes; the ensure-style
/// operations exist for callers that want the forgiving behavior instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Strict creation was asked to reuse an existing id.
    #[error("entity `{0}` already exists")]
    DuplicateEntity(EntityId),

    /// An edge names a node that is not in the graph.
    #[error("edge `{edge}` references missing node `{endpoint}`")]
    UnknownEndpoint { edge: EntityId, endpoint: EntityId },
}
