//! Error types for strict display resolution.

use thiserror::Error;

/// Errors produced by the strict diagnostic resolution mode.
///
/// Normal resolution never fails; it falls back to the documented
/// sentinels instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// The key an entity resolves through has no configuration entry.
    #[error("no display entry for key `{0}`")]
    UnresolvedColor(String),
}
