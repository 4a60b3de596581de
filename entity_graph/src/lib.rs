//! # Entity Graph
//!
//! The typed entity graph for Lattice. Nodes and edges carry a single type
//! label, an ordered set of tags, derived display state, and an opaque
//! user-data bag; the stores keep type/tag indices consistent with every
//! mutation, and the graph layer adds adjacency and lifecycle on top.
//!
//! ## Core Components
//!
//! - **entity**: The shared entity record, node and edge types, ids
//! - **store**: Insertion-ordered storage with type/tag reverse indices
//! - **graph**: The composed graph - adjacency, cascade removal, bulk import
//!
//! ## Design Philosophy
//!
//! - **Index consistency**: Indices are updated inside every mutating call,
//!   never lazily, so observers cannot see a stale index
//! - **Explicit strictness**: Duplicate ids and dangling endpoints fail;
//!   the forgiving behavior is a separate ensure-style call, never a guess
//! - **Derived display state**: Color and visibility on entities are cache
//!   fields owned by the display pass, not application data

pub mod entity;
pub mod error;
pub mod graph;
pub mod store;

pub use entity::*;
pub use error::*;
pub use graph::*;
pub use store::*;
