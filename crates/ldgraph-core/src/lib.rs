//! ldgraph-core: Shared types for the linked-data graph builder.
//!
//! This crate provides the foundational types used by the adapter:
//! - Node labels and edge kinds of the property graph
//! - The `Node` / `Edge` entity model with open scalar field maps
//! - `RecordValue` / `Record`, the tagged form of raw JSON-LD input
//! - Injectable identifier generation
//! - Common error types

pub mod error;
pub mod ids;
pub mod record;
pub mod types;

pub use error::RecordError;
pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use record::{Record, RecordValue};
pub use types::{
    Edge, EdgeIdx, EdgeRecord, EdgeType, FieldMap, FieldValue, Node, NodeIdx, NodeLabel,
    NodeRecord,
};
