//! ldgraph-adapter: Builds a deduplicated property graph from linked-data records.
//!
//! Reads JSON-LD records describing datasets and chemical substances,
//! dispatches each on its declared type, and wires the nested entities it
//! references into typed nodes and edges. Identity indices guarantee at
//! most one node per id and one edge per (parent, child, type) within a
//! build pass. The finished graph is handed out as node and edge tuples
//! for an external graph writer.

pub mod adapter;
pub mod config;
pub mod error;
pub mod fields;
pub mod index;
pub mod loader;
pub mod traversal;

pub use adapter::{Adapter, BuildSummary};
pub use config::BuildConfig;
pub use error::AdapterError;
pub use index::GraphBuilder;
