//! The adapter façade: one full build pass plus node/edge emission.

use ldgraph_core::{Edge, EdgeRecord, IdGenerator, Node, NodeRecord, Record};
use serde::Serialize;

use crate::config::BuildConfig;
use crate::error::{AdapterError, Result};
use crate::fields::FieldExtractor;
use crate::index::{BuiltGraph, GraphBuilder};
use crate::traversal::{Dispatch, Traversal};

/// Totals for a finished build pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub records: usize,
    pub skipped_records: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Nodes carrying nothing but their id.
    pub stub_nodes: usize,
}

/// Builds the graph for a record sequence once, then serves it to a writer.
///
/// Nodes are emitted with stable ids. Every edge emission draws a fresh
/// relationship id from the id generator, independent of the edge's own id.
pub struct Adapter {
    config: BuildConfig,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    ids: Box<dyn IdGenerator>,
    summary: BuildSummary,
}

impl Adapter {
    /// Build with the id generator `config` asks for.
    pub fn new(records: impl IntoIterator<Item = Record>, config: BuildConfig) -> Result<Self> {
        let ids = config.id_generator();
        Self::with_id_generator(records, config, ids)
    }

    /// Build with an explicit id generator.
    ///
    /// The first record missing a required key aborts the whole build.
    pub fn with_id_generator(
        records: impl IntoIterator<Item = Record>,
        config: BuildConfig,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self> {
        let start = std::time::Instant::now();
        let mut graph = GraphBuilder::new(ids);
        let mut traversal = Traversal::new(&mut graph, FieldExtractor::new(config.join_list_values));

        let mut summary = BuildSummary::default();
        for (index, record) in records.into_iter().enumerate() {
            let dispatch = traversal
                .visit(&record)
                .map_err(|source| AdapterError::Record { index, source })?;
            summary.records += 1;
            if dispatch == Dispatch::Ignored {
                summary.skipped_records += 1;
            }
        }

        let BuiltGraph { nodes, edges, ids } = graph.finish();
        summary.nodes = nodes.len();
        summary.edges = edges.len();
        summary.stub_nodes = nodes.iter().filter(|n| n.is_stub()).count();

        tracing::info!(
            records = summary.records,
            skipped = summary.skipped_records,
            nodes = summary.nodes,
            edges = summary.edges,
            stubs = summary.stub_nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Graph build complete"
        );

        Ok(Self {
            config,
            nodes,
            edges,
            ids,
            summary,
        })
    }

    /// `(id, label, fields)` for every node, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRecord> + '_ {
        self.nodes.iter().map(Node::to_record)
    }

    /// `(relationship_id, parent_id, child_id, edge_type, fields)` for every
    /// edge, in creation order, each with a newly generated relationship id.
    pub fn edges(&mut self) -> impl Iterator<Item = EdgeRecord> + '_ {
        let nodes = &self.nodes;
        let ids = &mut self.ids;
        self.edges.iter().map(move |edge| EdgeRecord {
            relationship_id: ids.next_id(),
            parent_id: nodes[edge.parent().0].id().to_string(),
            child_id: nodes[edge.child().0].id().to_string(),
            edge_type: edge.edge_type(),
            fields: edge.fields().clone(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn summary(&self) -> &BuildSummary {
        &self.summary
    }

    /// The configuration this build ran with, including the unenforced filters.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }
}
