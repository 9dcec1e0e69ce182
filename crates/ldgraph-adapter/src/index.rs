//! Identity index: the single mutation point for graph entities.
//!
//! `GraphBuilder` owns the node and edge lists of one build pass together
//! with their lookup tables. Nodes are deduplicated by id (checked against
//! the requested label) and edges by (parent id, child id, edge type).
//! Callers only ever receive dense indices, so equal indices are the same
//! entity.

use std::collections::HashMap;

use ldgraph_core::{Edge, EdgeIdx, EdgeType, IdGenerator, Node, NodeIdx, NodeLabel};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EdgeKey {
    parent_id: String,
    child_id: String,
    edge_type: EdgeType,
}

/// Everything one build pass produced.
pub struct BuiltGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub ids: Box<dyn IdGenerator>,
}

/// Builds and reuses nodes and edges within one pass.
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: HashMap<String, NodeIdx>,
    edge_index: HashMap<EdgeKey, EdgeIdx>,
    ids: Box<dyn IdGenerator>,
}

impl GraphBuilder {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: HashMap::new(),
            edge_index: HashMap::new(),
            ids,
        }
    }

    /// Return the node for `(label, id)`, creating it on first request.
    ///
    /// An id already indexed under a different label gets a fresh node and
    /// the index entry is overwritten; the earlier node stays in the list.
    /// An absent or empty id always creates a node with a generated id.
    pub fn build_node(&mut self, label: NodeLabel, id: Option<&str>) -> NodeIdx {
        if let Some(existing) = id.filter(|id| !id.is_empty()) {
            if let Some(&idx) = self.node_index.get(existing) {
                let current = self.nodes[idx.0].label();
                if current == label {
                    return idx;
                }
                tracing::warn!(
                    id = existing,
                    indexed_label = %current,
                    requested_label = %label,
                    "Id re-used under a different label, overwriting index entry"
                );
            }
        }

        let mut node = Node::new(label, id, self.ids.as_mut());
        let node_id = node.id().to_string();
        node.set_field("id", node_id.as_str());

        let idx = NodeIdx(self.nodes.len());
        self.nodes.push(node);
        self.node_index.insert(node_id, idx);
        idx
    }

    /// Return the edge for `(parent, child, edge_type)`, creating it on first request.
    pub fn build_edge(&mut self, parent: NodeIdx, child: NodeIdx, edge_type: EdgeType) -> EdgeIdx {
        debug_assert_eq!(self.nodes[parent.0].label(), edge_type.parent_label());
        debug_assert_eq!(self.nodes[child.0].label(), edge_type.child_label());

        let key = EdgeKey {
            parent_id: self.nodes[parent.0].id().to_string(),
            child_id: self.nodes[child.0].id().to_string(),
            edge_type,
        };
        if let Some(&idx) = self.edge_index.get(&key) {
            return idx;
        }

        let idx = EdgeIdx(self.edges.len());
        self.edges
            .push(Edge::new(edge_type, parent, child, self.ids.as_mut()));
        self.edge_index.insert(key, idx);
        idx
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0]
    }

    /// Mutable access for field population; id and label stay fixed.
    pub fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.0]
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// End the pass, handing over the entity lists in creation order.
    pub fn finish(self) -> BuiltGraph {
        BuiltGraph {
            nodes: self.nodes,
            edges: self.edges,
            ids: self.ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldgraph_core::{FieldValue, SequentialIdGenerator};

    fn builder() -> GraphBuilder {
        GraphBuilder::new(Box::new(SequentialIdGenerator::new("gen-")))
    }

    #[test]
    fn repeated_node_requests_reuse_instance() {
        let mut b = builder();
        let first = b.build_node(NodeLabel::Dataset, Some("d1"));
        let second = b.build_node(NodeLabel::Dataset, Some("d1"));
        assert_eq!(first, second);
        assert_eq!(b.node_count(), 1);
    }

    #[test]
    fn new_node_stores_its_id_as_field() {
        let mut b = builder();
        let idx = b.build_node(NodeLabel::CreativeWork, Some("cw1"));
        assert_eq!(b.node(idx).field("id"), Some(&FieldValue::from("cw1")));
    }

    #[test]
    fn reuse_does_not_touch_existing_fields() {
        let mut b = builder();
        let idx = b.build_node(NodeLabel::Dataset, Some("d1"));
        b.node_mut(idx).set_field("name", "Solubility");
        let again = b.build_node(NodeLabel::Dataset, Some("d1"));
        assert_eq!(b.node(again).field("name"), Some(&FieldValue::from("Solubility")));
    }

    #[test]
    fn missing_id_is_generated_and_never_reused() {
        let mut b = builder();
        let a = b.build_node(NodeLabel::CreativeWork, None);
        let c = b.build_node(NodeLabel::CreativeWork, Some(""));
        assert_ne!(a, c);
        assert_eq!(b.node(a).id(), "gen-1");
        assert_eq!(b.node(c).id(), "gen-2");
    }

    #[test]
    fn label_mismatch_aliases_the_id() {
        let mut b = builder();
        let dataset = b.build_node(NodeLabel::Dataset, Some("x"));
        let chemical = b.build_node(NodeLabel::ChemicalSubstance, Some("x"));
        assert_ne!(dataset, chemical);
        assert_eq!(b.node_count(), 2);

        // The index now points at the chemical substance.
        assert_eq!(b.build_node(NodeLabel::ChemicalSubstance, Some("x")), chemical);
        // Asking for the dataset again creates a third node.
        let third = b.build_node(NodeLabel::Dataset, Some("x"));
        assert_ne!(third, dataset);
        assert_eq!(b.node_count(), 3);
    }

    #[test]
    fn repeated_edge_requests_reuse_instance() {
        let mut b = builder();
        let d = b.build_node(NodeLabel::Dataset, Some("d1"));
        let cw = b.build_node(NodeLabel::CreativeWork, Some("cw1"));
        let first = b.build_edge(d, cw, EdgeType::DatasetCreativeWork);
        let second = b.build_edge(d, cw, EdgeType::DatasetCreativeWork);
        assert_eq!(first, second);
        assert_eq!(b.edge_count(), 1);

        let edge = b.edge(first);
        assert_eq!(edge.parent(), d);
        assert_eq!(edge.child(), cw);
        assert!(edge.fields().is_empty());
    }

    #[test]
    fn edges_differ_by_type_or_direction() {
        let mut b = builder();
        let d = b.build_node(NodeLabel::Dataset, Some("d1"));
        let c = b.build_node(NodeLabel::ChemicalSubstance, Some("c1"));
        b.build_edge(d, c, EdgeType::DatasetChemicalSubstance);
        b.build_edge(c, d, EdgeType::ChemicalSubstanceDataset);
        assert_eq!(b.edge_count(), 2);
    }

    #[test]
    fn underscores_in_ids_do_not_collide() {
        let mut b = builder();
        let a = b.build_node(NodeLabel::Dataset, Some("a_b"));
        let c = b.build_node(NodeLabel::ChemicalSubstance, Some("c"));
        let a2 = b.build_node(NodeLabel::Dataset, Some("a"));
        let c2 = b.build_node(NodeLabel::ChemicalSubstance, Some("b_c"));
        b.build_edge(a, c, EdgeType::DatasetChemicalSubstance);
        b.build_edge(a2, c2, EdgeType::DatasetChemicalSubstance);
        assert_eq!(b.edge_count(), 2);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn edge_endpoints_must_match_edge_type() {
        let mut b = builder();
        let d = b.build_node(NodeLabel::Dataset, Some("d1"));
        let cw = b.build_node(NodeLabel::CreativeWork, Some("cw1"));
        b.build_edge(d, cw, EdgeType::DatasetDataCatalog);
    }

    #[test]
    fn finish_preserves_creation_order() {
        let mut b = builder();
        b.build_node(NodeLabel::Dataset, Some("d1"));
        b.build_node(NodeLabel::CreativeWork, Some("cw1"));
        let built = b.finish();
        let ids: Vec<_> = built.nodes.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["d1", "cw1"]);
    }
}
