//! Core entity model for the property graph.
//!
//! Nodes and edges carry a label / edge kind plus an open map of scalar
//! fields. Edges reference their endpoints by dense index into the node
//! list owned by the builder, so two equal indices mean the same node.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::IdGenerator;

// ── Node Labels ───────────────────────────────────────────────────

/// The kinds of node the builder can emit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum NodeLabel {
    Dataset,
    CreativeWork,
    DataCatalog,
    DefinedTerm,
    DefinedTermSet,
    ChemicalSubstance,
    MolecularEntity,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; 7] = [
        NodeLabel::Dataset,
        NodeLabel::CreativeWork,
        NodeLabel::DataCatalog,
        NodeLabel::DefinedTerm,
        NodeLabel::DefinedTermSet,
        NodeLabel::ChemicalSubstance,
        NodeLabel::MolecularEntity,
    ];

    /// Graph label as emitted to the writer, e.g. `chemicalSubstance`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dataset => "dataset",
            Self::CreativeWork => "creativeWork",
            Self::DataCatalog => "dataCatalog",
            Self::DefinedTerm => "definedTerm",
            Self::DefinedTermSet => "definedTermSet",
            Self::ChemicalSubstance => "chemicalSubstance",
            Self::MolecularEntity => "molecularEntity",
        }
    }

    /// The `@type` tag an input record carries for this label.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Dataset => "Dataset",
            Self::CreativeWork => "CreativeWork",
            Self::DataCatalog => "DataCatalog",
            Self::DefinedTerm => "DefinedTerm",
            Self::DefinedTermSet => "DefinedTermSet",
            Self::ChemicalSubstance => "ChemicalSubstance",
            Self::MolecularEntity => "MolecularEntity",
        }
    }

    /// Resolve a record's `@type` tag, ignoring ASCII case.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|label| label.type_tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Edge Types ────────────────────────────────────────────────────

/// The directed relationship kinds between node labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeType {
    #[serde(rename = "dataset_creativeWork_edge")]
    DatasetCreativeWork,
    #[serde(rename = "dataset_definedTerm_edge")]
    DatasetDefinedTerm,
    #[serde(rename = "definedTerm_definedTermSet_edge")]
    DefinedTermDefinedTermSet,
    #[serde(rename = "dataset_dataCatalog_edge")]
    DatasetDataCatalog,
    #[serde(rename = "dataset_chemicalSubstance_edge")]
    DatasetChemicalSubstance,
    #[serde(rename = "chemicalSubstance_creativeWork_edge")]
    ChemicalSubstanceCreativeWork,
    #[serde(rename = "chemicalSubstance_molecularEntity_edge")]
    ChemicalSubstanceMolecularEntity,
    #[serde(rename = "chemicalSubstance_dataset_edge")]
    ChemicalSubstanceDataset,
}

impl EdgeType {
    pub const ALL: [EdgeType; 8] = [
        EdgeType::DatasetCreativeWork,
        EdgeType::DatasetDefinedTerm,
        EdgeType::DefinedTermDefinedTermSet,
        EdgeType::DatasetDataCatalog,
        EdgeType::DatasetChemicalSubstance,
        EdgeType::ChemicalSubstanceCreativeWork,
        EdgeType::ChemicalSubstanceMolecularEntity,
        EdgeType::ChemicalSubstanceDataset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DatasetCreativeWork => "dataset_creativeWork_edge",
            Self::DatasetDefinedTerm => "dataset_definedTerm_edge",
            Self::DefinedTermDefinedTermSet => "definedTerm_definedTermSet_edge",
            Self::DatasetDataCatalog => "dataset_dataCatalog_edge",
            Self::DatasetChemicalSubstance => "dataset_chemicalSubstance_edge",
            Self::ChemicalSubstanceCreativeWork => "chemicalSubstance_creativeWork_edge",
            Self::ChemicalSubstanceMolecularEntity => "chemicalSubstance_molecularEntity_edge",
            Self::ChemicalSubstanceDataset => "chemicalSubstance_dataset_edge",
        }
    }

    /// Label of the node this edge kind leaves from.
    pub fn parent_label(&self) -> NodeLabel {
        match self {
            Self::DatasetCreativeWork
            | Self::DatasetDefinedTerm
            | Self::DatasetDataCatalog
            | Self::DatasetChemicalSubstance => NodeLabel::Dataset,
            Self::DefinedTermDefinedTermSet => NodeLabel::DefinedTerm,
            Self::ChemicalSubstanceCreativeWork
            | Self::ChemicalSubstanceMolecularEntity
            | Self::ChemicalSubstanceDataset => NodeLabel::ChemicalSubstance,
        }
    }

    /// Label of the node this edge kind points to.
    pub fn child_label(&self) -> NodeLabel {
        match self {
            Self::DatasetCreativeWork | Self::ChemicalSubstanceCreativeWork => {
                NodeLabel::CreativeWork
            }
            Self::DatasetDefinedTerm => NodeLabel::DefinedTerm,
            Self::DefinedTermDefinedTermSet => NodeLabel::DefinedTermSet,
            Self::DatasetDataCatalog => NodeLabel::DataCatalog,
            Self::DatasetChemicalSubstance => NodeLabel::ChemicalSubstance,
            Self::ChemicalSubstanceMolecularEntity => NodeLabel::MolecularEntity,
            Self::ChemicalSubstanceDataset => NodeLabel::Dataset,
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Field Values ──────────────────────────────────────────────────

/// A scalar property value stored on a node or edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Canonical field name → scalar value.
pub type FieldMap = BTreeMap<String, FieldValue>;

// ── Nodes & Edges ─────────────────────────────────────────────────

/// Dense index of a node within one build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(pub usize);

/// Dense index of an edge within one build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIdx(pub usize);

/// A typed graph vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    label: NodeLabel,
    fields: FieldMap,
}

impl Node {
    /// Create a node, generating an id when `id` is absent or empty.
    pub fn new(label: NodeLabel, id: Option<&str>, ids: &mut dyn IdGenerator) -> Self {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => ids.next_id(),
        };
        Self {
            id,
            label,
            fields: FieldMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> NodeLabel {
        self.label
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Store a field, replacing any previous value.
    pub fn set_field(&mut self, key: &str, value: impl Into<FieldValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// A node carrying nothing beyond its own `id` field.
    pub fn is_stub(&self) -> bool {
        self.fields.keys().all(|k| k == "id")
    }

    pub fn to_record(&self) -> NodeRecord {
        NodeRecord {
            id: self.id.clone(),
            label: self.label,
            fields: self.fields.clone(),
        }
    }
}

/// A typed, directed relationship between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: String,
    edge_type: EdgeType,
    parent: NodeIdx,
    child: NodeIdx,
    fields: FieldMap,
}

impl Edge {
    pub fn new(
        edge_type: EdgeType,
        parent: NodeIdx,
        child: NodeIdx,
        ids: &mut dyn IdGenerator,
    ) -> Self {
        Self {
            id: ids.next_id(),
            edge_type,
            parent,
            child,
            fields: FieldMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub fn parent(&self) -> NodeIdx {
        self.parent
    }

    pub fn child(&self) -> NodeIdx {
        self.child
    }

    /// Edge properties; no edge kind currently carries any.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

// ── Output Tuples ─────────────────────────────────────────────────

/// A node as handed to the graph writer: `(id, label, fields)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    pub label: NodeLabel,
    pub fields: FieldMap,
}

/// An edge as handed to the graph writer:
/// `(relationship_id, parent_id, child_id, edge_type, fields)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeRecord {
    pub relationship_id: String,
    pub parent_id: String,
    pub child_id: String,
    pub edge_type: EdgeType,
    pub fields: FieldMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIdGenerator;

    #[test]
    fn node_keeps_given_id() {
        let mut ids = SequentialIdGenerator::new("gen-");
        let node = Node::new(NodeLabel::Dataset, Some("d1"), &mut ids);
        assert_eq!(node.id(), "d1");
        assert_eq!(node.label(), NodeLabel::Dataset);
        assert!(node.fields().is_empty());
    }

    #[test]
    fn node_generates_id_when_missing_or_empty() {
        let mut ids = SequentialIdGenerator::new("gen-");
        assert_eq!(Node::new(NodeLabel::CreativeWork, None, &mut ids).id(), "gen-1");
        assert_eq!(Node::new(NodeLabel::CreativeWork, Some(""), &mut ids).id(), "gen-2");
    }

    #[test]
    fn set_field_is_last_write_wins() {
        let mut ids = SequentialIdGenerator::new("gen-");
        let mut node = Node::new(NodeLabel::Dataset, Some("d1"), &mut ids);
        node.set_field("name", "first");
        node.set_field("name", 42i64);
        assert_eq!(node.field("name"), Some(&FieldValue::Integer(42)));
    }

    #[test]
    fn stub_detection() {
        let mut ids = SequentialIdGenerator::new("gen-");
        let mut node = Node::new(NodeLabel::ChemicalSubstance, Some("c1"), &mut ids);
        node.set_field("id", "c1");
        assert!(node.is_stub());
        node.set_field("name", "ethanol");
        assert!(!node.is_stub());
    }

    #[test]
    fn type_tags_resolve_ignoring_case() {
        assert_eq!(NodeLabel::from_type_tag("dataset"), Some(NodeLabel::Dataset));
        assert_eq!(
            NodeLabel::from_type_tag("CHEMICALSUBSTANCE"),
            Some(NodeLabel::ChemicalSubstance)
        );
        assert_eq!(NodeLabel::from_type_tag("Person"), None);
    }

    #[test]
    fn edge_type_serializes_as_writer_label() {
        for edge_type in EdgeType::ALL {
            let json = serde_json::to_string(&edge_type).unwrap();
            assert_eq!(json, format!("\"{}\"", edge_type.as_str()));
        }
        let json = serde_json::to_string(&NodeLabel::DefinedTermSet).unwrap();
        assert_eq!(json, "\"definedTermSet\"");
    }

    #[test]
    fn edge_endpoints_match_labels() {
        assert_eq!(EdgeType::ChemicalSubstanceDataset.parent_label(), NodeLabel::ChemicalSubstance);
        assert_eq!(EdgeType::ChemicalSubstanceDataset.child_label(), NodeLabel::Dataset);
        assert_eq!(EdgeType::DefinedTermDefinedTermSet.child_label(), NodeLabel::DefinedTermSet);
    }
}
