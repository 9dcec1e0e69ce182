//! Type-dispatching traversal of input records.
//!
//! Each top-level record is dispatched once on its `@type`. Datasets and
//! chemical substances become nodes; their known nested relations become
//! related nodes and edges. Every other type is ignored.
//!
//! Relation targets are keyed by the identity their kind uses: `@id` for
//! creative works, chemical substances, datasets, and molecular entities,
//! `termCode` for defined terms, `url` for term sets and data catalogs.
//! Targets referenced only through `about` / `subjectOf` stay stub nodes
//! (id only) unless a top-level record with the same id fills them in.

use ldgraph_core::record::{ID_KEY, TYPE_KEY};
use ldgraph_core::error::Result;
use ldgraph_core::{EdgeType, NodeIdx, NodeLabel, Record, RecordValue};

use crate::fields::{fields_for, FieldExtractor};
use crate::index::GraphBuilder;

const CONFORMS_TO: &str = "conformsTo";
const MEASUREMENT_TECHNIQUE: &str = "measurementTechnique";
const IN_DEFINED_TERM_SET: &str = "inDefinedTermSet";
const INCLUDED_IN_DATA_CATALOG: &str = "includedInDataCatalog";
const ABOUT: &str = "about";
const HAS_BIO_CHEM_ENTITY_PART: &str = "hasBioChemEntityPart";
const SUBJECT_OF: &str = "subjectOf";

const TERM_CODE: &str = "termCode";
const NAME: &str = "name";
const URL: &str = "url";

/// How a top-level record was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Dataset,
    ChemicalSubstance,
    Ignored,
}

/// Walks records into a `GraphBuilder`.
pub struct Traversal<'a> {
    graph: &'a mut GraphBuilder,
    extractor: FieldExtractor,
}

impl<'a> Traversal<'a> {
    pub fn new(graph: &'a mut GraphBuilder, extractor: FieldExtractor) -> Self {
        Self { graph, extractor }
    }

    /// Dispatch one top-level record on its declared type.
    ///
    /// Fails only when a required key is missing: `@type` on the record or
    /// on a present relation, or the identity key a node kind is built from.
    pub fn visit(&mut self, record: &Record) -> Result<Dispatch> {
        let tag = record.require_str(TYPE_KEY, "record")?;
        match tag.and_then(NodeLabel::from_type_tag) {
            Some(NodeLabel::Dataset) => {
                self.visit_dataset(record)?;
                Ok(Dispatch::Dataset)
            }
            Some(NodeLabel::ChemicalSubstance) => {
                self.visit_chemical_substance(record)?;
                Ok(Dispatch::ChemicalSubstance)
            }
            _ => {
                tracing::trace!(record_type = ?tag, "Ignoring record of unhandled type");
                Ok(Dispatch::Ignored)
            }
        }
    }

    fn visit_dataset(&mut self, record: &Record) -> Result<()> {
        let dataset = self
            .graph
            .build_node(NodeLabel::Dataset, record.require_str(ID_KEY, "Dataset")?);
        tracing::debug!(id = self.graph.node(dataset).id(), "Visiting dataset");

        self.link_creative_works(dataset, record, EdgeType::DatasetCreativeWork)?;
        self.extract(dataset, record, NodeLabel::Dataset);

        for term in relation(record, MEASUREMENT_TECHNIQUE) {
            if !term.has_type(NodeLabel::DefinedTerm.type_tag(), MEASUREMENT_TECHNIQUE)? {
                continue;
            }
            let term_node = self.graph.build_node(
                NodeLabel::DefinedTerm,
                term.require_str(TERM_CODE, MEASUREMENT_TECHNIQUE)?,
            );
            self.graph
                .build_edge(dataset, term_node, EdgeType::DatasetDefinedTerm);
            self.copy_fixed(term_node, term, &[NAME, URL, TERM_CODE]);

            for set in relation(term, IN_DEFINED_TERM_SET) {
                if !set.has_type(NodeLabel::DefinedTermSet.type_tag(), IN_DEFINED_TERM_SET)? {
                    continue;
                }
                let set_node = self.graph.build_node(
                    NodeLabel::DefinedTermSet,
                    set.require_str(URL, IN_DEFINED_TERM_SET)?,
                );
                self.graph
                    .build_edge(term_node, set_node, EdgeType::DefinedTermDefinedTermSet);
                self.copy_fixed(set_node, set, &[NAME, URL]);
            }
        }

        for catalog in relation(record, INCLUDED_IN_DATA_CATALOG) {
            if !catalog.has_type(NodeLabel::DataCatalog.type_tag(), INCLUDED_IN_DATA_CATALOG)? {
                continue;
            }
            let catalog_node = self.graph.build_node(
                NodeLabel::DataCatalog,
                catalog.require_str(URL, INCLUDED_IN_DATA_CATALOG)?,
            );
            self.copy_fixed(catalog_node, catalog, &[NAME, URL]);
            self.graph
                .build_edge(dataset, catalog_node, EdgeType::DatasetDataCatalog);
        }

        for subject in relation(record, ABOUT) {
            let chemical = self.graph.build_node(
                NodeLabel::ChemicalSubstance,
                subject.require_str(ID_KEY, ABOUT)?,
            );
            self.graph
                .build_edge(dataset, chemical, EdgeType::DatasetChemicalSubstance);
        }

        Ok(())
    }

    fn visit_chemical_substance(&mut self, record: &Record) -> Result<()> {
        let chemical = self.graph.build_node(
            NodeLabel::ChemicalSubstance,
            record.require_str(ID_KEY, "ChemicalSubstance")?,
        );
        tracing::debug!(id = self.graph.node(chemical).id(), "Visiting chemical substance");

        self.link_creative_works(chemical, record, EdgeType::ChemicalSubstanceCreativeWork)?;
        self.extract(chemical, record, NodeLabel::ChemicalSubstance);

        for part in relation(record, HAS_BIO_CHEM_ENTITY_PART) {
            if !part.has_type(NodeLabel::MolecularEntity.type_tag(), HAS_BIO_CHEM_ENTITY_PART)? {
                continue;
            }
            let entity = self.graph.build_node(
                NodeLabel::MolecularEntity,
                part.require_str(ID_KEY, HAS_BIO_CHEM_ENTITY_PART)?,
            );
            self.graph
                .build_edge(chemical, entity, EdgeType::ChemicalSubstanceMolecularEntity);
            self.extract(entity, part, NodeLabel::MolecularEntity);
        }

        for subject in relation(record, SUBJECT_OF) {
            let dataset = self
                .graph
                .build_node(NodeLabel::Dataset, subject.require_str(ID_KEY, SUBJECT_OF)?);
            self.graph
                .build_edge(chemical, dataset, EdgeType::ChemicalSubstanceDataset);
        }

        Ok(())
    }

    /// `conformsTo` → CreativeWork, shared by datasets and chemical substances.
    fn link_creative_works(
        &mut self,
        parent: NodeIdx,
        record: &Record,
        edge_type: EdgeType,
    ) -> Result<()> {
        for work in relation(record, CONFORMS_TO) {
            if !work.has_type(NodeLabel::CreativeWork.type_tag(), CONFORMS_TO)? {
                continue;
            }
            let work_node = self.graph.build_node(
                NodeLabel::CreativeWork,
                work.require_str(ID_KEY, CONFORMS_TO)?,
            );
            self.graph.build_edge(parent, work_node, edge_type);
        }
        Ok(())
    }

    fn extract(&mut self, node: NodeIdx, item: &Record, label: NodeLabel) {
        self.extractor
            .insert_properties(self.graph.node_mut(node), item, fields_for(label));
    }

    /// Set fixed keys verbatim, without case folding or escaping.
    fn copy_fixed(&mut self, node: NodeIdx, item: &Record, keys: &[&str]) {
        let node = self.graph.node_mut(node);
        for &key in keys {
            match item.get(key) {
                Some(RecordValue::String(s)) => node.set_field(key, s.as_str()),
                Some(RecordValue::Integer(i)) => node.set_field(key, *i),
                _ => {}
            }
        }
    }
}

/// Object entries under a relation key; empty when the key is absent.
fn relation<'r>(record: &'r Record, key: &str) -> Vec<&'r Record> {
    record.get(key).map(RecordValue::objects).unwrap_or_default()
}
