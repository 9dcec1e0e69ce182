//! Field extraction: copy raw record values onto canonical node fields.
//!
//! Each node label has a static table of canonical field names. A raw key
//! matches a canonical name when the two are equal ignoring ASCII case.
//! Scalars are stored as-is (strings with single quotes doubled), lists of
//! scalars are flattened into one `;`-separated string, and everything else
//! is skipped.

use ldgraph_core::{Node, NodeLabel, Record, RecordValue};

const DATASET_FIELDS: &[&str] = &[
    "description",
    "identifier",
    "name",
    "keywords",
    "license",
    "url",
    "datePublished",
    "citation",
    "version",
];

const CHEMICAL_SUBSTANCE_FIELDS: &[&str] = &[
    "identifier",
    "name",
    "url",
    "description",
    "alternateName",
    "chemicalComposition",
];

const MOLECULAR_ENTITY_FIELDS: &[&str] = &[
    "identifier",
    "name",
    "url",
    "description",
    "alternateName",
    "inChI",
    "inChIKey",
    "iupacName",
    "molecularFormula",
    "molecularWeight",
    "monoisotopicMolecularWeight",
    "smiles",
];

/// Canonical fields extracted for a node label.
///
/// Labels whose nodes are populated from fixed keys (terms, term sets,
/// catalogs) or not at all (creative works) have no table.
pub fn fields_for(label: NodeLabel) -> &'static [&'static str] {
    match label {
        NodeLabel::Dataset => DATASET_FIELDS,
        NodeLabel::ChemicalSubstance => CHEMICAL_SUBSTANCE_FIELDS,
        NodeLabel::MolecularEntity => MOLECULAR_ENTITY_FIELDS,
        NodeLabel::CreativeWork
        | NodeLabel::DataCatalog
        | NodeLabel::DefinedTerm
        | NodeLabel::DefinedTermSet => &[],
    }
}

/// Double every single quote so the value survives textual query building.
pub fn escape_quotes(value: &str) -> String {
    value.replace('\'', "''")
}

/// Store one scalar under `field`. Non-scalar values are ignored.
pub fn insert_property(node: &mut Node, value: &RecordValue, field: &str) {
    match value {
        RecordValue::String(s) => node.set_field(field, escape_quotes(s)),
        RecordValue::Integer(i) => node.set_field(field, *i),
        _ => tracing::trace!(field, "Skipping non-scalar value"),
    }
}

/// Copies table-driven fields from records onto nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor {
    join_list_values: bool,
}

impl FieldExtractor {
    /// With `join_list_values` unset, a scalar list keeps only its final
    /// element followed by `;` (`["a", "b", "c"]` → `"c;"`). Set, the list
    /// is joined in full (`"a;b;c"`).
    pub fn new(join_list_values: bool) -> Self {
        Self { join_list_values }
    }

    /// Populate `node` from every raw key of `item` matching a name in `fields`.
    pub fn insert_properties(&self, node: &mut Node, item: &Record, fields: &[&str]) {
        for &field in fields {
            for (key, value) in item.iter() {
                if !key.eq_ignore_ascii_case(field) {
                    continue;
                }
                match value {
                    RecordValue::List(items) if items.iter().all(RecordValue::is_scalar) => {
                        let flattened = self.flatten(items);
                        insert_property(node, &RecordValue::String(flattened), field);
                    }
                    RecordValue::List(_) => {
                        tracing::trace!(field, "Skipping list with non-scalar elements");
                    }
                    scalar => insert_property(node, scalar, field),
                }
            }
        }
    }

    fn flatten(&self, items: &[RecordValue]) -> String {
        if self.join_list_values {
            items.iter().map(scalar_text).collect::<Vec<_>>().join(";")
        } else {
            items
                .last()
                .map(|last| format!("{};", scalar_text(last)))
                .unwrap_or_default()
        }
    }
}

fn scalar_text(value: &RecordValue) -> String {
    match value {
        RecordValue::String(s) => s.clone(),
        RecordValue::Integer(i) => i.to_string(),
        _ => String::new(),
    }
}
