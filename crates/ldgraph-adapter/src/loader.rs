//! JSON-LD document loading.
//!
//! Accepts a top-level array of records, an object whose `@graph` member
//! is an array of records, or a single record object. Non-object entries
//! of an array are skipped.

use std::fs;
use std::path::Path;

use ldgraph_core::Record;
use serde_json::Value;

use crate::error::{AdapterError, Result};

const GRAPH_KEY: &str = "@graph";

/// Parse records out of a JSON-LD document string.
pub fn parse_document(input: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(input)?;
    records_from_value(value)
}

/// Read and parse a JSON-LD document from disk.
pub fn load_document(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let records = parse_document(&text)?;
    tracing::debug!(path = %path.display(), records = records.len(), "Loaded document");
    Ok(records)
}

/// Extract records from an already-parsed JSON value.
pub fn records_from_value(value: Value) -> Result<Vec<Record>> {
    match value {
        Value::Array(items) => Ok(collect_objects(items)),
        Value::Object(mut map) => match map.remove(GRAPH_KEY) {
            Some(Value::Array(items)) => Ok(collect_objects(items)),
            Some(_) => Err(AdapterError::InvalidDocument(
                "`@graph` must be an array".to_string(),
            )),
            None => Ok(vec![Record::from(map)]),
        },
        _ => Err(AdapterError::InvalidDocument(
            "expected a JSON array or object".to_string(),
        )),
    }
}

fn collect_objects(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(map) => Some(Record::from(map)),
            _ => {
                tracing::trace!(index = i, "Skipping non-object entry");
                None
            }
        })
        .collect()
}
