use thiserror::Error;

/// Errors raised while reading required keys out of an input record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing required key `{key}` in {context}")]
    MissingKey { key: String, context: String },
}

impl RecordError {
    pub fn missing(key: &str, context: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
            context: context.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;
