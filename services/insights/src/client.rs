//! Row source seam for the external data store
//!
//! The hosted store (connection, authentication, query shape) lives behind
//! the `RowSource` trait: one operation returning loosely-typed rows. The
//! loader owns all coercion and validation from there.

use serde_json::{Map, Value};
use thiserror::Error;

/// A raw store row: a loosely-typed mapping from attribute name to value.
pub type RawRow = Map<String, Value>;

/// Errors surfaced by a row source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("connection failed: {reason}")]
    Connection { reason: String },

    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },
}

/// The external data-access collaborator.
///
/// Implementations hold their own connection parameters; the pipeline only
/// ever calls `fetch_all` once per refresh and never retries.
pub trait RowSource {
    /// Fetch every raw row for one refresh.
    fn fetch_all(&self) -> Result<Vec<RawRow>, SourceError>;
}

/// In-memory row source for tests and embedding callers that already hold
/// their rows.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<RawRow>,
}

impl StaticSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Build from a JSON array of objects.
    pub fn from_json(value: Value) -> Result<Self, SourceError> {
        Ok(Self::new(rows_from_json(value)?))
    }
}

impl RowSource for StaticSource {
    fn fetch_all(&self) -> Result<Vec<RawRow>, SourceError> {
        Ok(self.rows.clone())
    }
}

/// Interpret a JSON value as an array of row objects.
pub fn rows_from_json(value: Value) -> Result<Vec<RawRow>, SourceError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(SourceError::MalformedPayload {
                reason: format!("expected an array of rows, got {}", type_label(&other)),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(SourceError::MalformedPayload {
                reason: format!("row {} is {}, not an object", position, type_label(&other)),
            }),
        })
        .collect()
}

fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_from_json_array_of_objects() {
        let rows = rows_from_json(json!([
            {"title": "A", "price": 10},
            {"title": "B"}
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], json!("A"));
    }

    #[test]
    fn test_rows_from_json_rejects_non_array() {
        let err = rows_from_json(json!({"title": "A"})).unwrap_err();
        assert!(matches!(err, SourceError::MalformedPayload { .. }));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_rows_from_json_rejects_non_object_row() {
        let err = rows_from_json(json!([{"title": "A"}, 42])).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_static_source_fetch_all() {
        let source = StaticSource::from_json(json!([{"title": "A"}])).unwrap();
        let rows = source.fetch_all().unwrap();
        assert_eq!(rows.len(), 1);
    }
}
