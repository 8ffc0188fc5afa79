// Untyped scraper rows shared between the kernel (backends) and the search domain.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// One headerless row produced by a scraping backend.
///
/// Columns are positional; their meaning depends on the backend that
/// produced the row. A dataset item may arrive either as a JSON array or as
/// a record keyed by column index (`{"0": .., "1": ..}`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord(Vec<Value>);

impl RawRecord {
    pub fn new(cells: Vec<Value>) -> Self {
        Self(cells)
    }

    /// Build a row of string cells (handy for fixtures).
    pub fn from_strs(cells: &[&str]) -> Self {
        Self(cells.iter().map(|c| Value::String((*c).to_string())).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Cell rendered as display text, `None` when the column is missing.
    pub fn text(&self, index: usize) -> Option<String> {
        self.cell(index).map(cell_text)
    }
}

/// Render a cell: strings verbatim, `null` as empty, anything else as JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Widest index-keyed row accepted; backend rows have a dozen or so columns.
pub const MAX_COLUMNS: usize = 64;

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(cells) => Ok(Self(cells)),
            Value::Object(map) => {
                let mut indexed = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let index: usize = key.parse().map_err(|_| {
                        de::Error::custom(format!("non-positional column key {key:?}"))
                    })?;
                    if index >= MAX_COLUMNS {
                        return Err(de::Error::custom(format!(
                            "column key {key:?} beyond the {MAX_COLUMNS}-column limit"
                        )));
                    }
                    indexed.push((index, value));
                }

                let width = indexed.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
                let mut cells = vec![Value::Null; width];
                for (index, value) in indexed {
                    cells[index] = value;
                }
                Ok(Self(cells))
            }
            other => Err(de::Error::custom(format!(
                "expected a row array or indexed record, got {other}"
            ))),
        }
    }
}
