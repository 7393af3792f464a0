//! Tabular results and rendered figures returned by the service.
//!
//! Both types are pass-through values: cells and figure contents are never
//! interpreted by this layer, only carried, rendered, and hashed so they can
//! participate in accessor cache keys.

use std::hash::{Hash, Hasher};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rectangular, column-typed result set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularResult {
    pub columns: Vec<Column>,
    pub rows:    Vec<Vec<Value>>
}

/// Column descriptor as reported by the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name:      CompactString,
    #[serde(default)]
    pub data_type: CompactString
}

impl TabularResult {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name, ignoring case. Metadata catalogs report
    /// upper- or lowercase names depending on the warehouse dialect.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

impl Hash for TabularResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.columns.len().hash(state);
        for column in &self.columns {
            column.name.hash(state);
            column.data_type.hash(state);
        }
        self.rows.len().hash(state);
        for row in &self.rows {
            row.len().hash(state);
            for value in row {
                hash_value(value, state);
            }
        }
    }
}

// serde_json::Value has no Hash impl; tag each variant so e.g. null and ""
// digest differently.
fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            5u8.hash(state);
            map.len().hash(state);
            for (key, item) in map {
                key.hash(state);
                hash_value(item, state);
            }
        }
    }
}

/// Opaque rendered chart specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Figure(pub Value);

impl Hash for Figure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}
