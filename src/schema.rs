//! Warehouse schema introspection and training-plan derivation.
//!
//! On every cold start the factory queries the warehouse's metadata catalog
//! (`INFORMATION_SCHEMA.COLUMNS`) and derives a [`TrainingPlan`]: one
//! document per table, listing its columns and types, ready to be submitted
//! to the copilot service so SQL generation is grounded in the actual
//! schema.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sql_copilot::{
//!     schema::TrainingPlan,
//!     table::{Column, TabularResult}
//! };
//!
//! let catalog = TabularResult::new(
//!     vec![
//!         Column {
//!             name:      "table_schema".into(),
//!             data_type: "STRING".into()
//!         },
//!         Column {
//!             name:      "table_name".into(),
//!             data_type: "STRING".into()
//!         },
//!         Column {
//!             name:      "column_name".into(),
//!             data_type: "STRING".into()
//!         },
//!         Column {
//!             name:      "data_type".into(),
//!             data_type: "STRING".into()
//!         },
//!     ],
//!     vec![
//!         vec![json!("sales"), json!("orders"), json!("id"), json!("INT64")],
//!         vec![json!("sales"), json!("orders"), json!("amount"), json!("NUMERIC")],
//!     ]
//! );
//!
//! let plan = TrainingPlan::derive(&catalog).unwrap();
//! assert_eq!(plan.items.len(), 1);
//! assert!(plan.items[0].content.contains("amount"));
//! ```

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{AppResult, catalog_error},
    table::TabularResult
};

/// Metadata catalog query for one dataset
pub fn information_schema_query(project_id: &str, dataset: &str) -> String {
    format!(
        "SELECT * FROM `{}.{}.INFORMATION_SCHEMA.COLUMNS`",
        project_id, dataset
    )
}

/// Derived description of a warehouse schema, submitted for training
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingPlan {
    pub items: Vec<TrainingItem>
}

/// One trainable document describing a single table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingItem {
    /// Dataset (optionally database-qualified) the table lives in
    pub group:   CompactString,
    pub table:   CompactString,
    /// Column documentation submitted verbatim to the service
    pub content: String
}

impl TrainingPlan {
    /// Derive a plan from an `INFORMATION_SCHEMA.COLUMNS` result.
    ///
    /// Rows are grouped per table in first-seen order; each group becomes one
    /// item documenting the table's columns. `table_schema`, `table_name` and
    /// `column_name` columns are required (any case); `table_catalog` and
    /// `data_type` enrich the output when present.
    pub fn derive(catalog: &TabularResult) -> AppResult<Self> {
        if catalog.columns.is_empty() && catalog.rows.is_empty() {
            return Ok(Self::default());
        }

        let schema_idx = required_column(catalog, "table_schema")?;
        let table_idx = required_column(catalog, "table_name")?;
        let column_idx = required_column(catalog, "column_name")?;
        let database_idx = catalog.column_index("table_catalog");
        let type_idx = catalog.column_index("data_type");

        let mut tables: IndexMap<(String, String), Vec<(String, String)>> = IndexMap::new();
        for row in &catalog.rows {
            let table = cell_text(row, table_idx);
            let column = cell_text(row, column_idx);
            if table.is_empty() || column.is_empty() {
                continue;
            }
            let schema = cell_text(row, schema_idx);
            let database = database_idx.map(|i| cell_text(row, i)).unwrap_or("");
            let group = if database.is_empty() {
                schema.to_string()
            } else {
                format!("{}.{}", database, schema)
            };
            let data_type = type_idx.map(|i| cell_text(row, i)).unwrap_or("");
            tables
                .entry((group, table.to_string()))
                .or_default()
                .push((column.to_string(), data_type.to_string()));
        }

        let mut items = Vec::with_capacity(tables.len());
        for ((group, table), columns) in tables {
            let content = table_document(&group, &table, &columns);
            items.push(TrainingItem {
                group: CompactString::from(group),
                table: CompactString::from(table),
                content
            });
        }
        Ok(Self {
            items
        })
    }

    /// Number of trainable items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn required_column(catalog: &TabularResult, name: &str) -> AppResult<usize> {
    catalog
        .column_index(name)
        .ok_or_else(|| catalog_error(format!("result has no '{}' column", name)))
}

fn cell_text(row: &[Value], index: usize) -> &str {
    row.get(index).and_then(Value::as_str).unwrap_or("")
}

fn table_document(group: &str, table: &str, columns: &[(String, String)]) -> String {
    let mut doc = if group.is_empty() {
        format!("The following columns are in the {} table:\n\n", table)
    } else {
        format!(
            "The following columns are in the {} table in {}:\n\n",
            table, group
        )
    };
    doc.push_str("| column | type |\n|---|---|\n");
    for (name, data_type) in columns {
        doc.push_str(&format!("| {} | {} |\n", name, data_type));
    }
    doc
}
