// SPDX-FileCopyrightText: 2025 sql-copilot contributors
// SPDX-License-Identifier: MIT

use serde_json::json;
use sql_copilot::{
    schema::{TrainingPlan, information_schema_query},
    table::{Column, TabularResult}
};

fn column(name: &str) -> Column {
    Column {
        name:      name.into(),
        data_type: "STRING".into()
    }
}

fn catalog() -> TabularResult {
    TabularResult::new(
        vec![
            column("table_catalog"),
            column("table_schema"),
            column("table_name"),
            column("column_name"),
            column("data_type"),
        ],
        vec![
            vec![
                json!("flaunt-v1"),
                json!("barefaced2"),
                json!("orders"),
                json!("id"),
                json!("INT64"),
            ],
            vec![
                json!("flaunt-v1"),
                json!("barefaced2"),
                json!("orders"),
                json!("amount"),
                json!("NUMERIC"),
            ],
            vec![
                json!("flaunt-v1"),
                json!("barefaced2"),
                json!("customers"),
                json!("email"),
                json!("STRING"),
            ],
        ]
    )
}

#[test]
fn test_information_schema_query_targets_dataset() {
    let sql = information_schema_query("flaunt-v1", "barefaced2");
    assert_eq!(
        sql,
        "SELECT * FROM `flaunt-v1.barefaced2.INFORMATION_SCHEMA.COLUMNS`"
    );
}

#[test]
fn test_derive_groups_rows_per_table() {
    let plan = TrainingPlan::derive(&catalog()).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.items[0].table, "orders");
    assert_eq!(plan.items[1].table, "customers");
}

#[test]
fn test_derive_preserves_first_seen_order() {
    let mut reversed = catalog();
    reversed.rows.reverse();
    let plan = TrainingPlan::derive(&reversed).unwrap();
    assert_eq!(plan.items[0].table, "customers");
    assert_eq!(plan.items[1].table, "orders");
}

#[test]
fn test_derive_documents_columns_and_types() {
    let plan = TrainingPlan::derive(&catalog()).unwrap();
    let orders = &plan.items[0];
    assert_eq!(orders.group, "flaunt-v1.barefaced2");
    assert!(orders.content.contains("orders"));
    assert!(orders.content.contains("| id | INT64 |"));
    assert!(orders.content.contains("| amount | NUMERIC |"));
    assert!(!orders.content.contains("email"));
}

#[test]
fn test_derive_accepts_uppercase_catalog_columns() {
    let catalog = TabularResult::new(
        vec![column("TABLE_SCHEMA"), column("TABLE_NAME"), column("COLUMN_NAME")],
        vec![vec![json!("sales"), json!("orders"), json!("id")]]
    );
    let plan = TrainingPlan::derive(&catalog).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.items[0].group, "sales");
}

#[test]
fn test_derive_without_table_catalog_uses_schema_as_group() {
    let catalog = TabularResult::new(
        vec![column("table_schema"), column("table_name"), column("column_name")],
        vec![vec![json!("sales"), json!("orders"), json!("id")]]
    );
    let plan = TrainingPlan::derive(&catalog).unwrap();
    assert_eq!(plan.items[0].group, "sales");
    assert!(plan.items[0].content.contains("in sales"));
}

#[test]
fn test_derive_skips_incomplete_rows() {
    let catalog = TabularResult::new(
        vec![column("table_schema"), column("table_name"), column("column_name")],
        vec![
            vec![json!("sales"), json!(""), json!("id")],
            vec![json!("sales"), json!("orders"), json!("")],
            vec![json!("sales"), json!("orders"), json!("id")],
        ]
    );
    let plan = TrainingPlan::derive(&catalog).unwrap();
    assert_eq!(plan.len(), 1);
    assert!(plan.items[0].content.contains("| id |"));
}

#[test]
fn test_derive_requires_table_name_column() {
    let catalog = TabularResult::new(
        vec![column("table_schema"), column("column_name")],
        vec![vec![json!("sales"), json!("id")]]
    );
    assert!(TrainingPlan::derive(&catalog).is_err());
}

#[test]
fn test_derive_empty_catalog_yields_empty_plan() {
    let plan = TrainingPlan::derive(&TabularResult::default()).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_derive_catalog_with_headers_but_no_rows() {
    let catalog = TabularResult::new(
        vec![column("table_schema"), column("table_name"), column("column_name")],
        vec![]
    );
    let plan = TrainingPlan::derive(&catalog).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_plan_serializes_for_submission() {
    let plan = TrainingPlan::derive(&catalog()).unwrap();
    let encoded = serde_json::to_value(&plan).unwrap();
    assert_eq!(encoded["items"].as_array().unwrap().len(), 2);
    assert_eq!(encoded["items"][0]["table"], json!("orders"));
}
