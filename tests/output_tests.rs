// SPDX-FileCopyrightText: 2025 sql-copilot contributors
// SPDX-License-Identifier: MIT

use serde_json::json;
use sql_copilot::{
    output::{OutputFormat, OutputOptions, cell_display, format_question_list, format_table},
    table::{Column, TabularResult}
};

fn plain(format: OutputFormat) -> OutputOptions {
    OutputOptions {
        format,
        colored: false
    }
}

fn sales_df() -> TabularResult {
    TabularResult::new(
        vec![
            Column {
                name:      "month".into(),
                data_type: "STRING".into()
            },
            Column {
                name:      "total".into(),
                data_type: "NUMERIC".into()
            },
        ],
        vec![
            vec![json!("2026-06"), json!(900)],
            vec![json!("2026-07"), json!(1234.5)],
        ]
    )
}

#[test]
fn test_output_format_default() {
    let format = OutputFormat::default();
    assert!(matches!(format, OutputFormat::Text));
}

#[test]
fn test_output_options_default() {
    let opts = OutputOptions::default();
    assert!(matches!(opts.format, OutputFormat::Text));
    assert!(opts.colored);
}

#[test]
fn test_text_table_contains_headers_and_cells() {
    let out = format_table(&sales_df(), &plain(OutputFormat::Text));
    assert!(out.contains("month"));
    assert!(out.contains("total"));
    assert!(out.contains("2026-07"));
    assert!(out.contains("1234.5"));
    assert!(out.contains("(2 rows)"));
}

#[test]
fn test_text_table_pads_to_widest_cell() {
    let out = format_table(&sales_df(), &plain(OutputFormat::Text));
    // "total" is narrower than "1234.5", so the header picks up the width
    let header = out.lines().next().unwrap();
    assert!(header.contains("month    total"));
}

#[test]
fn test_text_table_single_row_count() {
    let mut df = sales_df();
    df.rows.truncate(1);
    let out = format_table(&df, &plain(OutputFormat::Text));
    assert!(out.contains("(1 row)"));
}

#[test]
fn test_text_table_empty_result() {
    let df = TabularResult::new(
        vec![Column {
            name:      "n".into(),
            data_type: "INT64".into()
        }],
        vec![]
    );
    let out = format_table(&df, &plain(OutputFormat::Text));
    assert!(out.contains("n"));
    assert!(out.contains("(0 rows)"));
}

#[test]
fn test_text_table_renders_null_as_blank() {
    let df = TabularResult::new(
        vec![
            Column {
                name:      "a".into(),
                data_type: "STRING".into()
            },
            Column {
                name:      "b".into(),
                data_type: "STRING".into()
            },
        ],
        vec![vec![json!(null), json!("x")]]
    );
    let out = format_table(&df, &plain(OutputFormat::Text));
    assert!(!out.contains("null"));
    assert!(out.contains('x'));
}

#[test]
fn test_colored_table_still_contains_content() {
    let opts = OutputOptions {
        format:  OutputFormat::Text,
        colored: true
    };
    let out = format_table(&sales_df(), &opts);
    assert!(out.contains("month"));
    assert!(out.contains("2026-06"));
}

#[test]
fn test_json_table_round_trips() {
    let out = format_table(&sales_df(), &plain(OutputFormat::Json));
    let decoded: TabularResult = serde_json::from_str(&out).unwrap();
    assert_eq!(decoded, sales_df());
}

#[test]
fn test_yaml_table_lists_columns() {
    let out = format_table(&sales_df(), &plain(OutputFormat::Yaml));
    assert!(out.contains("columns"));
    assert!(out.contains("month"));
}

#[test]
fn test_cell_display_variants() {
    assert_eq!(cell_display(&json!(null)), "");
    assert_eq!(cell_display(&json!("plain")), "plain");
    assert_eq!(cell_display(&json!(42)), "42");
    assert_eq!(cell_display(&json!(true)), "true");
    assert_eq!(cell_display(&json!([1, 2])), "[1,2]");
}

#[test]
fn test_question_list_text_is_numbered() {
    let questions = vec![
        String::from("What were total sales last month?"),
        String::from("Which region grew fastest?"),
    ];
    let out = format_question_list(&questions, &plain(OutputFormat::Text));
    assert!(out.contains("1. What were total sales last month?"));
    assert!(out.contains("2. Which region grew fastest?"));
}

#[test]
fn test_question_list_json_is_an_array() {
    let questions = vec![String::from("q1")];
    let out = format_question_list(&questions, &plain(OutputFormat::Json));
    let decoded: Vec<String> = serde_json::from_str(&out).unwrap();
    assert_eq!(decoded, questions);
}

#[test]
fn test_question_list_empty() {
    let out = format_question_list(&[], &plain(OutputFormat::Text));
    assert!(out.is_empty());
}
