//! Result rendering for the CLI front-end.

use colored::Colorize;
use serde_json::Value;

use crate::table::TabularResult;

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Format a result set based on output options
pub fn format_table(df: &TabularResult, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(df).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(df).unwrap_or_default(),
        OutputFormat::Text => format_text_table(df, opts)
    }
}

/// Format a question list based on output options
pub fn format_question_list(questions: &[String], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(questions).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(questions).unwrap_or_default(),
        OutputFormat::Text => {
            let mut out = String::new();
            for (i, question) in questions.iter().enumerate() {
                let index = format!("{:>3}.", i + 1);
                if opts.colored {
                    out.push_str(&index.cyan().to_string());
                } else {
                    out.push_str(&index);
                }
                out.push(' ');
                out.push_str(question);
                out.push('\n');
            }
            out
        }
    }
}

/// Render a single cell for text output
pub fn cell_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string()
    }
}

fn format_text_table(df: &TabularResult, opts: &OutputOptions) -> String {
    let mut widths: Vec<usize> = df.columns.iter().map(|c| c.name.len()).collect();
    let rendered: Vec<Vec<String>> = df
        .rows
        .iter()
        .map(|row| row.iter().map(cell_display).collect())
        .collect();
    for row in &rendered {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = df
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:<width$}", c.name, width = widths[i]))
        .collect();
    let header_line = header.join("  ");
    if opts.colored {
        out.push_str(&header_line.cyan().bold().to_string());
    } else {
        out.push_str(&header_line);
    }
    out.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("  "));
    out.push('\n');

    for row in &rendered {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(cell.len());
                format!("{:<width$}", cell, width = width)
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    let count = format!(
        "({} row{})",
        df.len(),
        if df.len() == 1 { "" } else { "s" }
    );
    out.push('\n');
    out.push_str(&count);
    out.push('\n');
    out
}
