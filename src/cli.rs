use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Copilot - ask a BigQuery warehouse questions in natural language
#[derive(Parser, Debug)]
#[command(name = "sql-copilot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API key for the copilot service
    #[arg(long, env = "COPILOT_API_KEY", global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question: generate SQL, run it, and explain the result
    Ask {
        /// Natural-language question to answer
        question: String,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Skip the chart even when the service recommends one
        #[arg(long)]
        no_chart: bool,

        /// Write the rendered figure specification to this file
        #[arg(long)]
        figure_out: Option<PathBuf>,

        /// Skip follow-up question suggestions
        #[arg(long)]
        no_followups: bool,

        /// Skip the natural-language summary
        #[arg(long)]
        no_summary: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Show sample questions the service suggests for the trained schema
    Questions {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// List training examples stored by the service
    TrainingData {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
