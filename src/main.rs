//! # SQL Copilot CLI
//!
//! Command-line front-end for the `sql_copilot` library: the same accessor
//! flow a web UI session would drive, against a hosted text-to-SQL service
//! connected to a BigQuery warehouse.
//!
//! The service is trained on the warehouse schema the first time a command
//! needs it (and again once the handle's time window lapses); afterwards
//! every command is one or more delegated calls, memoized per argument for
//! the lifetime of the process.
//!
//! # Quick Start
//!
//! ```bash
//! export COPILOT_API_KEY="vn-..."
//! export COPILOT_BASE_URL="https://copilot.internal.example"
//! export COPILOT_MODEL="flaunt-v1"
//! export WAREHOUSE_PROJECT_ID="flaunt-v1"
//! export WAREHOUSE_DATASET="barefaced2"
//!
//! # Ask a question end to end
//! sql-copilot ask "total sales last month"
//!
//! # Machine-readable result
//! sql-copilot ask "total sales last month" -f json --no-summary
//!
//! # What the service suggests asking
//! sql-copilot questions
//!
//! # Inspect what the model has been trained on
//! sql-copilot training-data
//! ```
//!
//! Configuration may also live in `.sql-copilot.toml` or
//! `~/.config/sql-copilot/config.toml`; see the `config` module for the
//! full precedence rules.
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - Any failure (configuration, credentials, remote service, warehouse)

use std::{fs, path::PathBuf, process, time::Duration};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sql_copilot::{
    cli::{Cli, Commands, Format},
    config::Config,
    error::{AppResult, file_write_error},
    factory::{Bootstrap, ClientFactory, RemoteBootstrap},
    output::{OutputFormat, OutputOptions, format_question_list, format_table},
    session::CopilotSession
};
use tokio::main;

#[main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Convert CLI format to internal OutputFormat
fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn section(title: &str, colored_out: bool) -> String {
    if colored_out {
        title.cyan().bold().to_string()
    } else {
        title.to_string()
    }
}

struct AskOptions {
    opts:         OutputOptions,
    no_chart:     bool,
    figure_out:   Option<PathBuf>,
    no_followups: bool,
    no_summary:   bool
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    // CLI key overrides environment and files
    if let Some(api_key) = cli.api_key {
        config.copilot.api_key = Some(api_key);
    }

    let ttl = Duration::from_secs(config.cache.handle_ttl_secs);
    let max_entries = config.cache.max_entries;
    let factory = ClientFactory::new(RemoteBootstrap::new(config), ttl);
    let session = CopilotSession::new(factory, max_entries);

    match cli.command {
        Commands::Ask {
            question,
            output_format,
            no_chart,
            figure_out,
            no_followups,
            no_summary,
            no_color
        } => {
            let ask = AskOptions {
                opts: OutputOptions {
                    format:  convert_format(output_format),
                    colored: !no_color
                },
                no_chart,
                figure_out,
                no_followups,
                no_summary
            };
            run_ask(&session, &question, ask).await
        }
        Commands::Questions {
            output_format,
            no_color
        } => {
            let opts = OutputOptions {
                format:  convert_format(output_format),
                colored: !no_color
            };
            let pb = spinner("Generating sample questions ...");
            let questions = session.generate_questions().await?;
            pb.finish_and_clear();
            print!("{}", format_question_list(&questions, &opts));
            Ok(())
        }
        Commands::TrainingData {
            output_format,
            no_color
        } => {
            let opts = OutputOptions {
                format:  convert_format(output_format),
                colored: !no_color
            };
            let pb = spinner("Getting training data ...");
            let data = session.list_training_data().await?;
            pb.finish_and_clear();
            println!("{}", format_table(&data, &opts));
            Ok(())
        }
    }
}

async fn run_ask<B: Bootstrap>(
    session: &CopilotSession<B>,
    question: &str,
    ask: AskOptions
) -> AppResult<()> {
    let text_mode = matches!(ask.opts.format, OutputFormat::Text);

    let pb = spinner("Generating SQL query ...");
    let sql = session.generate_sql(question).await?;
    pb.finish_and_clear();

    let pb = spinner("Checking for valid SQL ...");
    let valid = session.is_sql_valid(&sql).await?;
    pb.finish_and_clear();

    if !valid {
        // The service answered with text it does not consider runnable SQL
        println!("{}", sql);
        return Ok(());
    }

    if text_mode {
        println!("{}", section("SQL", ask.opts.colored));
        println!("{}\n", sql);
    }

    let pb = spinner("Running SQL query ...");
    let df = session.run_sql(&sql).await?;
    pb.finish_and_clear();

    println!("{}", format_table(&df, &ask.opts));

    if !ask.no_chart {
        let pb = spinner("Checking if we should generate a chart ...");
        let wants_chart = session.should_generate_chart(question, &sql, &df).await?;
        pb.finish_and_clear();

        if wants_chart {
            let pb = spinner("Generating chart code ...");
            let code = session.generate_plot_code(question, &sql, &df).await?;
            pb.finish_and_clear();

            let pb = spinner("Rendering chart ...");
            let figure = session.render_figure(&code, &df).await?;
            pb.finish_and_clear();

            let figure_json = serde_json::to_string_pretty(&figure).unwrap_or_default();
            match &ask.figure_out {
                Some(path) => {
                    fs::write(path, figure_json)
                        .map_err(|e| file_write_error(&path.display().to_string(), e))?;
                    if text_mode {
                        println!("Figure written to {}\n", path.display());
                    }
                }
                None => {
                    if text_mode {
                        println!("{}", section("Figure", ask.opts.colored));
                    }
                    println!("{}\n", figure_json);
                }
            }
        }
    }

    if !ask.no_followups {
        let pb = spinner("Generating followup questions ...");
        let followups = session.generate_followups(question, &sql, &df).await?;
        pb.finish_and_clear();

        if !followups.is_empty() {
            if text_mode {
                println!("{}", section("Follow-up questions", ask.opts.colored));
            }
            print!("{}", format_question_list(&followups, &ask.opts));
            println!();
        }
    }

    if !ask.no_summary {
        let pb = spinner("Generating summary ...");
        let summary = session.generate_summary(question, &df).await?;
        pb.finish_and_clear();

        if text_mode {
            println!("{}", section("Summary", ask.opts.colored));
        }
        println!("{}", summary);
    }

    Ok(())
}
