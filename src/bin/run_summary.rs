// src/bin/run_summary.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use simplot::{run, table};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Serialize)]
struct RunRecord {
    name: String,
    modified: DateTime<Utc>,
    latest: bool,
}

#[derive(Debug, Serialize)]
struct TableRecord {
    name: String,
    rows: usize,
    numeric_columns: Vec<String>,
    text_columns: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    base: PathBuf,
    runs: Vec<RunRecord>,
    tables: Vec<TableRecord>,
}

fn main() -> Result<()> {
    // Log to stderr so stdout stays machine-readable.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let base = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let as_json = args.next().as_deref() == Some("json");

    tracing::info!(base = %base.display(), "summarizing runs");
    let summary = summarize(&base)?;

    if as_json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        print_report(&summary);
    }
    Ok(())
}

/// Every run under `base` with its modification time, plus the shape of
/// each table in the latest run.
fn summarize(base: &Path) -> Result<RunSummary> {
    let mut runs = run::all_run_dirs(base)
        .with_context(|| format!("listing runs under {}", base.display()))?;
    runs.sort_by_key(|r| r.modified);

    let latest = run::latest_run_dir(base)?;
    let registry = table::load_run(&latest.path)
        .with_context(|| format!("loading latest run {}", latest.name()))?;

    let runs = runs
        .iter()
        .map(|r| RunRecord {
            name: r.name(),
            modified: r.modified_utc(),
            latest: r.path == latest.path,
        })
        .collect();

    let tables = registry
        .iter()
        .map(|(name, t)| {
            let (numeric, text): (Vec<_>, Vec<_>) =
                t.columns().partition(|(_, col)| col.is_numeric());
            TableRecord {
                name: name.to_string(),
                rows: t.len(),
                numeric_columns: numeric.into_iter().map(|(h, _)| h.to_string()).collect(),
                text_columns: text.into_iter().map(|(h, _)| h.to_string()).collect(),
            }
        })
        .collect();

    Ok(RunSummary {
        base: base.to_path_buf(),
        runs,
        tables,
    })
}

fn print_report(summary: &RunSummary) {
    let mut runs = Table::new();
    runs.set_format(*format::consts::FORMAT_BOX_CHARS);
    runs.add_row(Row::new(vec![
        Cell::new("Run").style_spec("bFg"),
        Cell::new("Modified (UTC)").style_spec("bFg"),
        Cell::new("Latest").style_spec("bFg"),
    ]));
    for r in &summary.runs {
        runs.add_row(Row::new(vec![
            Cell::new(&r.name),
            Cell::new(&r.modified.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(if r.latest { "*" } else { "" }),
        ]));
    }
    println!("\n--- Runs under {} ---", summary.base.display());
    runs.printstd();

    let mut tables = Table::new();
    tables.set_format(*format::consts::FORMAT_BOX_CHARS);
    tables.add_row(Row::new(vec![
        Cell::new("Table").style_spec("bFg"),
        Cell::new("Rows").style_spec("bFg"),
        Cell::new("Numeric Columns").style_spec("bFg"),
        Cell::new("Text Columns").style_spec("bFg"),
    ]));
    for t in &summary.tables {
        tables.add_row(Row::new(vec![
            Cell::new(&t.name),
            Cell::new(&t.rows.to_string()).style_spec("r"),
            Cell::new(&t.numeric_columns.join(", ")),
            Cell::new(&t.text_columns.join(", ")),
        ]));
    }
    println!("\n--- Latest run tables ---");
    tables.printstd();
}
