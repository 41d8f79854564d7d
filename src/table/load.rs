// src/table/load.rs

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use csv::ReaderBuilder;
use glob::glob;
use tracing::{debug, info};

use super::{infer, Registry, Table};
use crate::error::{AnalysisError, Result};

/// Table name a file loads under: the file name with its extension stripped.
fn derived_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parse_error(path: &Path, source: csv::Error) -> AnalysisError {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    AnalysisError::TableParse { file, source }
}

/// Load one CSV file into a [`Table`].
///
/// The header row becomes the column names and every following row a data
/// row, in file order. Anything the CSV parser rejects (ragged rows,
/// invalid UTF-8) fails the load with [`AnalysisError::TableParse`] naming
/// the file.
pub fn load_table(path: &Path) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .flexible(false) // ragged rows are parse failures
        .from_path(path)
        .map_err(|e| parse_error(path, e))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| parse_error(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| parse_error(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let columns = (0..headers.len())
        .map(|idx| infer::column_from_rows(&rows, idx))
        .collect();

    Ok(Table::new(derived_name(path), headers, columns))
}

/// Load every `*.csv` directly inside `run_dir` into a [`Registry`].
///
/// The scan is non-recursive and the extension match case-sensitive; files
/// are visited in alphabetical order. The first file that fails to parse
/// aborts the whole load, so a returned registry is never partial.
#[tracing::instrument(level = "info", skip(run_dir), fields(dir = %run_dir.display()))]
pub fn load_run(run_dir: &Path) -> Result<Registry> {
    let meta = fs::metadata(run_dir).map_err(|source| AnalysisError::DirectoryNotFound {
        path: run_dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(AnalysisError::DirectoryNotFound {
            path: run_dir.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }

    let pattern = format!("{}/*.csv", run_dir.display());
    let mut tables = BTreeMap::new();
    for entry in glob(&pattern)? {
        let path = entry.map_err(|e| AnalysisError::Io(e.into_error()))?;
        if !path.is_file() {
            continue;
        }
        let table = load_table(&path)?;
        info!(file = %path.display(), rows = table.len(), "loaded table");
        let name = table.name().to_string();
        tables.insert(name, table);
    }
    debug!(tables = tables.len(), "run loaded");

    Ok(Registry::new(run_dir.to_path_buf(), tables))
}
