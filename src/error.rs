//! Error taxonomy for run discovery, table loading, and chart rendering.

use std::io;
use std::path::PathBuf;

/// Failures an analysis run can surface.
///
/// Every variant names the directory, file, table, or column it concerns,
/// so a failed run points straight at the offending input. Errors are never
/// recovered locally; they propagate to the invoking binary and terminate
/// the session.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The base or run directory is missing, or is not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The base directory holds no run subdirectories to select from.
    #[error("no run directories under {base}")]
    EmptySelection { base: PathBuf },

    /// A specific CSV file failed to parse; nothing from the run is kept.
    #[error("failed to parse {file}: {source}")]
    TableParse {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A renderer asked the registry for a table that was never loaded.
    #[error("table not found: {name} (loaded: {loaded:?})")]
    MissingTable { name: String, loaded: Vec<String> },

    /// A column lookup missed on a loaded table.
    #[error("table {table} has no column {column:?}")]
    MissingColumn { table: String, column: String },

    /// A numeric operation was requested on a text column.
    #[error("column {column:?} in table {table} is not numeric")]
    ColumnNotNumeric { table: String, column: String },

    /// The CSV enumeration pattern for a run directory was malformed.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Any other filesystem failure during a directory scan.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
