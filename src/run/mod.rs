// src/run/mod.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// One simulation run's output directory: the simulator creates these under
/// a common base, one per run, and this crate only ever reads them.
#[derive(Debug, Clone)]
pub struct RunDir {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl RunDir {
    /// Final path component, e.g. `baseline_x7k` for `data/baseline_x7k`.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Modification time as a UTC timestamp, for logs and reports.
    pub fn modified_utc(&self) -> DateTime<Utc> {
        self.modified.into()
    }
}

/// List every immediate subdirectory of `base`.
///
/// Plain files and symlinks to files are skipped. The order follows the
/// directory listing, which is filesystem-dependent.
pub fn all_run_dirs(base: &Path) -> Result<Vec<RunDir>> {
    let entries = fs::read_dir(base).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AnalysisError::DirectoryNotFound {
            path: base.to_path_buf(),
            source,
        },
        _ => AnalysisError::Io(source),
    })?;

    let mut runs = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        runs.push(RunDir {
            path: entry.path(),
            modified,
        });
    }
    debug!(base = %base.display(), count = runs.len(), "scanned run directories");
    Ok(runs)
}

/// Pick the most recently modified run under `base`.
///
/// With zero candidates this fails with [`AnalysisError::EmptySelection`].
/// Ties on modification time resolve to whichever candidate the scan
/// yielded last; that order is filesystem-dependent.
pub fn latest_run_dir(base: &Path) -> Result<RunDir> {
    all_run_dirs(base)?
        .into_iter()
        .max_by_key(|run| run.modified)
        .ok_or_else(|| AnalysisError::EmptySelection {
            base: base.to_path_buf(),
        })
}

/// Resolve the run to analyze: an explicit override wins, otherwise the
/// latest run under `base`.
pub fn resolve_run(base: &Path, explicit: Option<&Path>) -> Result<RunDir> {
    match explicit {
        Some(path) => {
            let meta =
                fs::metadata(path).map_err(|source| AnalysisError::DirectoryNotFound {
                    path: path.to_path_buf(),
                    source,
                })?;
            if !meta.is_dir() {
                return Err(AnalysisError::DirectoryNotFound {
                    path: path.to_path_buf(),
                    source: io::Error::other("not a directory"),
                });
            }
            Ok(RunDir {
                path: path.to_path_buf(),
                modified: meta.modified()?,
            })
        }
        None => latest_run_dir(base),
    }
}
