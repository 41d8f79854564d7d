//! Load market-simulation run output into typed in-memory tables and
//! render summary charts.
//!
//! A simulator writes one directory per run under a common base, each
//! holding flat CSV datasets keyed by a `tick` column. [`run`] picks the
//! run to analyze, [`table`] loads its CSVs into a registry of typed
//! tables, and [`plot`] draws price, agent, and task charts from them.

pub mod error;
pub mod plot;
pub mod run;
pub mod table;

pub use error::{AnalysisError, Result};
