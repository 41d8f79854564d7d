// src/plot/mod.rs

mod canvas;

pub use canvas::{line_chart, ChartConfig};

use crate::error::Result;
use crate::table::{Aggregate, Table};

/// Time column the simulator's recorder writes first into every dataset.
pub const TICK: &str = "tick";
/// Key column of the price dataset.
pub const GOOD: &str = "good";
/// Key column of the per-agent dataset.
pub const AGENT_ID: &str = "agent_id";
/// Key column of task-metric datasets.
pub const TASK_NAME: &str = "task_name";

/// Table names the default analysis expects in a loaded run.
pub const PRICE_TABLE: &str = "price";
pub const AGENT_TABLE: &str = "agent_info";

/// Value column the price chart falls back to when none are requested.
const DEFAULT_PRICE_COLUMN: &str = "old_price";

/// Chart the price table: per value column, one median and one mean line
/// per good over `(tick, good)` groups. With no explicit columns the value
/// column defaults to `old_price`.
pub fn render_price(table: &Table, value_cols: &[&str], cfg: ChartConfig) -> Result<String> {
    let cols: Vec<&str> = if value_cols.is_empty() {
        vec![DEFAULT_PRICE_COLUMN]
    } else {
        value_cols.to_vec()
    };

    let mut out = String::new();
    for col in cols {
        let mut series = Vec::new();
        for agg in [Aggregate::Median, Aggregate::Mean] {
            for mut line in table.aggregate_series(TICK, GOOD, col, agg)? {
                line.label = format!("{}/{}", line.label, agg.label());
                series.push(line);
            }
        }
        series.sort_by(|a, b| a.label.cmp(&b.label));

        let title = format!("{}: {} (median/mean by {})", table.name(), col, GOOD);
        out.push_str(&line_chart(&title, &series, cfg));
    }
    Ok(out)
}

/// Chart the agent table: per value column, one line per agent over ticks.
/// With no explicit columns every numeric column except the keys plots.
pub fn render_agents(table: &Table, value_cols: &[&str], cfg: ChartConfig) -> Result<String> {
    let cols: Vec<&str> = if value_cols.is_empty() {
        table.numeric_value_columns(&[TICK, AGENT_ID])
    } else {
        value_cols.to_vec()
    };

    let mut out = String::new();
    for col in cols {
        let mut series = table.pivot_series(TICK, AGENT_ID, col)?;
        for line in &mut series {
            line.label = format!("agent {}", line.label);
        }

        let title = format!("{}: {} by agent", table.name(), col);
        out.push_str(&line_chart(&title, &series, cfg));
    }
    Ok(out)
}

/// Chart a task table: per value column, one median line per task over
/// `(tick, task_name)` groups. With no explicit columns every numeric
/// column except the keys plots.
pub fn render_tasks(table: &Table, value_cols: &[&str], cfg: ChartConfig) -> Result<String> {
    let cols: Vec<&str> = if value_cols.is_empty() {
        table.numeric_value_columns(&[TICK, TASK_NAME])
    } else {
        value_cols.to_vec()
    };

    let mut out = String::new();
    for col in cols {
        let series = table.aggregate_series(TICK, TASK_NAME, col, Aggregate::Median)?;

        let title = format!("{}: {} (median by {})", table.name(), col, TASK_NAME);
        out.push_str(&line_chart(&title, &series, cfg));
    }
    Ok(out)
}
