use anyhow::{Context, Result};
use simplot::plot::{self, ChartConfig};
use simplot::{run, table};
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) pick the run to analyze ──────────────────────────────────
    let base = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let run = run::latest_run_dir(&base)
        .with_context(|| format!("selecting a run under {}", base.display()))?;
    info!(run = %run.name(), modified = %run.modified_utc(), "analyzing latest run");

    // ─── 3) load every CSV into the registry ─────────────────────────
    let registry = table::load_run(&run.path)?;
    info!(tables = ?registry.names(), "registry loaded");

    // ─── 4) render charts ────────────────────────────────────────────
    let cfg = ChartConfig::default();
    print!(
        "{}",
        plot::render_price(registry.get(plot::PRICE_TABLE)?, &[], cfg)?
    );
    print!(
        "{}",
        plot::render_agents(registry.get(plot::AGENT_TABLE)?, &[], cfg)?
    );
    for (_, table) in registry.iter() {
        if table.headers().iter().any(|h| h == plot::TASK_NAME) {
            print!("{}", plot::render_tasks(table, &[], cfg)?);
        }
    }

    info!("analysis done");
    Ok(())
}
