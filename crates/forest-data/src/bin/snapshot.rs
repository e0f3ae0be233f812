//! Prints one dashboard snapshot as JSON.
//!
//! Run with:
//! ```
//! FOREST_REGION=Amazon FOREST_SEED=12345 cargo run -p forest-data --bin snapshot
//! ```
//!
//! Filters come from `FOREST_REGION`, `FOREST_START_YEAR`, `FOREST_END_YEAR`,
//! `FOREST_THRESHOLD`, and `FOREST_SEED`. Logs go to stderr.

use std::env;

use forest_data::builders::DashboardBuilder;
use forest_data::{AlertThreshold, Horizon, YearRange};
use tracing_subscriber::EnvFilter;

fn env_parse<T: std::str::FromStr>(key: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Invalid {key}={value:?}: {e}")),
        Err(_) => Ok(None),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let horizon = Horizon::default();
    let region = env::var("FOREST_REGION").unwrap_or_else(|_| "Global".to_string());
    let start = env_parse("FOREST_START_YEAR")?.unwrap_or(horizon.first);
    let end = env_parse("FOREST_END_YEAR")?.unwrap_or(horizon.last);
    let threshold = env::var("FOREST_THRESHOLD")
        .map(|name| AlertThreshold::parse_or_default(&name))
        .unwrap_or_default();

    let mut builder = DashboardBuilder::new()
        .with_region(&region)
        .with_year_range(YearRange::new(start, end)?)
        .with_threshold(threshold)
        .with_horizon(horizon)
        .with_metrics(true);
    if let Some(seed) = env_parse::<u64>("FOREST_SEED")? {
        builder = builder.with_seed(seed);
    }

    let snapshot = builder.build()?;

    tracing::info!("Snapshot generated for {} ({start}-{end})", snapshot.deforestation.region);
    tracing::info!("  Seed: {}", snapshot.seed);
    tracing::info!("  Total loss: {:.0} ha", snapshot.key_metrics.total_loss_hectares);
    tracing::info!("  Loss change: {:.1}%", snapshot.key_metrics.loss_change_percent);
    tracing::info!("  Species at risk: {}", snapshot.key_metrics.species_at_risk);
    tracing::info!(
        "  Alerts: {} ({} new)",
        snapshot.key_metrics.recent_alerts,
        snapshot.key_metrics.new_alerts
    );
    if let Some(metrics) = &snapshot.metrics {
        tracing::info!("  Generation time: {} ms", metrics.generation_time_ms);
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
