use dashboard::{config::DashboardConfig, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = DashboardConfig::from_env();

    tracing::info!(
        horizon_start = config.horizon.first,
        horizon_end = config.horizon.last,
        fixed_seed = config.seed.is_some(),
        "Starting Forest Guardian dashboard"
    );

    run_server(config).await
}
