//! Service configuration read from the environment.

use std::env;

use forest_data::Horizon;
use forest_data::config::HORIZON_START;

/// Runtime settings for the dashboard service.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Port to listen on (`PORT`, default 3001).
    pub port: u16,
    /// Seed used by every request that does not pass its own (`FOREST_SEED`).
    ///
    /// When unset each request draws a fresh seed.
    pub seed: Option<u64>,
    /// Requestable years, `FOREST_HORIZON_START` through the current year.
    pub horizon: Horizon,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            seed: None,
            horizon: Horizon::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .unwrap_or(3001);

        let seed = env::var("FOREST_SEED").ok().and_then(|value| {
            value
                .parse::<u64>()
                .inspect_err(|e| tracing::warn!("Ignoring FOREST_SEED={value:?}: {e}"))
                .ok()
        });

        let first = env::var("FOREST_HORIZON_START")
            .ok()
            .and_then(|value| value.parse::<i32>().ok())
            .unwrap_or(HORIZON_START);

        Self {
            port,
            seed,
            horizon: Horizon::starting_at(first),
        }
    }

    /// The seed to use for one request.
    pub fn resolve_seed(&self, requested: Option<u64>) -> u64 {
        requested
            .or(self.seed)
            .unwrap_or_else(|| rand::random::<u64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_seed_wins() {
        let config = DashboardConfig {
            seed: Some(7),
            ..Default::default()
        };
        assert_eq!(config.resolve_seed(Some(42)), 42);
        assert_eq!(config.resolve_seed(None), 7);
    }

    #[test]
    fn test_default_horizon_starts_2015() {
        let config = DashboardConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.horizon.first, 2015);
        assert!(config.seed.is_none());
    }
}
