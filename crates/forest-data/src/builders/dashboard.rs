//! Fluent builder assembling one dashboard snapshot.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;

use crate::config::{AlertThreshold, Horizon, MapLayers, YearRange};
use crate::error::GenerationError;
use crate::generators::{
    AlertDataset, AlertGenerator, BiodiversityDataset, BiodiversityGenConfig,
    BiodiversityGenerator, DeforestationDataset, DeforestationGenConfig, DeforestationGenerator,
};
use crate::metrics::{KeyMetrics, RiskFactor, risk_factors};
use crate::profiles::GLOBAL;
use crate::views::{
    self, MapScene, RiskSlice, SpeciesImpact, TimeLapseFrame, TrendPoint, build_scene,
};

/// Everything the dashboard shows for one set of filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Seed that reproduces this snapshot together with `alerts.generated_at`.
    pub seed: u64,
    pub key_metrics: KeyMetrics,
    pub risk_factors: Vec<RiskFactor>,
    pub deforestation: DeforestationDataset,
    pub biodiversity: BiodiversityDataset,
    pub alerts: AlertDataset,
    pub map: MapScene,
    pub timelapse: TimeLapseFrame,
    pub trend: Vec<TrendPoint>,
    pub species_impact: Vec<SpeciesImpact>,
    pub risk_slices: Vec<RiskSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SnapshotMetrics>,
}

/// Performance metrics from snapshot generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotMetrics {
    /// Time spent generating and assembling (milliseconds).
    pub generation_time_ms: u64,
    pub monthly_records: usize,
    pub hotspots: usize,
    pub alerts: usize,
}

/// Builder for dashboard snapshots.
///
/// # Example
///
/// ```rust,ignore
/// let snapshot = DashboardBuilder::new()
///     .with_region("Amazon")
///     .with_year_range(YearRange::new(2018, 2022)?)
///     .with_threshold(AlertThreshold::High)
///     .with_seed(12345)
///     .build()?;
/// ```
pub struct DashboardBuilder {
    region: String,
    year_range: Option<YearRange>,
    threshold: AlertThreshold,
    layers: MapLayers,
    timelapse_year: Option<i32>,
    horizon: Horizon,
    seed: Option<u64>,
    now: Option<OffsetDateTime>,
    track_metrics: bool,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardBuilder {
    /// Global region, whole horizon, medium threshold, all layers on.
    pub fn new() -> Self {
        Self {
            region: GLOBAL.to_string(),
            year_range: None,
            threshold: AlertThreshold::default(),
            layers: MapLayers::default(),
            timelapse_year: None,
            horizon: Horizon::default(),
            seed: None,
            now: None,
            track_metrics: false,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the year range. Defaults to the whole horizon.
    pub fn with_year_range(mut self, range: YearRange) -> Self {
        self.year_range = Some(range);
        self
    }

    pub fn with_threshold(mut self, threshold: AlertThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_layers(mut self, layers: MapLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Year shown by the time-lapse frame. Defaults to the first year.
    pub fn with_timelapse_year(mut self, year: i32) -> Self {
        self.timelapse_year = Some(year);
        self
    }

    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the random seed. Without one a fresh seed is drawn per build.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pins the reference time alerts are dated against.
    pub fn with_now(mut self, now: OffsetDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Generates all datasets and derived views.
    ///
    /// The three generators run in parallel, each on its own RNG derived
    /// from the seed, so the result does not depend on scheduling.
    pub fn build(&self) -> Result<DashboardSnapshot, GenerationError> {
        let start_time = self.track_metrics.then(Instant::now);

        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        let mut master = StdRng::seed_from_u64(seed);
        let mut deforestation_rng = StdRng::seed_from_u64(master.r#gen());
        let mut biodiversity_rng = StdRng::seed_from_u64(master.r#gen());
        let mut alert_rng = StdRng::seed_from_u64(master.r#gen());
        let mut map_rng = StdRng::seed_from_u64(master.r#gen());

        let range = self.year_range.unwrap_or_else(|| self.horizon.full_range());
        let now = self.now.unwrap_or_else(OffsetDateTime::now_utc);

        let deforestation_gen = DeforestationGenerator::with_config(DeforestationGenConfig {
            horizon: self.horizon,
            ..Default::default()
        });
        let biodiversity_gen = BiodiversityGenerator::with_config(BiodiversityGenConfig {
            horizon: self.horizon,
        });
        let alert_gen = AlertGenerator::new();

        let (deforestation, (biodiversity, alerts)) = rayon::join(
            || deforestation_gen.generate(&self.region, range, &mut deforestation_rng),
            || {
                rayon::join(
                    || biodiversity_gen.generate(&self.region, range, &mut biodiversity_rng),
                    || alert_gen.generate(&self.region, self.threshold, now, &mut alert_rng),
                )
            },
        );
        let deforestation = deforestation?;
        let biodiversity = biodiversity?;

        let timelapse =
            views::frame(&deforestation, self.timelapse_year.unwrap_or(range.start()))?;
        let map = build_scene(&deforestation, self.layers, &mut map_rng);

        let metrics = start_time.map(|start| SnapshotMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            monthly_records: deforestation.monthly.len(),
            hotspots: deforestation.hotspots.len(),
            alerts: alerts.len(),
        });

        debug!(seed, region = %self.region, range = %range, "Built dashboard snapshot");

        Ok(DashboardSnapshot {
            seed,
            key_metrics: KeyMetrics::from_datasets(&deforestation, &biodiversity, &alerts),
            risk_factors: risk_factors(),
            trend: views::annual_trend(&deforestation),
            species_impact: views::species_impact(&biodiversity),
            risk_slices: views::risk_slices(&biodiversity),
            map,
            timelapse,
            deforestation,
            biodiversity,
            alerts,
            metrics,
        })
    }
}
