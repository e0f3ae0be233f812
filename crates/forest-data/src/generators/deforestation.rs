//! Forest loss series, hotspots, and protected-area summaries.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::Serialize;
use time::{Date, Month};
use tracing::debug;

use crate::config::{Horizon, Severity, YearRange, severity_level};
use crate::error::GenerationError;
use crate::metrics::percentage_change;
use crate::profiles::{self, RegionProfile};
use crate::sampling::weighted_choice;

/// Hotspot severity weights on the 1-3 scale.
const HOTSPOT_SEVERITY_WEIGHTS: [(Severity, f64); 3] = [
    (Severity::Low, 0.3),
    (Severity::Medium, 0.4),
    (Severity::High, 0.3),
];

/// Forest loss for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyLoss {
    pub year: i32,
    pub month: u8,
    pub hectares_lost: f64,
}

/// A detected clearing event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotspot {
    pub lat: f64,
    pub lon: f64,
    /// Serialized as the 1-3 level.
    #[serde(serialize_with = "severity_level")]
    pub severity: Severity,
    pub area_hectares: f64,
    #[serde(rename = "first_detected_date")]
    pub first_detected: Date,
    /// 1-100
    pub risk_score: u8,
}

/// Summary of protected land in the region.
///
/// The three status percentages are independent draws and do not sum to 100.
/// Consumers that need a distribution normalize them where they use them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProtectedAreaSummary {
    pub total_count: u32,
    pub total_area: f64,
    pub protection_percentage: f64,
    pub well_protected_percent: f64,
    pub at_risk_percent: f64,
    pub critical_percent: f64,
}

/// Main causes of clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Driver {
    Agriculture,
    Logging,
    Mining,
    Infrastructure,
}

impl Driver {
    pub const ALL: [Driver; 4] = [
        Driver::Logging,
        Driver::Agriculture,
        Driver::Mining,
        Driver::Infrastructure,
    ];

    /// Typical contribution to total loss, in percent.
    pub fn share(self) -> u8 {
        match self {
            Driver::Agriculture => 45,
            Driver::Logging => 35,
            Driver::Mining => 12,
            Driver::Infrastructure => 8,
        }
    }
}

/// Per-year state read by the time-lapse view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearSummary {
    pub loss_hectares: f64,
    pub affected_species: u32,
    pub primary_cause: Driver,
    pub primary_cause_percentage: f64,
}

/// Everything the map and trend views need for one region and year range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeforestationDataset {
    pub region: String,
    pub region_fallback: bool,
    pub year_range: YearRange,
    pub monthly: Vec<MonthlyLoss>,
    pub total_loss_hectares: f64,
    pub loss_change_percent: f64,
    pub hotspots: Vec<Hotspot>,
    pub protected_areas: ProtectedAreaSummary,
    #[serde(rename = "yearly_data")]
    pub yearly: BTreeMap<i32, YearSummary>,
}

impl DeforestationDataset {
    /// Total loss for one year, if the year was generated.
    pub fn year_loss(&self, year: i32) -> Option<f64> {
        self.yearly.get(&year).map(|summary| summary.loss_hectares)
    }

    /// The profile this dataset was generated from.
    pub fn profile(&self) -> &'static RegionProfile {
        profiles::lookup(&self.region).unwrap_or_else(profiles::global)
    }
}

/// Configuration for deforestation generation.
#[derive(Debug, Clone)]
pub struct DeforestationGenConfig {
    /// Years that may be requested.
    pub horizon: Horizon,
    /// Number of hotspots per dataset.
    pub hotspot_count: usize,
    /// Fractional increase of the base loss per year into the range.
    pub annual_trend: f64,
    /// Loss multiplier during dry-season months.
    pub dry_season_factor: f64,
}

impl Default for DeforestationGenConfig {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            hotspot_count: 50,
            annual_trend: 0.05,
            dry_season_factor: 1.3,
        }
    }
}

/// Generates deforestation datasets.
pub struct DeforestationGenerator {
    config: DeforestationGenConfig,
}

impl DeforestationGenerator {
    /// Creates a new generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: DeforestationGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: DeforestationGenConfig) -> Self {
        Self { config }
    }

    /// Generates a full dataset for `region` over `range`.
    ///
    /// Unknown regions use the Global profile. Fails if the range leaves the
    /// configured horizon.
    pub fn generate(
        &self,
        region: &str,
        range: YearRange,
        rng: &mut impl Rng,
    ) -> Result<DeforestationDataset, GenerationError> {
        self.config.horizon.check(range)?;
        let resolved = profiles::resolve(region);
        let profile = resolved.profile;

        let monthly = self.generate_monthly(profile, range, rng);
        let total_loss_hectares = monthly.iter().map(|m| m.hectares_lost).sum();

        let hotspots = self.generate_hotspots(profile, range, rng)?;
        let protected_areas = self.generate_protected_areas(rng);
        let yearly = self.summarize_years(&monthly, rng);

        let first = yearly.get(&range.start()).map_or(0.0, |y| y.loss_hectares);
        let last = yearly.get(&range.end()).map_or(0.0, |y| y.loss_hectares);
        let loss_change_percent = percentage_change(first, last);

        debug!(
            region = profile.name,
            range = %range,
            months = monthly.len(),
            hotspots = hotspots.len(),
            "Generated deforestation dataset"
        );

        Ok(DeforestationDataset {
            region: profile.name.to_string(),
            region_fallback: resolved.fallback,
            year_range: range,
            monthly,
            total_loss_hectares,
            loss_change_percent,
            hotspots,
            protected_areas,
            yearly,
        })
    }

    /// Builds the monthly series: an upward yearly trend with noise, spread
    /// over months with a dry-season bump and per-month jitter.
    fn generate_monthly(
        &self,
        profile: &RegionProfile,
        range: YearRange,
        rng: &mut impl Rng,
    ) -> Vec<MonthlyLoss> {
        let year_noise = Uniform::new(0.9, 1.1);
        let month_jitter = Uniform::new(0.8, 1.2);
        let mut monthly = Vec::with_capacity(range.len() * 12);

        for (i, year) in range.years().enumerate() {
            let trend = 1.0 + i as f64 * self.config.annual_trend;
            let yearly_loss = profile.base_loss_rate * trend * year_noise.sample(rng);

            for month in 1..=12u8 {
                let seasonal = if profile.is_dry_season(month as u32) {
                    self.config.dry_season_factor
                } else {
                    1.0
                };

                monthly.push(MonthlyLoss {
                    year,
                    month,
                    hectares_lost: yearly_loss / 12.0 * seasonal * month_jitter.sample(rng),
                });
            }
        }

        monthly
    }

    fn generate_hotspots(
        &self,
        profile: &RegionProfile,
        range: YearRange,
        rng: &mut impl Rng,
    ) -> Result<Vec<Hotspot>, GenerationError> {
        (0..self.config.hotspot_count)
            .map(|_| Self::generate_hotspot(profile, range, rng))
            .collect()
    }

    fn generate_hotspot(
        profile: &RegionProfile,
        range: YearRange,
        rng: &mut impl Rng,
    ) -> Result<Hotspot, GenerationError> {
        let (lat, lon) = profile.bounds().random_point(rng);
        let severity = weighted_choice(&HOTSPOT_SEVERITY_WEIGHTS, rng);
        let area_hectares = rng.gen_range(50.0..2000.0) * severity.level() as f64;

        let year = rng.gen_range(range.start()..=range.end());
        let month = Month::January.nth_next(rng.gen_range(0..12));
        let day = rng.gen_range(1..=27);
        let first_detected = Date::from_calendar_date(year, month, day)?;

        Ok(Hotspot {
            lat,
            lon,
            severity,
            area_hectares,
            first_detected,
            risk_score: rng.gen_range(1..=100),
        })
    }

    fn generate_protected_areas(&self, rng: &mut impl Rng) -> ProtectedAreaSummary {
        ProtectedAreaSummary {
            total_count: rng.gen_range(20..100),
            total_area: rng.gen_range(500_000.0..5_000_000.0),
            protection_percentage: rng.gen_range(10.0..30.0),
            well_protected_percent: rng.gen_range(30.0..60.0),
            at_risk_percent: rng.gen_range(20.0..40.0),
            critical_percent: rng.gen_range(10.0..30.0),
        }
    }

    /// Groups the monthly series by year and attaches the per-year draws.
    fn summarize_years(
        &self,
        monthly: &[MonthlyLoss],
        rng: &mut impl Rng,
    ) -> BTreeMap<i32, YearSummary> {
        let mut losses: BTreeMap<i32, f64> = BTreeMap::new();
        for record in monthly {
            *losses.entry(record.year).or_default() += record.hectares_lost;
        }

        let cause_weights: Vec<(Driver, f64)> = Driver::ALL
            .iter()
            .map(|&driver| (driver, driver.share() as f64))
            .collect();

        losses
            .into_iter()
            .map(|(year, loss_hectares)| {
                let summary = YearSummary {
                    loss_hectares,
                    affected_species: rng.gen_range(50..=500),
                    primary_cause: weighted_choice(&cause_weights, rng),
                    primary_cause_percentage: rng.gen_range(30.0..60.0),
                };
                (year, summary)
            })
            .collect()
    }
}

impl Default for DeforestationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn range(start: i32, end: i32) -> YearRange {
        YearRange::new(start, end).unwrap()
    }

    #[test]
    fn test_monthly_series_covers_range() {
        let generator = DeforestationGenerator::new();
        let mut rng = rand::thread_rng();
        let data = generator
            .generate("Amazon", range(2016, 2019), &mut rng)
            .unwrap();

        assert_eq!(data.monthly.len(), 4 * 12);
        assert_eq!(data.monthly[0].year, 2016);
        assert_eq!(data.monthly[0].month, 1);
        assert_eq!(data.monthly.last().unwrap().year, 2019);
        assert_eq!(data.monthly.last().unwrap().month, 12);
        assert_eq!(data.yearly.len(), 4);

        let sum: f64 = data.monthly.iter().map(|m| m.hectares_lost).sum();
        assert!((sum - data.total_loss_hectares).abs() < 1e-6);

        let yearly_sum: f64 = data.yearly.values().map(|y| y.loss_hectares).sum();
        assert!((yearly_sum - data.total_loss_hectares).abs() < 1e-3);
    }

    #[test]
    fn test_monthly_losses_stay_within_noise_bounds() {
        let generator = DeforestationGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let data = generator
            .generate("Amazon", range(2015, 2015), &mut rng)
            .unwrap();

        let base_month = 2_000_000.0 / 12.0;
        for record in &data.monthly {
            let seasonal = if (6..=9).contains(&record.month) { 1.3 } else { 1.0 };
            let low = base_month * 0.9 * 0.8 * seasonal;
            let high = base_month * 1.1 * 1.2 * seasonal;
            assert!(
                (low..high).contains(&record.hectares_lost),
                "month {} loss {} outside {low}..{high}",
                record.month,
                record.hectares_lost
            );
        }
    }

    #[test]
    fn test_hotspots_within_region_and_range() {
        let generator = DeforestationGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        let data = generator
            .generate("Congo Basin", range(2017, 2020), &mut rng)
            .unwrap();

        assert_eq!(data.hotspots.len(), 50);
        for spot in &data.hotspots {
            assert!((-10.0..10.0).contains(&spot.lat));
            assert!((10.0..30.0).contains(&spot.lon));
            assert!((2017..=2020).contains(&spot.first_detected.year()));
            assert!(spot.first_detected.day() <= 27);
            assert!((1..=100).contains(&spot.risk_score));

            let level = spot.severity.level() as f64;
            assert!(spot.area_hectares >= 50.0 * level);
            assert!(spot.area_hectares < 2000.0 * level);
        }
    }

    #[test]
    fn test_hotspot_wire_format() {
        let generator = DeforestationGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let data = generator
            .generate("Amazon", range(2015, 2016), &mut rng)
            .unwrap();

        for spot in &data.hotspots {
            let json = serde_json::to_value(spot).unwrap();
            let level = json["severity"].as_u64().expect("severity is numeric");
            assert!((1..=3).contains(&level));
            assert_eq!(level, spot.severity.level() as u64);
            assert!(json["first_detected_date"].is_string());
        }

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["yearly_data"].as_object().unwrap().len(), 2);
        assert!(json["yearly_data"]["2015"]["loss_hectares"].is_f64());
    }

    #[test]
    fn test_protected_areas_ranges() {
        let generator = DeforestationGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let areas = generator
            .generate("Global", range(2015, 2016), &mut rng)
            .unwrap()
            .protected_areas;

        assert!((20..100).contains(&areas.total_count));
        assert!((500_000.0..5_000_000.0).contains(&areas.total_area));
        assert!((10.0..30.0).contains(&areas.protection_percentage));
        assert!((30.0..60.0).contains(&areas.well_protected_percent));
        assert!((20.0..40.0).contains(&areas.at_risk_percent));
        assert!((10.0..30.0).contains(&areas.critical_percent));
    }

    #[test]
    fn test_outside_horizon_is_rejected() {
        let generator = DeforestationGenerator::with_config(DeforestationGenConfig {
            horizon: Horizon {
                first: 2015,
                last: 2020,
            },
            ..Default::default()
        });
        let mut rng = rand::thread_rng();

        let err = generator
            .generate("Amazon", range(2014, 2016), &mut rng)
            .unwrap_err();
        assert!(err.is_invalid_range());

        let err = generator
            .generate("Amazon", range(2019, 2021), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerationError::OutsideHorizon { .. }));
    }

    #[test]
    fn test_unknown_region_uses_global_profile() {
        let generator = DeforestationGenerator::new();
        let mut rng = rand::thread_rng();
        let data = generator
            .generate("Narnia", range(2015, 2016), &mut rng)
            .unwrap();

        assert_eq!(data.region, "Global");
        assert!(data.region_fallback);
        assert_eq!(data.profile().name, "Global");
    }

    #[test]
    fn test_custom_hotspot_count() {
        let generator = DeforestationGenerator::with_config(DeforestationGenConfig {
            hotspot_count: 5,
            ..Default::default()
        });
        let mut rng = rand::thread_rng();
        let data = generator
            .generate("Amazon", range(2015, 2015), &mut rng)
            .unwrap();
        assert_eq!(data.hotspots.len(), 5);
    }

    #[test]
    fn test_driver_shares_total_hundred() {
        let total: u32 = Driver::ALL.iter().map(|d| d.share() as u32).sum();
        assert_eq!(total, 100);
    }
}
