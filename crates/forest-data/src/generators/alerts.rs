//! Recent clearing alerts.

use rand::Rng;
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::config::{AlertThreshold, Severity};
use crate::profiles;
use crate::sampling::weighted_choice;

const ALERT_SEVERITY_WEIGHTS: [(Severity, f64); 3] = [
    (Severity::Low, 0.3),
    (Severity::Medium, 0.4),
    (Severity::High, 0.3),
];

/// One detected event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub location: String,
    pub severity: Severity,
    pub area_hectares: f64,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    pub is_new: bool,
}

/// Alerts for one region, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDataset {
    pub region: String,
    pub region_fallback: bool,
    pub threshold: AlertThreshold,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub alerts: Vec<Alert>,
    /// Number of alerts with `is_new` set.
    pub new_alerts_count: usize,
}

impl AlertDataset {
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Configuration for alert generation.
#[derive(Debug, Clone)]
pub struct AlertGenConfig {
    /// Alerts are dated up to this many days before `now`.
    pub window_days: i64,
    /// Alerts younger than this many days are flagged new.
    pub new_within_days: i64,
    /// Base alert count for regions without a profile.
    pub default_base_alerts: u32,
}

impl Default for AlertGenConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            new_within_days: 5,
            default_base_alerts: 10,
        }
    }
}

/// Generates alert lists.
pub struct AlertGenerator {
    config: AlertGenConfig,
}

impl AlertGenerator {
    /// Creates a new generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: AlertGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: AlertGenConfig) -> Self {
        Self { config }
    }

    /// Generates alerts for `region` relative to `now`.
    pub fn generate(
        &self,
        region: &str,
        threshold: AlertThreshold,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> AlertDataset {
        let resolved = profiles::resolve(region);
        let base = if resolved.fallback {
            self.config.default_base_alerts
        } else {
            resolved.profile.base_alerts
        };
        let count = (base as f64 * threshold.multiplier()).round() as usize;

        let bounds = resolved.profile.bounds();
        let mut alerts: Vec<Alert> = (0..count)
            .map(|_| {
                let days_ago = rng.gen_range(0..self.config.window_days);
                let (lat, lon) = bounds.random_point(rng);
                let severity = weighted_choice(&ALERT_SEVERITY_WEIGHTS, rng);
                let area_hectares = rng.gen_range(10.0..100.0) * area_multiplier(severity);
                let pool = descriptions(severity);
                let description = pool[rng.gen_range(0..pool.len())].to_string();

                Alert {
                    id: uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid(),
                    date: now - Duration::days(days_ago),
                    location: format!("{lat:.2}°, {lon:.2}°"),
                    severity,
                    area_hectares,
                    description,
                    lat,
                    lon,
                    is_new: days_ago < self.config.new_within_days,
                }
            })
            .collect();

        alerts.sort_by(|a, b| b.date.cmp(&a.date));
        let new_alerts_count = alerts.iter().filter(|alert| alert.is_new).count();

        debug!(
            region = resolved.profile.name,
            ?threshold,
            count,
            new_alerts_count,
            "Generated alerts"
        );

        AlertDataset {
            region: resolved.profile.name.to_string(),
            region_fallback: resolved.fallback,
            threshold,
            generated_at: now,
            alerts,
            new_alerts_count,
        }
    }
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Scales the affected area by severity.
fn area_multiplier(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 1.0,
        Severity::Medium => 3.0,
        Severity::High => 10.0,
    }
}

fn descriptions(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Low => &[
            "Small-scale clearing detected",
            "Minor forest disturbance observed",
            "Limited logging activity detected",
        ],
        Severity::Medium => &[
            "Moderate clearing for agriculture",
            "Significant logging operations detected",
            "Road construction causing forest fragmentation",
        ],
        Severity::High => &[
            "Large-scale forest clearing for palm oil",
            "Massive deforestation for cattle ranching",
            "Critical habitat destruction by mining operations",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00 UTC);

    #[test]
    fn test_alert_counts_follow_threshold() {
        let alert_gen = AlertGenerator::new();
        let mut rng = rand::thread_rng();

        let count = |region, threshold, rng: &mut rand::rngs::ThreadRng| {
            alert_gen.generate(region, threshold, NOW, rng).len()
        };

        assert_eq!(count("Amazon", AlertThreshold::Medium, &mut rng), 15);
        assert_eq!(count("Amazon", AlertThreshold::High, &mut rng), 8);
        assert_eq!(count("Global", AlertThreshold::Low, &mut rng), 45);
        assert_eq!(count("Central America", AlertThreshold::High, &mut rng), 4);
        assert_eq!(count("Nowhere", AlertThreshold::Medium, &mut rng), 10);
        assert_eq!(count("Nowhere", AlertThreshold::Low, &mut rng), 15);
    }

    #[test]
    fn test_alerts_sorted_newest_first() {
        let alert_gen = AlertGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let data = alert_gen.generate("Southeast Asia", AlertThreshold::Low, NOW, &mut rng);

        assert_eq!(data.len(), 27);
        for pair in data.alerts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_alert_fields() {
        let alert_gen = AlertGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let data = alert_gen.generate("Amazon", AlertThreshold::Low, NOW, &mut rng);

        for alert in &data.alerts {
            let age = NOW - alert.date;
            assert!(age >= Duration::ZERO && age < Duration::days(30));
            assert_eq!(alert.is_new, age < Duration::days(5));

            assert!((-17.0..7.0).contains(&alert.lat));
            assert!((-68.0..-52.0).contains(&alert.lon));
            assert_eq!(alert.location, format!("{:.2}°, {:.2}°", alert.lat, alert.lon));

            let multiplier = area_multiplier(alert.severity);
            assert!(alert.area_hectares >= 10.0 * multiplier);
            assert!(alert.area_hectares < 100.0 * multiplier);
            assert!(descriptions(alert.severity).contains(&alert.description.as_str()));
        }
    }

    #[test]
    fn test_new_alert_count_matches_rows() {
        let alert_gen = AlertGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(17);

        for _ in 0..20 {
            let data = alert_gen.generate("Global", AlertThreshold::Medium, NOW, &mut rng);
            let new_rows = data.alerts.iter().filter(|a| a.is_new).count();
            assert_eq!(data.new_alerts_count, new_rows);
        }
    }

    #[test]
    fn test_alert_ids_unique() {
        let alert_gen = AlertGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let data = alert_gen.generate("Global", AlertThreshold::Low, NOW, &mut rng);

        let ids: std::collections::HashSet<_> = data.alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), data.len());
    }

    #[test]
    fn test_alert_severity_serializes_as_name() {
        let alert_gen = AlertGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(6);
        let data = alert_gen.generate("Global", AlertThreshold::Low, NOW, &mut rng);

        let json = serde_json::to_value(&data.alerts[0]).unwrap();
        assert!(["Low", "Medium", "High"].contains(&json["severity"].as_str().unwrap()));
    }
}
