//! Derived metrics shared by the datasets and the dashboard views.

use serde::Serialize;

use crate::generators::{AlertDataset, BiodiversityDataset, DeforestationDataset, Driver};

/// Percentage change from `old` to `new`.
///
/// A zero base has no defined ratio: the result is 100 when `new` is
/// positive and 0 otherwise, so the value is always finite.
pub fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return if new > 0.0 { 100.0 } else { 0.0 };
    }
    (new - old) / old * 100.0
}

/// `part / whole` as a percentage, 0 for an empty whole.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole * 100.0 }
}

/// Coarse bucket for 0-100 risk scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Bucketing used for region and species scores: below 30 is low, below
    /// 70 medium.
    pub fn from_score(score: u32) -> Self {
        if score < 30 {
            RiskLevel::Low
        } else if score < 70 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Bucketing used for hotspot risk zones on the map: strictly above 70
    /// is high, strictly above 30 medium.
    pub fn from_zone_score(score: u32) -> Self {
        if score > 70 {
            RiskLevel::High
        } else if score > 30 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "orange",
            RiskLevel::High => "red",
        }
    }
}

/// Headline numbers shown above the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_loss_hectares: f64,
    pub loss_change_percent: f64,
    pub species_at_risk: u32,
    pub species_change: i32,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub recent_alerts: usize,
    pub new_alerts: usize,
}

impl KeyMetrics {
    pub fn from_datasets(
        deforestation: &DeforestationDataset,
        biodiversity: &BiodiversityDataset,
        alerts: &AlertDataset,
    ) -> Self {
        Self {
            total_loss_hectares: deforestation.total_loss_hectares,
            loss_change_percent: deforestation.loss_change_percent,
            species_at_risk: biodiversity.species_at_risk,
            species_change: biodiversity.species_change,
            risk_score: biodiversity.risk_score,
            risk_level: RiskLevel::from_score(biodiversity.risk_score as u32),
            recent_alerts: alerts.alerts.len(),
            new_alerts: alerts.new_alerts_count,
        }
    }
}

/// One row of the contributing-factors table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub factor: Driver,
    pub contribution_percent: u8,
}

/// Driver contributions in the order the dashboard lists them.
pub fn risk_factors() -> Vec<RiskFactor> {
    Driver::ALL
        .iter()
        .map(|&factor| RiskFactor {
            factor,
            contribution_percent: factor.share(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_change() {
        assert!((percentage_change(100.0, 150.0) - 50.0).abs() < 1e-9);
        assert!((percentage_change(200.0, 100.0) + 50.0).abs() < 1e-9);
        assert_eq!(percentage_change(42.0, 42.0), 0.0);
    }

    #[test]
    fn test_percentage_change_zero_base() {
        assert_eq!(percentage_change(0.0, 10.0), 100.0);
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
        assert_eq!(percentage_change(0.0, -5.0), 0.0);
    }

    #[test]
    fn test_percent_of_empty_whole() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert!((percent_of(25.0, 100.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_risk_level_buckets() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100).color(), "red");
    }

    #[test]
    fn test_zone_buckets_are_exclusive() {
        assert_eq!(RiskLevel::from_zone_score(30), RiskLevel::Low);
        assert_eq!(RiskLevel::from_zone_score(31), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_zone_score(70), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_zone_score(71), RiskLevel::High);
    }

    #[test]
    fn test_risk_factor_table() {
        let factors = risk_factors();
        assert_eq!(factors.len(), 4);
        assert_eq!(factors[0].factor, Driver::Logging);
        assert_eq!(factors[0].contribution_percent, 35);
        assert_eq!(factors[1].contribution_percent, 45);
    }
}
