//! Series for the trend and biodiversity charts.

use serde::Serialize;

use crate::generators::{BiodiversityDataset, DeforestationDataset};
use crate::metrics::{RiskLevel, percent_of};
use crate::profiles::Taxon;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub hectares: f64,
}

/// Annual loss, one point per year.
pub fn annual_trend(dataset: &DeforestationDataset) -> Vec<TrendPoint> {
    dataset
        .yearly
        .iter()
        .map(|(&year, summary)| TrendPoint {
            year,
            hectares: summary.loss_hectares,
        })
        .collect()
}

/// Stacked bar entry: species at risk versus the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesImpact {
    pub category: Taxon,
    pub at_risk: u32,
    pub not_at_risk: u32,
    pub percent_at_risk: f64,
}

pub fn species_impact(dataset: &BiodiversityDataset) -> Vec<SpeciesImpact> {
    dataset
        .species_distribution
        .iter()
        .map(|entry| SpeciesImpact {
            category: entry.category,
            at_risk: entry.at_risk,
            not_at_risk: entry.count.saturating_sub(entry.at_risk),
            percent_at_risk: percent_of(entry.at_risk as f64, entry.count as f64),
        })
        .collect()
}

/// Pie slice of the risk distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskSlice {
    pub level: RiskLevel,
    pub label: &'static str,
    pub percentage: f64,
    pub color: &'static str,
}

pub fn risk_slices(dataset: &BiodiversityDataset) -> Vec<RiskSlice> {
    dataset
        .risk_distribution
        .iter()
        .map(|share| RiskSlice {
            level: share.level,
            label: share.level.label(),
            percentage: share.percentage,
            color: share.level.color(),
        })
        .collect()
}
