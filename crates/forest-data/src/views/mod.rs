//! Read-only views over generated datasets.
//!
//! These shape the datasets for the map, chart, and time-lapse collaborators.
//! None of them mutate their input.

pub mod charts;
pub mod map;
pub mod timelapse;

pub use charts::{RiskSlice, SpeciesImpact, TrendPoint, annual_trend, risk_slices, species_impact};
pub use map::{
    HeatPoint, MapScene, ProtectedAreaCircle, ProtectionStatus, RiskZoneMarker, Viewport,
    build_scene,
};
pub use timelapse::{SeverityGroup, TimeLapseFrame, TimeLapseMarker, YearDelta, frame, frames};

use crate::config::Severity;

/// Marker color for a severity level.
pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "green",
        Severity::Medium => "orange",
        Severity::High => "red",
    }
}
