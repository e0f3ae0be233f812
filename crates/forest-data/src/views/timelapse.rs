//! Year-by-year deforestation state for the time-lapse view.

use geo::{BoundingRect, MultiPoint, Point};
use serde::Serialize;

use crate::config::{BoundingBox, Severity, severity_level};
use crate::error::GenerationError;
use crate::generators::{DeforestationDataset, Driver, Hotspot};
use crate::metrics::percentage_change;

use super::severity_color;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeLapseMarker {
    pub lat: f64,
    pub lon: f64,
    pub area_hectares: f64,
    pub year_detected: i32,
    /// Circle radius in pixels, grows with the square root of the area.
    pub radius: f64,
}

impl From<&Hotspot> for TimeLapseMarker {
    fn from(spot: &Hotspot) -> Self {
        Self {
            lat: spot.lat,
            lon: spot.lon,
            area_hectares: spot.area_hectares,
            year_detected: spot.first_detected.year(),
            radius: spot.area_hectares.sqrt() / 5.0,
        }
    }
}

/// Visible hotspots of one severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityGroup {
    #[serde(serialize_with = "severity_level")]
    pub severity: Severity,
    pub color: &'static str,
    pub markers: Vec<TimeLapseMarker>,
}

/// Change against the previous year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearDelta {
    pub loss_hectares: f64,
    pub loss_percent: f64,
    pub affected_species: i64,
}

/// State of the region at the end of one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeLapseFrame {
    pub year: i32,
    pub title: String,
    pub loss_hectares: f64,
    pub cumulative_loss_hectares: f64,
    pub affected_species: u32,
    pub primary_cause: Driver,
    pub primary_cause_percentage: f64,
    /// Hotspots first detected in or before `year`.
    pub visible_hotspots: usize,
    /// Severity groups in ascending order; empty groups are left out.
    pub groups: Vec<SeverityGroup>,
    /// Extent of the visible hotspots, if any.
    pub extent: Option<BoundingBox>,
    /// None for the first year of the range.
    pub change_from_previous: Option<YearDelta>,
}

/// Builds the frame for `year`.
pub fn frame(dataset: &DeforestationDataset, year: i32) -> Result<TimeLapseFrame, GenerationError> {
    let range = dataset.year_range;
    let summary = dataset
        .yearly
        .get(&year)
        .ok_or(GenerationError::YearNotInRange {
            year,
            start: range.start(),
            end: range.end(),
        })?;

    let visible: Vec<&Hotspot> = dataset
        .hotspots
        .iter()
        .filter(|spot| spot.first_detected.year() <= year)
        .collect();

    let groups = Severity::ALL
        .iter()
        .filter_map(|&severity| {
            let markers: Vec<TimeLapseMarker> = visible
                .iter()
                .filter(|spot| spot.severity == severity)
                .map(|&spot| TimeLapseMarker::from(spot))
                .collect();
            (!markers.is_empty()).then(|| SeverityGroup {
                severity,
                color: severity_color(severity),
                markers,
            })
        })
        .collect();

    let points: MultiPoint<f64> = visible
        .iter()
        .map(|spot| Point::new(spot.lon, spot.lat))
        .collect();
    let extent = points.bounding_rect().map(BoundingBox::from_rect);

    let cumulative_loss_hectares = dataset
        .yearly
        .range(..=year)
        .map(|(_, y)| y.loss_hectares)
        .sum();

    let change_from_previous = dataset.yearly.get(&(year - 1)).map(|previous| YearDelta {
        loss_hectares: summary.loss_hectares - previous.loss_hectares,
        loss_percent: percentage_change(previous.loss_hectares, summary.loss_hectares),
        affected_species: summary.affected_species as i64 - previous.affected_species as i64,
    });

    Ok(TimeLapseFrame {
        year,
        title: format!("Deforestation Status in {year}"),
        loss_hectares: summary.loss_hectares,
        cumulative_loss_hectares,
        affected_species: summary.affected_species,
        primary_cause: summary.primary_cause,
        primary_cause_percentage: summary.primary_cause_percentage,
        visible_hotspots: visible.len(),
        groups,
        extent,
        change_from_previous,
    })
}

/// One frame per year of the dataset's range, in order.
pub fn frames(dataset: &DeforestationDataset) -> Result<Vec<TimeLapseFrame>, GenerationError> {
    dataset
        .year_range
        .years()
        .map(|year| frame(dataset, year))
        .collect()
}
