//! Layer data for the interactive map.

use rand::Rng;
use serde::Serialize;
use time::Date;

use crate::config::{BoundingBox, MapLayers, Severity, severity_level};
use crate::generators::{DeforestationDataset, ProtectedAreaSummary};
use crate::metrics::RiskLevel;
use crate::sampling::weighted_choice;

/// Most protected-area circles drawn on one map.
const MAX_PROTECTED_CIRCLES: u32 = 20;

/// Degrees a circle may sit from the region center.
const CIRCLE_OFFSET_DEGREES: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: (f64, f64),
    pub zoom: u8,
    pub bounds: BoundingBox,
}

/// `[lat, lon, weight]` entry of the heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint(pub f64, pub f64, pub f64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskZoneMarker {
    pub lat: f64,
    pub lon: f64,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub color: &'static str,
    pub area_hectares: f64,
    #[serde(rename = "first_detected_date")]
    pub first_detected: Date,
    #[serde(serialize_with = "severity_level")]
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProtectionStatus {
    #[serde(rename = "Well Protected")]
    WellProtected,
    #[serde(rename = "At Risk")]
    AtRisk,
    Critical,
}

impl ProtectionStatus {
    pub fn color(self) -> &'static str {
        match self {
            ProtectionStatus::WellProtected => "green",
            ProtectionStatus::AtRisk => "orange",
            ProtectionStatus::Critical => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectedAreaCircle {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub radius_m: f64,
    pub status: ProtectionStatus,
    pub color: &'static str,
}

/// Everything the map collaborator draws. Disabled layers are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub viewport: Viewport,
    pub heat_points: Option<Vec<HeatPoint>>,
    pub risk_zones: Option<Vec<RiskZoneMarker>>,
    pub protected_areas: Option<Vec<ProtectedAreaCircle>>,
}

/// Builds the map layers enabled in `layers`.
///
/// Protected-area circles are placed randomly around the region center, so
/// the scene draws from `rng` when that layer is on.
pub fn build_scene(
    dataset: &DeforestationDataset,
    layers: MapLayers,
    rng: &mut impl Rng,
) -> MapScene {
    let profile = dataset.profile();
    let viewport = Viewport {
        center: profile.center,
        zoom: profile.zoom,
        bounds: profile.bounds(),
    };

    let heat_points: Option<Vec<HeatPoint>> = layers.deforestation.then(|| {
        dataset
            .hotspots
            .iter()
            .map(|spot| HeatPoint(spot.lat, spot.lon, spot.area_hectares))
            .collect()
    });

    let risk_zones: Option<Vec<RiskZoneMarker>> = layers.risk_zones.then(|| {
        dataset
            .hotspots
            .iter()
            .map(|spot| {
                let risk_level = RiskLevel::from_zone_score(spot.risk_score as u32);
                RiskZoneMarker {
                    lat: spot.lat,
                    lon: spot.lon,
                    risk_score: spot.risk_score,
                    risk_level,
                    color: risk_level.color(),
                    area_hectares: spot.area_hectares,
                    first_detected: spot.first_detected,
                    severity: spot.severity,
                }
            })
            .collect()
    });

    let protected_areas = layers
        .protected_areas
        .then(|| protected_circles(&dataset.protected_areas, profile.center, rng));

    MapScene {
        viewport,
        heat_points,
        risk_zones,
        protected_areas,
    }
}

/// Places up to 20 circles, drawing each status from the summary's status
/// percentages rescaled to probabilities.
fn protected_circles(
    summary: &ProtectedAreaSummary,
    center: (f64, f64),
    rng: &mut impl Rng,
) -> Vec<ProtectedAreaCircle> {
    let status_weights = [
        (ProtectionStatus::WellProtected, summary.well_protected_percent),
        (ProtectionStatus::AtRisk, summary.at_risk_percent),
        (ProtectionStatus::Critical, summary.critical_percent),
    ];
    let count = summary.total_count.min(MAX_PROTECTED_CIRCLES);

    (1..=count)
        .map(|i| {
            let lat = center.0 + rng.gen_range(-CIRCLE_OFFSET_DEGREES..CIRCLE_OFFSET_DEGREES);
            let lon = center.1 + rng.gen_range(-CIRCLE_OFFSET_DEGREES..CIRCLE_OFFSET_DEGREES);
            let radius_m = rng.gen_range(10_000.0..50_000.0);
            let status = weighted_choice(&status_weights, rng);

            ProtectedAreaCircle {
                label: format!("Protected Area {i}"),
                lat,
                lon,
                radius_m,
                status,
                color: status.color(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YearRange;
    use crate::generators::DeforestationGenerator;
    use rand::SeedableRng;

    fn dataset(region: &str) -> DeforestationDataset {
        let mut rng = rand::rngs::StdRng::seed_from_u64(77);
        DeforestationGenerator::new()
            .generate(region, YearRange::new(2015, 2018).unwrap(), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_all_layers() {
        let data = dataset("Amazon");
        let mut rng = rand::thread_rng();
        let scene = build_scene(&data, MapLayers::default(), &mut rng);

        assert_eq!(scene.viewport.center, (-5.0, -60.0));
        assert_eq!(scene.viewport.zoom, 4);
        assert_eq!(scene.heat_points.as_ref().unwrap().len(), 50);
        assert_eq!(scene.risk_zones.as_ref().unwrap().len(), 50);

        let circles = scene.protected_areas.unwrap();
        assert_eq!(circles.len() as u32, data.protected_areas.total_count.min(20));
        for circle in &circles {
            assert!((-10.0..0.0).contains(&circle.lat));
            assert!((-65.0..-55.0).contains(&circle.lon));
            assert!((10_000.0..50_000.0).contains(&circle.radius_m));
            assert_eq!(circle.color, circle.status.color());
        }
        assert_eq!(circles[0].label, "Protected Area 1");
    }

    #[test]
    fn test_disabled_layers_are_omitted() {
        let data = dataset("Global");
        let mut rng = rand::thread_rng();
        let layers = MapLayers {
            deforestation: false,
            protected_areas: false,
            risk_zones: true,
        };
        let scene = build_scene(&data, layers, &mut rng);

        assert_eq!(scene.viewport.zoom, 2);
        assert!(scene.heat_points.is_none());
        assert!(scene.protected_areas.is_none());
        assert!(scene.risk_zones.is_some());
    }

    #[test]
    fn test_risk_zone_classification() {
        let data = dataset("Congo Basin");
        let mut rng = rand::thread_rng();
        let scene = build_scene(&data, MapLayers::default(), &mut rng);

        for marker in scene.risk_zones.unwrap() {
            let expected = if marker.risk_score > 70 {
                RiskLevel::High
            } else if marker.risk_score > 30 {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            };
            assert_eq!(marker.risk_level, expected);
        }
    }

    #[test]
    fn test_risk_zone_severity_is_level() {
        let data = dataset("Amazon");
        let mut rng = rand::thread_rng();
        let scene = build_scene(&data, MapLayers::default(), &mut rng);

        let zones = serde_json::to_value(scene.risk_zones.unwrap()).unwrap();
        for (zone, spot) in zones.as_array().unwrap().iter().zip(&data.hotspots) {
            assert_eq!(zone["severity"], spot.severity.level());
            assert!(zone["first_detected_date"].is_string());
        }
    }

    #[test]
    fn test_heat_point_serializes_as_triple() {
        let json = serde_json::to_string(&HeatPoint(1.5, -2.0, 300.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0,300.0]");
    }
}
