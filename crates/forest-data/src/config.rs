//! Configuration and shared parameter types for data generation.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use geo::Rect;
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use time::OffsetDateTime;

use crate::error::GenerationError;

/// First year the dashboard offers data for.
pub const HORIZON_START: i32 = 2015;

/// Geographic box spanned by a region center and its lat/lon spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude (south)
    pub min_lat: f64,
    /// Minimum longitude (west)
    pub min_lon: f64,
    /// Maximum latitude (north)
    pub max_lat: f64,
    /// Maximum longitude (east)
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Builds the box `center ± spread` on both axes.
    pub const fn around(center: (f64, f64), spread: (f64, f64)) -> Self {
        Self::new(
            center.0 - spread.0,
            center.1 - spread.1,
            center.0 + spread.0,
            center.1 + spread.1,
        )
    }

    /// Returns a random point within the bounding box.
    pub fn random_point(&self, rng: &mut impl Rng) -> (f64, f64) {
        let lat = rng.gen_range(self.min_lat..self.max_lat);
        let lon = rng.gen_range(self.min_lon..self.max_lon);
        (lat, lon)
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Converts a `geo` rectangle (x = longitude, y = latitude).
    pub fn from_rect(rect: Rect<f64>) -> Self {
        Self::new(rect.min().y, rect.min().x, rect.max().y, rect.max().x)
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
struct RawYearRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = GenerationError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.start, raw.end)
    }
}

impl YearRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, GenerationError> {
        if start > end {
            return Err(GenerationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single year.
    pub fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of years in the range (always at least one).
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Years for which data may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    pub first: i32,
    pub last: i32,
}

impl Default for Horizon {
    fn default() -> Self {
        Self::starting_at(HORIZON_START)
    }
}

impl Horizon {
    /// Horizon from `first` through the current UTC year.
    pub fn starting_at(first: i32) -> Self {
        Self {
            first,
            last: OffsetDateTime::now_utc().year(),
        }
    }

    /// The whole horizon as a year range.
    pub fn full_range(&self) -> YearRange {
        YearRange {
            start: self.first,
            end: self.last.max(self.first),
        }
    }

    /// Fails when any part of `range` lies outside the horizon.
    pub fn check(&self, range: YearRange) -> Result<(), GenerationError> {
        if range.start < self.first || range.end > self.last {
            return Err(GenerationError::OutsideHorizon {
                start: range.start,
                end: range.end,
                first: self.first,
                last: self.last,
            });
        }
        Ok(())
    }
}

/// Three-step severity shared by hotspots (levels 1-3) and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Numeric level on the 1-3 scale.
    pub fn level(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }

}

/// Serializes a [`Severity`] as its 1-3 level, the form map layers key on.
///
/// Use with `#[serde(serialize_with = "severity_level")]`.
pub fn severity_level<S: Serializer>(
    severity: &Severity,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(severity.level())
}

/// Alert sensitivity. A lower threshold lets more alerts through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlertThreshold {
    Low,
    #[default]
    Medium,
    High,
}

impl AlertThreshold {
    /// Multiplier applied to a region's base alert count.
    pub fn multiplier(self) -> f64 {
        match self {
            AlertThreshold::Low => 1.5,
            AlertThreshold::Medium => 1.0,
            AlertThreshold::High => 0.5,
        }
    }

    /// Parses a threshold name, falling back to `Medium` (multiplier 1.0).
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown alert threshold {name:?}, using Medium");
            AlertThreshold::Medium
        })
    }
}

impl FromStr for AlertThreshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(AlertThreshold::Low),
            "medium" => Ok(AlertThreshold::Medium),
            "high" => Ok(AlertThreshold::High),
            other => Err(format!("unknown alert threshold: {other}")),
        }
    }
}

/// Which map layers the map collaborator should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayers {
    pub deforestation: bool,
    pub protected_areas: bool,
    pub risk_zones: bool,
}

impl Default for MapLayers {
    fn default() -> Self {
        Self {
            deforestation: true,
            protected_areas: true,
            risk_zones: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_year_range_rejects_inverted() {
        assert_eq!(
            YearRange::new(2020, 2015),
            Err(GenerationError::InvertedRange {
                start: 2020,
                end: 2015
            })
        );
        let range = YearRange::new(2015, 2020).unwrap();
        assert_eq!(range.len(), 6);
        assert!(range.contains(2017));
        assert!(!range.contains(2021));
    }

    #[test]
    fn test_year_range_deserialize_validates() {
        let ok: YearRange = serde_json::from_str(r#"{"start":2016,"end":2018}"#).unwrap();
        assert_eq!(ok.years().count(), 3);

        let bad = serde_json::from_str::<YearRange>(r#"{"start":2019,"end":2018}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_horizon_check() {
        let horizon = Horizon {
            first: 2015,
            last: 2024,
        };
        assert!(horizon.check(YearRange::new(2015, 2024).unwrap()).is_ok());
        assert!(horizon.check(YearRange::single(2014)).is_err());
        assert!(horizon.check(YearRange::new(2020, 2030).unwrap()).is_err());
    }

    #[test]
    fn test_random_point_within_box() {
        let bbox = BoundingBox::around((-5.0, -60.0), (12.0, 8.0));
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let (lat, lon) = bbox.random_point(&mut rng);
            assert!(bbox.contains(lat, lon));
        }
        assert_eq!(bbox.center(), (-5.0, -60.0));
    }

    #[test]
    fn test_from_rect_swaps_axes() {
        let rect = Rect::new(
            geo::coord! { x: -60.0, y: -5.0 },
            geo::coord! { x: -50.0, y: 5.0 },
        );
        let bbox = BoundingBox::from_rect(rect);
        assert_eq!(bbox, BoundingBox::new(-5.0, -60.0, 5.0, -50.0));
    }

    #[test]
    fn test_severity_level_serializer() {
        #[derive(Serialize)]
        struct Marker {
            #[serde(serialize_with = "severity_level")]
            severity: Severity,
        }

        let levels: Vec<_> = Severity::ALL
            .iter()
            .map(|&severity| serde_json::to_value(Marker { severity }).unwrap()["severity"].clone())
            .collect();
        assert_eq!(levels, [1, 2, 3]);
    }

    #[test]
    fn test_threshold_parsing() {
        assert_eq!("high".parse::<AlertThreshold>(), Ok(AlertThreshold::High));
        assert_eq!(AlertThreshold::parse_or_default(" Low "), AlertThreshold::Low);
        assert_eq!(AlertThreshold::parse_or_default("extreme"), AlertThreshold::Medium);
        assert_eq!(AlertThreshold::parse_or_default("extreme").multiplier(), 1.0);
    }
}
