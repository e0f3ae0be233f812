//! Species-at-risk statistics and flagship species rosters.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::{Horizon, YearRange};
use crate::error::GenerationError;
use crate::metrics::RiskLevel;
use crate::profiles::{self, Taxon};
use crate::sampling::{normalize_to_percent, scaled_count};

/// Raw draw ranges for the Low/Medium/High shares before normalization.
const RISK_SHARE_RANGES: [(RiskLevel, f64, f64); 3] = [
    (RiskLevel::Low, 25.0, 45.0),
    (RiskLevel::Medium, 25.0, 45.0),
    (RiskLevel::High, 15.0, 35.0),
];

/// IUCN-style conservation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConservationStatus {
    #[serde(rename = "Critically Endangered")]
    CriticallyEndangered,
    Endangered,
    Vulnerable,
}

impl ConservationStatus {
    pub const ALL: [ConservationStatus; 3] = [
        ConservationStatus::CriticallyEndangered,
        ConservationStatus::Endangered,
        ConservationStatus::Vulnerable,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesDistribution {
    pub category: Taxon,
    pub count: u32,
    pub at_risk: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskShare {
    pub level: RiskLevel,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedSpecies {
    pub name: String,
    pub status: ConservationStatus,
    pub habitat_loss_percent: u8,
    pub population_decline: u8,
    pub risk_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiodiversityDataset {
    pub region: String,
    pub region_fallback: bool,
    pub year_range: YearRange,
    pub total_species: u32,
    pub endemic_percent: u32,
    pub species_at_risk: u32,
    pub species_change: i32,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub species_distribution: Vec<SpeciesDistribution>,
    /// Sums to 100.
    pub risk_distribution: Vec<RiskShare>,
    pub top_affected_species: Vec<AffectedSpecies>,
}

/// Configuration for biodiversity generation.
#[derive(Debug, Clone, Default)]
pub struct BiodiversityGenConfig {
    /// Years that may be requested.
    pub horizon: Horizon,
}

/// Generates biodiversity impact datasets.
pub struct BiodiversityGenerator {
    config: BiodiversityGenConfig,
}

impl BiodiversityGenerator {
    /// Creates a new generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: BiodiversityGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: BiodiversityGenConfig) -> Self {
        Self { config }
    }

    /// Generates biodiversity statistics for `region`.
    ///
    /// The year range only tags the output; it does not change the
    /// distributions.
    pub fn generate(
        &self,
        region: &str,
        range: YearRange,
        rng: &mut impl Rng,
    ) -> Result<BiodiversityDataset, GenerationError> {
        self.config.horizon.check(range)?;
        let resolved = profiles::resolve(region);
        let profile = resolved.profile;
        let baseline = profile.species;

        let species_at_risk = scaled_count(baseline.total_species, 0.05, 0.2, rng);
        let species_change = (species_at_risk as f64 * rng.gen_range(-0.1..0.2)) as i32;
        let risk_score = rng.gen_range(20.0..80.0) as u8;

        let species_distribution = Taxon::ALL
            .iter()
            .map(|&taxon| {
                let count = baseline.count(taxon);
                let (low, high) = taxon.at_risk_range();
                SpeciesDistribution {
                    category: taxon,
                    count,
                    at_risk: scaled_count(count, low, high, rng),
                }
            })
            .collect();

        let risk_distribution = Self::generate_risk_distribution(rng);

        let top_affected_species = profile
            .flagship_species
            .iter()
            .map(|name| Self::generate_affected_species(name, rng))
            .collect();

        debug!(
            region = profile.name,
            species_at_risk, risk_score, "Generated biodiversity dataset"
        );

        Ok(BiodiversityDataset {
            region: profile.name.to_string(),
            region_fallback: resolved.fallback,
            year_range: range,
            total_species: baseline.total_species,
            endemic_percent: baseline.endemic_percent,
            species_at_risk,
            species_change,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score as u32),
            species_distribution,
            risk_distribution,
            top_affected_species,
        })
    }

    /// Draws the three shares and rescales them to sum to 100.
    fn generate_risk_distribution(rng: &mut impl Rng) -> Vec<RiskShare> {
        let mut raw: Vec<f64> = RISK_SHARE_RANGES
            .iter()
            .map(|&(_, low, high)| rng.gen_range(low..high))
            .collect();
        normalize_to_percent(&mut raw);

        RISK_SHARE_RANGES
            .iter()
            .zip(raw)
            .map(|(&(level, _, _), percentage)| RiskShare { level, percentage })
            .collect()
    }

    fn generate_affected_species(name: &str, rng: &mut impl Rng) -> AffectedSpecies {
        let statuses = ConservationStatus::ALL;
        AffectedSpecies {
            name: name.to_string(),
            status: statuses[rng.gen_range(0..statuses.len())],
            habitat_loss_percent: rng.gen_range(30..85),
            population_decline: rng.gen_range(30..90),
            risk_level: rng.gen_range(40..95),
        }
    }
}

impl Default for BiodiversityGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn full_range() -> YearRange {
        YearRange::new(2015, 2020).unwrap()
    }

    #[test]
    fn test_counts_within_bounds() {
        let generator = BiodiversityGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(21);

        for _ in 0..50 {
            let data = generator.generate("Amazon", full_range(), &mut rng).unwrap();

            assert!((2_000..8_000).contains(&data.species_at_risk));
            let at_risk = data.species_at_risk as i32;
            assert!(data.species_change >= -(at_risk / 10) - 1);
            assert!(data.species_change <= at_risk / 5);
            assert!((20..80).contains(&data.risk_score));
            assert_eq!(data.risk_level, RiskLevel::from_score(data.risk_score as u32));
        }
    }

    #[test]
    fn test_taxon_at_risk_ranges() {
        let generator = BiodiversityGenerator::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        let data = generator
            .generate("Southeast Asia", full_range(), &mut rng)
            .unwrap();

        assert_eq!(data.species_distribution.len(), 4);
        for entry in &data.species_distribution {
            let (low, high) = entry.category.at_risk_range();
            let count = entry.count as f64;
            assert!(entry.at_risk as f64 >= (count * low).floor());
            assert!(entry.at_risk as f64 <= count * high);
        }
        assert_eq!(data.species_distribution[0].category, Taxon::Mammals);
        assert_eq!(data.species_distribution[0].count, 350);
    }

    #[test]
    fn test_risk_distribution_sums_to_hundred() {
        let generator = BiodiversityGenerator::new();
        let mut rng = rand::thread_rng();

        for region in profiles::names() {
            let data = generator.generate(region, full_range(), &mut rng).unwrap();
            let total: f64 = data.risk_distribution.iter().map(|r| r.percentage).sum();
            assert!((total - 100.0).abs() < 1e-6, "{region}: {total}");

            let levels: Vec<_> = data.risk_distribution.iter().map(|r| r.level).collect();
            assert_eq!(levels, RiskLevel::ALL);
        }
    }

    #[test]
    fn test_flagship_roster_is_fixed() {
        let generator = BiodiversityGenerator::new();
        let mut rng = rand::thread_rng();
        let data = generator
            .generate("Central America", full_range(), &mut rng)
            .unwrap();

        let names: Vec<_> = data
            .top_affected_species
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "Resplendent Quetzal",
                "Spider Monkey",
                "Baird's Tapir",
                "Scarlet Macaw",
                "Golden Toad"
            ]
        );

        for species in &data.top_affected_species {
            assert!((30..85).contains(&species.habitat_loss_percent));
            assert!((30..90).contains(&species.population_decline));
            assert!((40..95).contains(&species.risk_level));
        }
    }

    #[test]
    fn test_status_serializes_with_spaces() {
        let json = serde_json::to_string(&ConservationStatus::CriticallyEndangered).unwrap();
        assert_eq!(json, "\"Critically Endangered\"");
    }
}
