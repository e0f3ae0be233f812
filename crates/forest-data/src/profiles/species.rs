//! Species baselines and per-taxon vulnerability.

use serde::{Deserialize, Serialize};

/// Known species counts for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesBaseline {
    pub total_species: u32,
    pub mammals: u32,
    pub birds: u32,
    pub amphibians: u32,
    pub plants: u32,
    pub endemic_percent: u32,
}

impl SpeciesBaseline {
    /// Species count for one taxon.
    pub fn count(&self, taxon: Taxon) -> u32 {
        match taxon {
            Taxon::Mammals => self.mammals,
            Taxon::Birds => self.birds,
            Taxon::Amphibians => self.amphibians,
            Taxon::Plants => self.plants,
        }
    }
}

/// Taxonomic groups tracked by the species distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Taxon {
    Mammals,
    Birds,
    Amphibians,
    Plants,
}

impl Taxon {
    pub const ALL: [Taxon; 4] = [Taxon::Mammals, Taxon::Birds, Taxon::Amphibians, Taxon::Plants];

    /// Range of the at-risk fraction for this taxon.
    ///
    /// Amphibians are the most sensitive to habitat loss, plants the least.
    pub fn at_risk_range(self) -> (f64, f64) {
        match self {
            Taxon::Mammals => (0.1, 0.3),
            Taxon::Birds => (0.05, 0.2),
            Taxon::Amphibians => (0.1, 0.4),
            Taxon::Plants => (0.05, 0.15),
        }
    }
}
