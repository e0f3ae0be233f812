//! Static region profiles.
//!
//! Every generator starts by resolving a region name to one of these profiles.
//! The table is read-only and shared by all callers; names that do not match
//! a profile resolve to [`GLOBAL`].

mod species;

pub use species::{SpeciesBaseline, Taxon};

use serde::Serialize;
use tracing::warn;

use crate::config::BoundingBox;

/// Name of the aggregate profile used for unknown regions.
pub const GLOBAL: &str = "Global";

/// Per-region constants driving the synthetic distributions.
#[derive(Debug, Clone, Serialize)]
pub struct RegionProfile {
    pub name: &'static str,
    /// Annual forest loss in hectares before trend and noise.
    pub base_loss_rate: f64,
    /// (lat, lon)
    pub center: (f64, f64),
    /// Half-extent of the sampling box in degrees, (lat, lon).
    pub spread: (f64, f64),
    pub species: SpeciesBaseline,
    pub flagship_species: [&'static str; 5],
    pub base_alerts: u32,
    /// Months (1-12) with elevated clearing.
    pub dry_season: &'static [u32],
    /// Initial zoom level for map viewports.
    pub zoom: u8,
}

impl RegionProfile {
    /// Box that hotspot and alert coordinates are drawn from.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::around(self.center, self.spread)
    }

    pub fn is_dry_season(&self, month: u32) -> bool {
        self.dry_season.contains(&month)
    }
}

pub static REGIONS: [RegionProfile; 5] = [
    RegionProfile {
        name: "Amazon",
        base_loss_rate: 2_000_000.0,
        center: (-5.0, -60.0),
        spread: (12.0, 8.0),
        species: SpeciesBaseline {
            total_species: 40_000,
            mammals: 430,
            birds: 1_300,
            amphibians: 1_000,
            plants: 30_000,
            endemic_percent: 30,
        },
        flagship_species: [
            "Jaguar",
            "Uakari Monkey",
            "Poison Dart Frog",
            "Harpy Eagle",
            "Giant Otter",
        ],
        base_alerts: 15,
        dry_season: &[6, 7, 8, 9],
        zoom: 4,
    },
    RegionProfile {
        name: "Congo Basin",
        base_loss_rate: 1_500_000.0,
        center: (0.0, 20.0),
        spread: (10.0, 10.0),
        species: SpeciesBaseline {
            total_species: 20_000,
            mammals: 400,
            birds: 1_000,
            amphibians: 400,
            plants: 15_000,
            endemic_percent: 20,
        },
        flagship_species: [
            "Mountain Gorilla",
            "Forest Elephant",
            "Okapi",
            "Bonobo",
            "Congo Peacock",
        ],
        base_alerts: 12,
        dry_season: &[],
        zoom: 4,
    },
    RegionProfile {
        name: "Southeast Asia",
        base_loss_rate: 1_800_000.0,
        center: (5.0, 110.0),
        spread: (15.0, 15.0),
        species: SpeciesBaseline {
            total_species: 25_000,
            mammals: 350,
            birds: 1_200,
            amphibians: 600,
            plants: 18_000,
            endemic_percent: 25,
        },
        flagship_species: [
            "Orangutan",
            "Sumatran Tiger",
            "Asian Elephant",
            "Sunda Pangolin",
            "Bornean Clouded Leopard",
        ],
        base_alerts: 18,
        dry_season: &[1, 2, 3],
        zoom: 4,
    },
    RegionProfile {
        name: "Central America",
        base_loss_rate: 900_000.0,
        center: (15.0, -85.0),
        spread: (5.0, 10.0),
        species: SpeciesBaseline {
            total_species: 18_000,
            mammals: 250,
            birds: 900,
            amphibians: 500,
            plants: 12_000,
            endemic_percent: 15,
        },
        flagship_species: [
            "Resplendent Quetzal",
            "Spider Monkey",
            "Baird's Tapir",
            "Scarlet Macaw",
            "Golden Toad",
        ],
        base_alerts: 8,
        dry_season: &[],
        zoom: 4,
    },
    RegionProfile {
        name: GLOBAL,
        base_loss_rate: 5_000_000.0,
        center: (0.0, 0.0),
        spread: (60.0, 180.0),
        species: SpeciesBaseline {
            total_species: 100_000,
            mammals: 1_000,
            birds: 5_000,
            amphibians: 2_000,
            plants: 80_000,
            endemic_percent: 10,
        },
        flagship_species: [
            "Tiger",
            "Rhinoceros",
            "Orangutan",
            "Mountain Gorilla",
            "Polar Bear",
        ],
        base_alerts: 30,
        dry_season: &[],
        zoom: 2,
    },
];

/// A region lookup result.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRegion {
    pub profile: &'static RegionProfile,
    /// True when the requested name was unknown and Global was substituted.
    pub fallback: bool,
}

/// Finds the profile with exactly this name.
pub fn lookup(name: &str) -> Option<&'static RegionProfile> {
    REGIONS.iter().find(|profile| profile.name == name)
}

/// The aggregate profile.
pub fn global() -> &'static RegionProfile {
    &REGIONS[REGIONS.len() - 1]
}

/// Resolves a region name, substituting Global for unknown names.
pub fn resolve(name: &str) -> ResolvedRegion {
    match lookup(name) {
        Some(profile) => ResolvedRegion {
            profile,
            fallback: false,
        },
        None => {
            warn!("Unknown region {name:?}, falling back to {GLOBAL}");
            ResolvedRegion {
                profile: global(),
                fallback: true,
            }
        }
    }
}

/// Names of all profiles in display order.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|profile| profile.name)
}
