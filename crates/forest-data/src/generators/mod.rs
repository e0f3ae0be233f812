//! Dataset generators.
//!
//! Each generator is independent of the others and draws all randomness
//! from the RNG passed to `generate`:
//! - [`DeforestationGenerator`]: loss series, hotspots, protected areas
//! - [`BiodiversityGenerator`]: species at risk and risk distribution
//! - [`AlertGenerator`]: recent alerts, newest first

pub mod alerts;
pub mod biodiversity;
pub mod deforestation;

pub use alerts::{Alert, AlertDataset, AlertGenConfig, AlertGenerator};
pub use biodiversity::{
    AffectedSpecies, BiodiversityDataset, BiodiversityGenConfig, BiodiversityGenerator,
    ConservationStatus, RiskShare, SpeciesDistribution,
};
pub use deforestation::{
    DeforestationDataset, DeforestationGenConfig, DeforestationGenerator, Driver, Hotspot,
    MonthlyLoss, ProtectedAreaSummary, YearSummary,
};
