//! Synthetic deforestation, biodiversity, and alert data for the Forest
//! Guardian dashboard.
//!
//! Nothing here reads real data. Every dataset is drawn from per-region
//! distributions using the RNG the caller passes in, so a seeded RNG replays
//! the same output.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use forest_data::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let range = YearRange::new(2018, 2022)?;
//!
//! let loss = generate_deforestation("Amazon", range, &mut rng)?;
//! let species = generate_biodiversity("Amazon", range, &mut rng)?;
//! let alerts = generate_alerts("Amazon", AlertThreshold::High, OffsetDateTime::now_utc(), &mut rng);
//!
//! let frame = timelapse::frame(&loss, 2020)?;
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod generators;
pub mod metrics;
pub mod profiles;
pub mod sampling;
pub mod views;

use rand::Rng;
use time::OffsetDateTime;

pub use config::{AlertThreshold, Horizon, MapLayers, Severity, YearRange};
pub use error::GenerationError;
pub use generators::{AlertDataset, BiodiversityDataset, DeforestationDataset};
pub use views::timelapse;

/// Deforestation dataset for `region` over `range` with default settings.
pub fn generate_deforestation(
    region: &str,
    range: YearRange,
    rng: &mut impl Rng,
) -> Result<DeforestationDataset, GenerationError> {
    generators::DeforestationGenerator::new().generate(region, range, rng)
}

/// Biodiversity dataset for `region`; `range` only tags the output.
pub fn generate_biodiversity(
    region: &str,
    range: YearRange,
    rng: &mut impl Rng,
) -> Result<BiodiversityDataset, GenerationError> {
    generators::BiodiversityGenerator::new().generate(region, range, rng)
}

/// Alerts for `region` dated relative to `now`, newest first.
pub fn generate_alerts(
    region: &str,
    threshold: AlertThreshold,
    now: OffsetDateTime,
    rng: &mut impl Rng,
) -> AlertDataset {
    generators::AlertGenerator::new().generate(region, threshold, now, rng)
}

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{DashboardBuilder, DashboardSnapshot};
    pub use crate::config::{AlertThreshold, BoundingBox, Horizon, MapLayers, Severity, YearRange};
    pub use crate::error::GenerationError;
    pub use crate::generators::{
        AlertDataset, AlertGenerator, BiodiversityDataset, BiodiversityGenerator,
        DeforestationDataset, DeforestationGenerator,
    };
    pub use crate::metrics::{KeyMetrics, RiskLevel, percentage_change};
    pub use crate::profiles::{RegionProfile, Taxon};
    pub use crate::views::{self, timelapse};
    pub use crate::{generate_alerts, generate_biodiversity, generate_deforestation};
    pub use time::OffsetDateTime;
}
