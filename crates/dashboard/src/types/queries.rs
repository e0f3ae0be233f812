//! Query parameter types for API endpoints.

use serde::Deserialize;

/// Filters shared by the dataset endpoints.
///
/// Missing fields fall back to the session's filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetQuery {
    pub region: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    /// Low, Medium or High; anything else means Medium.
    pub threshold: Option<String>,
    pub seed: Option<u64>,
}

/// Time-lapse frame query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeLapseQuery {
    pub region: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub seed: Option<u64>,
    /// Defaults to the session's selected year.
    pub year: Option<i32>,
}

impl TimeLapseQuery {
    pub fn dataset_query(&self) -> DatasetQuery {
        DatasetQuery {
            region: self.region.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
            threshold: None,
            seed: self.seed,
        }
    }
}
