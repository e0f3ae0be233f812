//! Request body types for API endpoints.

use forest_data::{AlertThreshold, MapLayers};
use serde::Deserialize;
use uuid::Uuid;

/// Partial filter update; omitted fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFiltersRequest {
    pub region: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub threshold: Option<AlertThreshold>,
    pub layers: Option<MapLayers>,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub ids: Vec<Uuid>,
}
