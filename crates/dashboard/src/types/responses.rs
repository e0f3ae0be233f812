//! Response types for API endpoints.

use forest_data::generators::Alert;
use forest_data::profiles::RegionProfile;
use forest_data::views::TimeLapseFrame;
use forest_data::{AlertDataset, AlertThreshold};
use serde::Serialize;
use time::OffsetDateTime;

use crate::session::DashboardSession;

/// A generated dataset together with the seed that reproduces it.
#[derive(Debug, Serialize)]
pub struct SeededResponse<T> {
    pub seed: u64,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct TimeLapseResponse {
    pub seed: u64,
    pub frame: TimeLapseFrame,
}

#[derive(Debug, Serialize)]
pub struct RegionSummary {
    pub name: &'static str,
    /// (lat, lon)
    pub center: (f64, f64),
    pub zoom: u8,
    pub base_alerts: u32,
}

impl From<&RegionProfile> for RegionSummary {
    fn from(profile: &RegionProfile) -> Self {
        Self {
            name: profile.name,
            center: profile.center,
            zoom: profile.zoom,
            base_alerts: profile.base_alerts,
        }
    }
}

/// An alert with its read state in the current session.
#[derive(Debug, Serialize)]
pub struct AlertEntry {
    #[serde(flatten)]
    pub alert: Alert,
    pub is_read: bool,
}

/// Alert list as the notification panel shows it.
#[derive(Debug, Serialize)]
pub struct AlertFeed {
    pub region: String,
    pub region_fallback: bool,
    pub threshold: AlertThreshold,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub new_alerts_count: usize,
    pub unread_count: usize,
    pub alerts: Vec<AlertEntry>,
}

impl AlertFeed {
    pub fn new(dataset: AlertDataset, session: &DashboardSession) -> Self {
        let alerts: Vec<AlertEntry> = dataset
            .alerts
            .into_iter()
            .map(|alert| AlertEntry {
                is_read: session.is_read(&alert.id),
                alert,
            })
            .collect();

        Self {
            region: dataset.region,
            region_fallback: dataset.region_fallback,
            threshold: dataset.threshold,
            generated_at: dataset.generated_at,
            new_alerts_count: dataset.new_alerts_count,
            unread_count: alerts.iter().filter(|entry| !entry.is_read).count(),
            alerts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    /// Ids that were not read before this request.
    pub marked: usize,
    pub total_read: usize,
}
