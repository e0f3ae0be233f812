//! Per-service dashboard state: theme, filters, time-lapse playback, and
//! which alerts have been read.
//!
//! Generators never see this state. Handlers read the filters to fill in
//! missing query parameters and mutate the session through [`SessionStore`].

use std::collections::BTreeSet;
use std::sync::Arc;

use forest_data::{AlertThreshold, Horizon, MapLayers, YearRange};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Region selected when the service starts.
pub const DEFAULT_REGION: &str = "Amazon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub region: String,
    pub year_range: YearRange,
    pub threshold: AlertThreshold,
    #[serde(default)]
    pub layers: MapLayers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLapseState {
    pub selected_year: i32,
    pub playing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSession {
    pub theme: Theme,
    pub filters: Filters,
    pub timelapse: TimeLapseState,
    pub read_alerts: BTreeSet<Uuid>,
    /// Ids of the alert feed last served; only these can be marked read.
    #[serde(skip)]
    feed: BTreeSet<Uuid>,
}

impl DashboardSession {
    /// Light theme, Amazon over the whole horizon, medium threshold, paused
    /// on the first year.
    pub fn new(horizon: Horizon) -> Self {
        let year_range = horizon.full_range();
        Self {
            theme: Theme::default(),
            filters: Filters {
                region: DEFAULT_REGION.to_string(),
                year_range,
                threshold: AlertThreshold::default(),
                layers: MapLayers::default(),
            },
            timelapse: TimeLapseState {
                selected_year: year_range.start(),
                playing: false,
            },
            read_alerts: BTreeSet::new(),
            feed: BTreeSet::new(),
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Replaces the filters and keeps the selected year inside the new range.
    pub fn set_filters(&mut self, filters: Filters) {
        let range = filters.year_range;
        self.timelapse.selected_year = self
            .timelapse
            .selected_year
            .clamp(range.start(), range.end());
        debug!(region = %filters.region, range = %range, "Updated dashboard filters");
        self.filters = filters;
    }

    pub fn toggle_playback(&mut self) -> bool {
        self.timelapse.playing = !self.timelapse.playing;
        self.timelapse.playing
    }

    /// Steps to the next year, wrapping from the end of the range to its start.
    pub fn advance(&mut self) -> i32 {
        let range = self.filters.year_range;
        let next = self.timelapse.selected_year + 1;
        self.timelapse.selected_year = if next > range.end() || next < range.start() {
            range.start()
        } else {
            next
        };
        self.timelapse.selected_year
    }

    /// Records the alert feed just served.
    ///
    /// Read marks for alerts that are no longer in the feed are dropped, so
    /// the read set never outgrows one feed.
    pub fn replace_feed(&mut self, ids: impl IntoIterator<Item = Uuid>) {
        self.feed = ids.into_iter().collect();
        let feed = &self.feed;
        self.read_alerts.retain(|id| feed.contains(id));
    }

    /// Marks alerts of the current feed read and returns how many were not
    /// read before. Ids outside the feed are ignored.
    pub fn mark_read(&mut self, ids: impl IntoIterator<Item = Uuid>) -> usize {
        ids.into_iter()
            .filter(|id| self.feed.contains(id))
            .filter(|id| self.read_alerts.insert(*id))
            .count()
    }

    pub fn is_read(&self, id: &Uuid) -> bool {
        self.read_alerts.contains(id)
    }
}

/// Shared handle to the service's session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<DashboardSession>>,
}

impl SessionStore {
    pub fn new(horizon: Horizon) -> Self {
        Self {
            inner: Arc::new(RwLock::new(DashboardSession::new(horizon))),
        }
    }

    /// Copy of the current session.
    pub async fn snapshot(&self) -> DashboardSession {
        self.inner.read().await.clone()
    }

    /// Runs `f` against the session under the write lock.
    pub async fn update<R>(&self, f: impl FnOnce(&mut DashboardSession) -> R) -> R {
        let mut session = self.inner.write().await;
        f(&mut session)
    }
}
