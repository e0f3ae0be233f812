//! Fluent builder for complete dashboard snapshots.
//!
//! The [`DashboardBuilder`] runs all three generators for one set of filters
//! and assembles the derived views the dashboard renders.

mod dashboard;

pub use dashboard::{DashboardBuilder, DashboardSnapshot, SnapshotMetrics};
