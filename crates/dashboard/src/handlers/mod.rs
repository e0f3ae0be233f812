//! HTTP request handlers for the dashboard API.

pub mod datasets;
pub mod health;
pub mod session;

pub use datasets::{
    get_alerts, get_biodiversity, get_dashboard, get_deforestation, get_regions, get_timelapse,
};
pub use health::health_check;
pub use session::{
    advance_timelapse, get_session, mark_alerts_read, toggle_theme, toggle_timelapse,
    update_filters,
};
