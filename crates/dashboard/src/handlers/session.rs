//! Session state handlers.

use axum::{Extension, response::Json};
use forest_data::YearRange;
use tracing::info;

use crate::{
    config::DashboardConfig,
    errors::AppError,
    session::{DashboardSession, Filters, SessionStore},
    types::{MarkReadRequest, MarkReadResponse, UpdateFiltersRequest},
};

pub async fn get_session(Extension(store): Extension<SessionStore>) -> Json<DashboardSession> {
    Json(store.snapshot().await)
}

/// Applies a partial filter update and returns the new session.
pub async fn update_filters(
    Extension(config): Extension<DashboardConfig>,
    Extension(store): Extension<SessionStore>,
    Json(request): Json<UpdateFiltersRequest>,
) -> Result<Json<DashboardSession>, AppError> {
    if request
        .region
        .as_deref()
        .is_some_and(|region| region.trim().is_empty())
    {
        return Err(AppError::InvalidInput("region must not be empty".to_string()));
    }

    let session = store
        .update(|session| {
            let current = &session.filters;
            let year_range = YearRange::new(
                request.start_year.unwrap_or(current.year_range.start()),
                request.end_year.unwrap_or(current.year_range.end()),
            )?;
            config.horizon.check(year_range)?;

            let filters = Filters {
                region: request.region.unwrap_or_else(|| current.region.clone()),
                year_range,
                threshold: request.threshold.unwrap_or(current.threshold),
                layers: request.layers.unwrap_or(current.layers),
            };
            session.set_filters(filters);
            Ok::<_, AppError>(session.clone())
        })
        .await?;

    Ok(Json(session))
}

pub async fn toggle_theme(Extension(store): Extension<SessionStore>) -> Json<DashboardSession> {
    let session = store
        .update(|session| {
            session.toggle_theme();
            session.clone()
        })
        .await;
    Json(session)
}

pub async fn toggle_timelapse(
    Extension(store): Extension<SessionStore>,
) -> Json<DashboardSession> {
    let session = store
        .update(|session| {
            session.toggle_playback();
            session.clone()
        })
        .await;
    Json(session)
}

/// Steps the time-lapse forward one year, wrapping at the end of the range.
pub async fn advance_timelapse(
    Extension(store): Extension<SessionStore>,
) -> Json<DashboardSession> {
    let session = store
        .update(|session| {
            session.advance();
            session.clone()
        })
        .await;
    Json(session)
}

pub async fn mark_alerts_read(
    Extension(store): Extension<SessionStore>,
    Json(request): Json<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>, AppError> {
    if request.ids.is_empty() {
        return Err(AppError::InvalidInput("ids must not be empty".to_string()));
    }

    let response = store
        .update(|session| MarkReadResponse {
            marked: session.mark_read(request.ids),
            total_read: session.read_alerts.len(),
        })
        .await;

    info!(marked = response.marked, "Marked alerts read");
    Ok(Json(response))
}
