//! Dataset, time-lapse, and full dashboard handlers.

use axum::{
    Extension,
    extract::Query,
    response::Json,
};
use forest_data::builders::{DashboardBuilder, DashboardSnapshot};
use forest_data::generators::{
    AlertGenerator, BiodiversityGenConfig, BiodiversityGenerator, DeforestationGenConfig,
    DeforestationGenerator,
};
use forest_data::profiles::REGIONS;
use forest_data::views;
use forest_data::{AlertThreshold, BiodiversityDataset, DeforestationDataset, YearRange};
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use tracing::{debug, error};

use crate::{
    config::DashboardConfig,
    errors::AppError,
    session::{DashboardSession, SessionStore},
    types::{
        AlertFeed, DatasetQuery, RegionSummary, SeededResponse, TimeLapseQuery, TimeLapseResponse,
    },
};

/// Query parameters merged with the session's filters.
#[derive(Debug, Clone)]
struct Selection {
    region: String,
    range: YearRange,
    threshold: AlertThreshold,
    seed: u64,
}

impl Selection {
    fn resolve(
        query: &DatasetQuery,
        session: &DashboardSession,
        config: &DashboardConfig,
    ) -> Result<Self, AppError> {
        let filters = &session.filters;
        let range = YearRange::new(
            query.start_year.unwrap_or(filters.year_range.start()),
            query.end_year.unwrap_or(filters.year_range.end()),
        )?;
        config.horizon.check(range)?;

        let threshold = query
            .threshold
            .as_deref()
            .map(AlertThreshold::parse_or_default)
            .unwrap_or(filters.threshold);

        Ok(Self {
            region: query.region.clone().unwrap_or_else(|| filters.region.clone()),
            range,
            threshold,
            seed: config.resolve_seed(query.seed),
        })
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

fn deforestation_for(
    selection: &Selection,
    config: &DashboardConfig,
) -> Result<DeforestationDataset, AppError> {
    let generator = DeforestationGenerator::with_config(DeforestationGenConfig {
        horizon: config.horizon,
        ..Default::default()
    });
    Ok(generator.generate(&selection.region, selection.range, &mut selection.rng())?)
}

/// List the known regions, Global last.
pub async fn get_regions() -> Json<Vec<RegionSummary>> {
    Json(REGIONS.iter().map(RegionSummary::from).collect())
}

pub async fn get_deforestation(
    Extension(config): Extension<DashboardConfig>,
    Extension(store): Extension<SessionStore>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<SeededResponse<DeforestationDataset>>, AppError> {
    let session = store.snapshot().await;
    let selection = Selection::resolve(&query, &session, &config)?;
    let data = deforestation_for(&selection, &config)?;

    debug!(seed = selection.seed, region = %data.region, "Served deforestation dataset");
    Ok(Json(SeededResponse {
        seed: selection.seed,
        data,
    }))
}

pub async fn get_biodiversity(
    Extension(config): Extension<DashboardConfig>,
    Extension(store): Extension<SessionStore>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<SeededResponse<BiodiversityDataset>>, AppError> {
    let session = store.snapshot().await;
    let selection = Selection::resolve(&query, &session, &config)?;

    let generator = BiodiversityGenerator::with_config(BiodiversityGenConfig {
        horizon: config.horizon,
    });
    let data = generator.generate(&selection.region, selection.range, &mut selection.rng())?;

    Ok(Json(SeededResponse {
        seed: selection.seed,
        data,
    }))
}

/// Alerts with each row's read state from the session.
pub async fn get_alerts(
    Extension(config): Extension<DashboardConfig>,
    Extension(store): Extension<SessionStore>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<SeededResponse<AlertFeed>>, AppError> {
    let session = store.snapshot().await;
    let selection = Selection::resolve(&query, &session, &config)?;

    let dataset = AlertGenerator::new().generate(
        &selection.region,
        selection.threshold,
        OffsetDateTime::now_utc(),
        &mut selection.rng(),
    );

    let feed = store
        .update(|session| {
            session.replace_feed(dataset.alerts.iter().map(|alert| alert.id));
            AlertFeed::new(dataset, session)
        })
        .await;

    Ok(Json(SeededResponse {
        seed: selection.seed,
        data: feed,
    }))
}

/// One time-lapse frame.
///
/// Without `year` the session's selected year is used, or the first year of
/// the range when the selected year lies outside it.
pub async fn get_timelapse(
    Extension(config): Extension<DashboardConfig>,
    Extension(store): Extension<SessionStore>,
    Query(query): Query<TimeLapseQuery>,
) -> Result<Json<TimeLapseResponse>, AppError> {
    let session = store.snapshot().await;
    let selection = Selection::resolve(&query.dataset_query(), &session, &config)?;

    let year = query.year.unwrap_or_else(|| {
        let selected = session.timelapse.selected_year;
        if selection.range.contains(selected) {
            selected
        } else {
            selection.range.start()
        }
    });

    let dataset = deforestation_for(&selection, &config)?;
    let frame = views::frame(&dataset, year)?;

    Ok(Json(TimeLapseResponse {
        seed: selection.seed,
        frame,
    }))
}

/// Everything the dashboard page shows, built in one pass.
pub async fn get_dashboard(
    Extension(config): Extension<DashboardConfig>,
    Extension(store): Extension<SessionStore>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let session = store.snapshot().await;
    let selection = Selection::resolve(&query, &session, &config)?;

    let selected = session.timelapse.selected_year;
    let timelapse_year = if selection.range.contains(selected) {
        selected
    } else {
        selection.range.start()
    };

    let builder = DashboardBuilder::new()
        .with_region(selection.region)
        .with_year_range(selection.range)
        .with_threshold(selection.threshold)
        .with_layers(session.filters.layers)
        .with_timelapse_year(timelapse_year)
        .with_horizon(config.horizon)
        .with_seed(selection.seed)
        .with_metrics(true);

    let snapshot = tokio::task::spawn_blocking(move || builder.build())
        .await
        .map_err(|e| {
            error!("Dashboard build task failed: {e}");
            AppError::Internal
        })??;

    Ok(Json(snapshot))
}
