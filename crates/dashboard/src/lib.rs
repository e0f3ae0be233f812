pub mod config;
pub mod errors;
pub mod handlers;
pub mod session;
pub mod types;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    config::DashboardConfig,
    handlers::{
        advance_timelapse, get_alerts, get_biodiversity, get_dashboard, get_deforestation,
        get_regions, get_session, get_timelapse, health_check, mark_alerts_read, toggle_theme,
        toggle_timelapse, update_filters,
    },
    session::SessionStore,
};

pub fn create_router(config: DashboardConfig) -> Router {
    let store = SessionStore::new(config.horizon);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        // Generated datasets
        .route("/api/regions", get(get_regions))
        .route("/api/deforestation", get(get_deforestation))
        .route("/api/biodiversity", get(get_biodiversity))
        .route("/api/alerts", get(get_alerts))
        .route("/api/alerts/read", post(mark_alerts_read))
        .route("/api/timelapse", get(get_timelapse))
        .route("/api/dashboard", get(get_dashboard))
        // Session state
        .route("/api/session", get(get_session))
        .route("/api/session/filters", put(update_filters))
        .route("/api/session/theme", post(toggle_theme))
        .route("/api/session/timelapse/toggle", post(toggle_timelapse))
        .route("/api/session/timelapse/advance", post(advance_timelapse))
        .layer(Extension(config))
        .layer(Extension(store))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

pub async fn run_server(config: DashboardConfig) -> anyhow::Result<()> {
    let port = config.port;
    let app = create_router(config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    tracing::info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
