pub mod handlers;
pub mod types;

use crate::{
    Result,
    catalog::Catalog,
    classifier::Classifier,
    config::Config,
    history::HistoryRing,
    prediction::PredictionService,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Builds catalog, classifier and history once; shared by every request.
pub fn build_state(config: &Config) -> Result<AppState> {
    let catalog = match &config.model.labels_path {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin(),
    };

    let classifier = Classifier::load(&config.model, catalog.len());
    info!(
        "Classifier ready in {} mode with {} classes",
        classifier.mode(),
        catalog.len()
    );

    let history = HistoryRing::new(config.history.capacity);
    let service = PredictionService::new(Arc::new(catalog), Arc::new(classifier), Arc::new(history));

    Ok(AppState {
        service: Arc::new(service),
    })
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/predict", get(handlers::status).post(handlers::predict))
        .route("/api/history", get(handlers::history))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = build_state(&config)?;
    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
