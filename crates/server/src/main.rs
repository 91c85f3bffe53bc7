use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use catalogue::Catalogue;
use serde_json::Value;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{projects_route, root_route, LIVENESS_MESSAGE},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let catalogue = Catalogue::load(&settings.dataset_path).map_err(|error| {
        error!(
            path = %settings.dataset_path.display(),
            %error,
            "failed to load project catalogue; set PROJECTS_FILE to the dataset location"
        );
        error
    })?;
    info!(
        path = %settings.dataset_path.display(),
        projects = catalogue.len(),
        "project catalogue loaded"
    );

    let app = build_router(Arc::new(AppState { catalogue }));

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD]);

    Router::new()
        .route(root_route(), get(root))
        .route(projects_route(), get(list_projects))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// Serves the dataset as loaded; records are not validated or reshaped.
async fn list_projects(State(state): State<Arc<AppState>>) -> Json<Vec<Value>> {
    Json(state.catalogue.records().to_vec())
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(
            ErrorCode::NotFound,
            format!("no route for {}", uri.path()),
        )),
    )
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
