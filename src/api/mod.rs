//! HTTP layer exposing the analysis pipeline.

pub mod routes;
pub mod types;

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::nlp::Pipeline;

use self::types::RetrainStatus;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub retrain: Arc<RwLock<RetrainStatus>>,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            retrain: Arc::new(RwLock::new(RetrainStatus::Idle)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/nlp/extract", post(routes::extract))
        .route("/nlp/score", post(routes::score))
        .route("/nlp/analyze", post(routes::analyze))
        .route("/nlp/retrain", post(routes::retrain_start))
        .route("/nlp/retrain/status", get(routes::retrain_status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(pipeline: Arc<Pipeline>, host: String, port: u16) -> Result<()> {
    let router = router(AppState::new(pipeline));

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving ats-lens API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
