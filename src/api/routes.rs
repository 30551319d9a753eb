//! HTTP route handlers for Axum.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{error, info};

use crate::{
    api::types::{
        AnalyzeRequest, AnalyzeResponse, ExtractRequest, HealthComponents, HealthResponse,
        RetrainStatus, ScoreRequest,
    },
    error::AppError,
    nlp::{ExtractOutcome, ScoreInput, ScoreOutcome},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "ats-lens",
        version: env!("CARGO_PKG_VERSION"),
        components: HealthComponents {
            skills_engine: "ok",
            custom_model: if state.pipeline.has_custom_model() {
                "ok"
            } else {
                "not_loaded"
            },
        },
    })
}

pub async fn extract(
    State(state): State<AppState>,
    Json(payload): Json<ExtractRequest>,
) -> ApiResult<ExtractOutcome> {
    if let Some(file_name) = &payload.file_name {
        info!(file_name, "extract request");
    }
    let outcome = state.pipeline.extract(&payload.text)?;
    Ok(Json(outcome))
}

pub async fn score(
    State(state): State<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> ApiResult<ScoreOutcome> {
    let outcome = state.pipeline.score(&ScoreInput {
        resume_text: payload.resume_text,
        resume_skills: payload.resume_skills,
        job_description: payload.job_description,
        required_skills: payload.required_skills,
    })?;
    Ok(Json(outcome))
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> ApiResult<AnalyzeResponse> {
    if let Some(file_name) = &payload.file_name {
        info!(file_name, "analyze request");
    }
    let (extracted, score) = state.pipeline.analyze(
        &payload.text,
        payload.job_description.as_deref(),
        payload.required_skills,
    )?;
    Ok(Json(AnalyzeResponse { extracted, score }))
}

/// Kick off the bootstrap -> train -> hot-swap loop as a background job.
/// Returns 409 while a previous job is still running.
pub async fn retrain_start(State(state): State<AppState>) -> ApiResult<RetrainStatus> {
    {
        let mut status = state
            .retrain
            .write()
            .map_err(|_| AppError::Retrain("retrain status lock poisoned".into()))?;
        if matches!(*status, RetrainStatus::Running { .. }) {
            return Err(AppError::Conflict("retrain already running".into()));
        }
        *status = RetrainStatus::Running {
            started_at: Utc::now(),
        };
    }

    let pipeline = state.pipeline.clone();
    let retrain = state.retrain.clone();
    tokio::task::spawn_blocking(move || {
        let outcome = pipeline.retrain();
        let next = match outcome {
            Ok(report) => {
                info!(documents = report.documents, "retrain job finished");
                RetrainStatus::Completed {
                    finished_at: Utc::now(),
                    documents: report.documents,
                    heads: report.heads,
                }
            }
            Err(err) => {
                error!("retrain job failed: {err}");
                RetrainStatus::Failed {
                    failed_at: Utc::now(),
                    error: err.to_string(),
                }
            }
        };
        if let Ok(mut status) = retrain.write() {
            *status = next;
        }
    });

    let snapshot = state
        .retrain
        .read()
        .map_err(|_| AppError::Retrain("retrain status lock poisoned".into()))?
        .clone();
    Ok(Json(snapshot))
}

pub async fn retrain_status(State(state): State<AppState>) -> ApiResult<RetrainStatus> {
    let snapshot = state
        .retrain
        .read()
        .map_err(|_| AppError::Retrain("retrain status lock poisoned".into()))?
        .clone();
    Ok(Json(snapshot))
}
