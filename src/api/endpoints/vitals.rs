//! Vital sign submission and history.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, LimitQuery};
use crate::models::{ScoredReading, VitalReading};
use crate::monitoring::SubmissionOutcome;

/// `POST /api/vitals/:id`: score and store a reading, raising at most one alert.
pub async fn submit(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<VitalReading>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionOutcome>), ApiError> {
    let Path(patient_id) = path?;
    let Json(vitals) = payload?;

    // Model inference is CPU work; keep it off the async workers.
    let service = ctx.service.clone();
    let outcome =
        tokio::task::spawn_blocking(move || service.submit_vitals(&patient_id, vitals)).await??;

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// `GET /api/vitals/:id?limit=`: most recent readings, newest first.
pub async fn history(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<ScoredReading>>, ApiError> {
    let Path(patient_id) = path?;
    let Query(query) = query?;
    let readings = ctx.service.vital_history(&patient_id, query.limit)?;
    Ok(Json(readings))
}
