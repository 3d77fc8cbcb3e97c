//! Trend analytics endpoint.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::trends::TrendReport;

/// `GET /api/analytics/:id`: trend report over the recent window.
pub async fn report(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TrendReport>, ApiError> {
    let Path(patient_id) = path?;
    let service = ctx.service.clone();
    let report = tokio::task::spawn_blocking(move || service.analytics(&patient_id)).await??;
    Ok(Json(report))
}
