//! Alert listing and acknowledgement.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{AlertFilterQuery, ApiContext, LimitQuery};
use crate::models::Alert;

/// `GET /api/alerts/:id?unacknowledged_only=`: one patient's alerts.
pub async fn for_patient(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<AlertFilterQuery>, QueryRejection>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let Path(patient_id) = path?;
    let Query(filter) = query?;
    let alerts = ctx
        .service
        .patient_alerts(&patient_id, filter.unacknowledged_only)?;
    Ok(Json(alerts))
}

/// `GET /api/alerts?limit=`: most recent alerts across all patients.
pub async fn recent(
    State(ctx): State<ApiContext>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(ctx.service.recent_alerts(query.limit)?))
}

/// `PATCH /api/alerts/:id/acknowledge`
pub async fn acknowledge(
    State(ctx): State<ApiContext>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Alert>, ApiError> {
    let Path(alert_id) = path?;
    Ok(Json(ctx.service.acknowledge_alert(&alert_id)?))
}
