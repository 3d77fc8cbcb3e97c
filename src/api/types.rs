//! Shared types for the HTTP API layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::monitoring::MonitoringService;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<MonitoringService>,
}

impl ApiContext {
    pub fn new(service: Arc<MonitoringService>) -> Self {
        Self { service }
    }
}

/// `?limit=` on listing endpoints. Absent means the endpoint default.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// `?unacknowledged_only=` on the per-patient alert listing.
#[derive(Debug, Default, Deserialize)]
pub struct AlertFilterQuery {
    #[serde(default)]
    pub unacknowledged_only: bool,
}
