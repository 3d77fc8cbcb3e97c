//! API router.

use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router with all endpoints under `/api/`.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7), and
/// sibling routes must share the param name, hence `:id` throughout.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/vitals/:id",
            get(endpoints::vitals::history).post(endpoints::vitals::submit),
        )
        .route("/alerts", get(endpoints::alerts::recent))
        .route("/alerts/:id", get(endpoints::alerts::for_patient))
        .route(
            "/alerts/:id/acknowledge",
            patch(endpoints::alerts::acknowledge),
        )
        .route("/analytics/:id", get(endpoints::analytics::report))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
