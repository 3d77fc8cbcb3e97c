//! HTTP API for the monitoring service.
//!
//! `api_router()` returns a composable `Router` with every route nested
//! under `/api/`; `server` binds it and manages its lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ServerError};
pub use types::ApiContext;
