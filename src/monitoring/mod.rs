//! Monitoring pipeline: score, persist, alert, and serve history.

pub mod service;
pub mod store;

pub use service::{MonitoringService, ServiceError, SubmissionOutcome};
pub use store::{MemoryStore, StoreError, VitalsStore};
