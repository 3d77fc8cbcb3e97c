//! API endpoint handlers. Each module maps onto one resource.

pub mod alerts;
pub mod analytics;
pub mod health;
pub mod vitals;
