//! GO enrichment feature.

pub mod routes;
pub mod service;

pub use routes::{enrichment_routes, EnrichGoRequest};
pub use service::EnrichmentService;
