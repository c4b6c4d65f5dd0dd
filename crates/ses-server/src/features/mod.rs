//! Feature modules implementing the enrichment API
//!
//! Each feature is a vertical slice with its own service and routes. There
//! is currently one: GO enrichment.

pub mod enrichment;

use std::sync::Arc;

use axum::Router;

use enrichment::EnrichmentService;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub enrichment: Arc<EnrichmentService>,
}

/// Creates the main API router with all feature routes mounted
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().merge(enrichment::enrichment_routes().with_state(state.enrichment))
}
