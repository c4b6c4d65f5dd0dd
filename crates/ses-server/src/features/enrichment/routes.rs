//! Enrichment routes
//!
//! The single analysis endpoint exposed by this microservice. The gateway
//! forwards caller requests here verbatim.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use ses_common::{AnalysisMethod, EnrichmentRow, Organism};

use super::service::EnrichmentService;
use crate::error::AppError;

/// Request payload for the enrichment endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichGoRequest {
    pub gene_names: Vec<String>,
    /// Analysis method name; only "fisher" is wired.
    #[serde(default = "default_analysis")]
    pub analysis: String,
    pub organism: Organism,
}

fn default_analysis() -> String {
    "fisher".to_string()
}

/// Create enrichment routes
pub fn enrichment_routes() -> Router<Arc<EnrichmentService>> {
    Router::new().route("/enrich-with-go-terms", post(enrich_with_go_terms))
}

/// Run GO enrichment for a query gene list
///
/// POST /enrich-with-go-terms
async fn enrich_with_go_terms(
    State(service): State<Arc<EnrichmentService>>,
    Json(request): Json<EnrichGoRequest>,
) -> Result<Json<Vec<EnrichmentRow>>, AppError> {
    let method: AnalysisMethod = request.analysis.parse()?;
    let rows = service
        .enrich_go(&request.gene_names, method, &request.organism)
        .await?;
    Ok(Json(rows))
}
