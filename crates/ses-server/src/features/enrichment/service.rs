//! Enrichment visualisation service.
//!
//! Orchestrates the cache layer, the graph query adapter and the statistical
//! test library: resolve (or fetch-and-cache) the GO background for an
//! organism, run the requested test against the query gene list, and return
//! the ranked result rows.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use ses_common::{
    AnalysisMethod, AnnotationRecord, AnnotationUniverse, EnrichmentRow, Organism, Result,
    SesError,
};

use crate::cache::{self, Cache};
use crate::graph::GoAnnotationSource;
use crate::stats;

/// GO enrichment over an externally stored annotation background.
///
/// The graph and cache clients are injected at construction (no module-level
/// singletons), so tests can substitute doubles and the binary controls the
/// connection lifecycle.
pub struct EnrichmentService {
    graph: Arc<dyn GoAnnotationSource>,
    cache: Arc<dyn Cache>,
    cache_ttl: Duration,
    fdr_alpha: f64,
}

impl EnrichmentService {
    pub fn new(
        graph: Arc<dyn GoAnnotationSource>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
        fdr_alpha: f64,
    ) -> Self {
        Self {
            graph,
            cache,
            cache_ttl,
            fdr_alpha,
        }
    }

    /// Run GO enrichment for a query gene list.
    ///
    /// Only [`AnalysisMethod::Fisher`] is wired to this entry point; the
    /// binomial test lives in the stats library but has no caller here.
    #[tracing::instrument(skip(self, gene_names), fields(organism = %organism.id, genes = gene_names.len()))]
    pub async fn enrich_go(
        &self,
        gene_names: &[String],
        method: AnalysisMethod,
        organism: &Organism,
    ) -> Result<Vec<EnrichmentRow>> {
        if gene_names.is_empty() {
            return Err(SesError::Validation(
                "geneNames must not be empty".to_string(),
            ));
        }
        match method {
            AnalysisMethod::Fisher => {
                let universe = self.resolve_background(organism, gene_names).await?;
                Ok(stats::fisher(
                    gene_names,
                    &universe.records,
                    universe.total_go_term_count,
                    self.fdr_alpha,
                ))
            }
            AnalysisMethod::Binomial => Err(SesError::UnsupportedMethod(method.to_string())),
        }
    }

    /// Resolve the annotation background for one enrichment call.
    ///
    /// Two sources with different `total_go_term_count` semantics: a
    /// pre-warmed full background reports its own row count, while the cold
    /// path pairs the query-overlapping subset with the independently
    /// fetched organism-wide count. The mismatch is inherited behavior;
    /// keeping both paths in this one function keeps it visible, and a
    /// future correction is a one-line change here.
    async fn resolve_background(
        &self,
        organism: &Organism,
        gene_names: &[String],
    ) -> Result<AnnotationUniverse> {
        let background_key = cache::go_background_key(&organism.id);
        let prewarmed =
            cache::get_json::<Vec<AnnotationRecord>, _>(self.cache.as_ref(), &background_key)
                .await;
        if let Some(records) = prewarmed {
            let total_go_term_count = records.len() as u64;
            let query: HashSet<&str> = gene_names.iter().map(String::as_str).collect();
            let records: Vec<AnnotationRecord> = records
                .into_iter()
                .filter(|record| record.intersects(&query))
                .collect();
            tracing::debug!(
                organism = %organism.id,
                overlapping = records.len(),
                total = total_go_term_count,
                "Using pre-warmed GO background"
            );
            return Ok(AnnotationUniverse {
                records,
                total_go_term_count,
            });
        }

        let records = cache::cached(
            self.cache.as_ref(),
            &cache::go_terms_key(&organism.id, gene_names),
            self.cache_ttl,
            || async { self.graph.go_terms_for_genes(&organism.id, gene_names).await },
        )
        .await?;
        let total_go_term_count = cache::cached(
            self.cache.as_ref(),
            &cache::go_term_count_key(&organism.id),
            self.cache_ttl,
            || async { self.graph.go_term_count(&organism.id).await },
        )
        .await?;
        Ok(AnnotationUniverse {
            records,
            total_go_term_count,
        })
    }
}
