//! Graph query adapter.
//!
//! Read-only queries against the Neo4j property graph holding the GO
//! annotation data. The enrichment service never writes to the graph; the
//! adapter is a trait so tests can inject a double instead of a live driver.

use std::collections::BTreeSet;

use async_trait::async_trait;
use neo4rs::{query, Graph};

use ses_common::{AnnotationRecord, Result, SesError};

/// Read-only source of GO annotation background data.
#[async_trait]
pub trait GoAnnotationSource: Send + Sync {
    /// Every GO term associated with any gene of `gene_names` within the
    /// organism, each carrying the FULL set of organism genes annotated with
    /// that term, not just the overlapping ones: the full per-term counts
    /// feed the test denominators.
    ///
    /// An organism with no GO-annotated genes at all is a fatal
    /// [`SesError::DataIntegrity`]: it means ingestion is broken, not that
    /// there are no results.
    async fn go_terms_for_genes(
        &self,
        tax_id: &str,
        gene_names: &[String],
    ) -> Result<Vec<AnnotationRecord>>;

    /// Total distinct GO terms linked to any gene of the organism. Same
    /// not-found failure mode as [`Self::go_terms_for_genes`].
    async fn go_term_count(&self, tax_id: &str) -> Result<u64>;
}

const GO_TERMS_FOR_GENES: &str = "
    UNWIND $gene_names AS geneName
    MATCH (g:Gene)-[:HAS_TAXONOMY]-(t:Taxonomy {eid:$taxId})
    WHERE g.name=geneName
    WITH g MATCH (g)-[:GO_LINK]-(go)
    WITH DISTINCT go MATCH (go)-[:GO_LINK {tax_id:$taxId}]-(g2:Gene)
    WITH go, collect(DISTINCT g2) AS genes
    RETURN
        go.eid AS goId,
        go.name AS goTerm,
        [lbl IN labels(go) WHERE lbl <> 'db_GO'] AS goLabel,
        [g IN genes |g.name] AS geneNames
";

const GO_TERM_COUNT: &str = "
    MATCH (n:Gene)-[:HAS_TAXONOMY]-(t:Taxonomy {eid:$taxId})
    WITH n MATCH (n)-[:GO_LINK]-(go)
    WITH DISTINCT go
    RETURN count(go) AS go_count
";

fn graph_err<E: std::fmt::Display>(err: E) -> SesError {
    SesError::Graph(err.to_string())
}

/// [`GoAnnotationSource`] backed by a Neo4j bolt connection.
pub struct Neo4jGoSource {
    graph: Graph,
}

impl Neo4jGoSource {
    /// Connect to the graph database.
    pub async fn connect(uri: &str, user: &str, password: &str, db: &str) -> Result<Self> {
        let config = neo4rs::ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(db)
            .build()
            .map_err(graph_err)?;
        let graph = Graph::connect(config).await.map_err(graph_err)?;
        tracing::info!(uri, db, "Neo4j connection established");
        Ok(Self { graph })
    }

    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl GoAnnotationSource for Neo4jGoSource {
    async fn go_terms_for_genes(
        &self,
        tax_id: &str,
        gene_names: &[String],
    ) -> Result<Vec<AnnotationRecord>> {
        let q = query(GO_TERMS_FOR_GENES)
            .param("taxId", tax_id)
            .param("gene_names", gene_names.to_vec());

        let mut stream = self.graph.execute(q).await.map_err(graph_err)?;
        let mut records = Vec::new();
        while let Some(row) = stream.next().await.map_err(graph_err)? {
            let gene_names: Vec<String> = row.get("geneNames").map_err(graph_err)?;
            records.push(AnnotationRecord {
                go_id: row.get("goId").map_err(graph_err)?,
                go_term: row.get("goTerm").map_err(graph_err)?,
                go_label: row.get("goLabel").map_err(graph_err)?,
                gene_names: gene_names.into_iter().collect::<BTreeSet<String>>(),
            });
        }

        // Empty means the organism has no annotated genes at all; fail fast.
        if records.is_empty() {
            return Err(SesError::DataIntegrity(tax_id.to_string()));
        }
        tracing::debug!(tax_id, terms = records.len(), "Fetched GO terms from graph");
        Ok(records)
    }

    async fn go_term_count(&self, tax_id: &str) -> Result<u64> {
        let q = query(GO_TERM_COUNT).param("taxId", tax_id);

        let mut stream = self.graph.execute(q).await.map_err(graph_err)?;
        let row = stream
            .next()
            .await
            .map_err(graph_err)?
            .ok_or_else(|| SesError::DataIntegrity(tax_id.to_string()))?;
        let count: i64 = row.get("go_count").map_err(graph_err)?;
        Ok(count.max(0) as u64)
    }
}
