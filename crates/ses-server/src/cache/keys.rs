//! Cache key construction.
//!
//! `GO_for_<organismId>` is written by the out-of-band background pre-warm
//! job; its spelling is an external contract and must not change. The
//! per-query keys are private to this service.

use sha2::{Digest, Sha256};

/// Key under which the full per-organism GO background is pre-warmed.
pub fn go_background_key(organism_id: &str) -> String {
    format!("GO_for_{organism_id}")
}

/// Key for the query-overlapping subset of GO terms.
pub fn go_terms_key(organism_id: &str, gene_names: &[String]) -> String {
    format!("go_terms_{organism_id}_{}", gene_list_digest(gene_names))
}

/// Key for the organism-wide GO term count.
pub fn go_term_count_key(organism_id: &str) -> String {
    format!("go_term_count_{organism_id}")
}

/// Digest of the gene list, order-sensitive like the list itself.
///
/// Names are length-prefixed before hashing so distinct lists can never
/// produce the same byte stream.
fn gene_list_digest(gene_names: &[String]) -> String {
    let mut hasher = Sha256::new();
    for name in gene_names {
        hasher.update((name.len() as u64).to_le_bytes());
        hasher.update(name.as_bytes());
    }
    hex::encode(hasher.finalize())
}
