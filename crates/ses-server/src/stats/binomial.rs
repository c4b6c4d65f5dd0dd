//! Binomial enrichment test.
//!
//! A with-replacement analogue of the Fisher path: each element of the query
//! list is one independent trial, and a trial succeeds when its gene is
//! annotated with the term under test. Repeated query entries count as
//! separate trials.

use std::collections::{HashMap, HashSet};

use statrs::distribution::{Binomial, DiscreteCDF};

use ses_common::{AnnotationRecord, BinomialRow, Result, SesError};

/// One-sided binomial survival p-value: probability of `x` or more
/// successes in `n` trials with per-trial success probability
/// `selected / total`. Equivalent to `1 - CDF(x - 1; n, selected/total)`.
///
/// The caller guarantees `total > 0`.
pub fn binom_p(x: u64, n: u64, selected: u64, total: u64) -> f64 {
    if x == 0 {
        return 1.0;
    }
    let p = selected as f64 / total as f64;
    match Binomial::new(p, n) {
        Ok(dist) => 1.0 - dist.cdf(x - 1),
        Err(_) => f64::NAN,
    }
}

/// Run the binomial test for every annotation term against the query.
///
/// The reported score is `-log10(p)` under the `p-value` field; no
/// multiple-testing correction is applied on this path. Rows are ordered by
/// GO id. An empty background universe is a domain error.
pub fn binomial(gene_names: &[String], go_terms: &[AnnotationRecord]) -> Result<Vec<BinomialRow>> {
    let total = go_terms
        .iter()
        .flat_map(|r| r.gene_names.iter().map(String::as_str))
        .collect::<HashSet<&str>>()
        .len() as u64;
    if total == 0 {
        return Err(SesError::EmptyBackground);
    }

    // One trial per query list element, repeats included.
    let trials = gene_names.len() as u64;
    let mut multiplicity: HashMap<&str, u64> = HashMap::new();
    for gene in gene_names {
        *multiplicity.entry(gene.as_str()).or_insert(0) += 1;
    }

    let mut rows: Vec<BinomialRow> = go_terms
        .iter()
        .map(|record| {
            let successes: u64 = record
                .gene_names
                .iter()
                .filter_map(|g| multiplicity.get(g.as_str()))
                .sum();
            let p = binom_p(successes, trials, record.gene_names.len() as u64, total);
            BinomialRow {
                gene: record.go_id.clone(),
                p_value: -p.log10(),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.gene.cmp(&b.gene));
    Ok(rows)
}
