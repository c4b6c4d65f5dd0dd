//! Fisher's exact (hypergeometric) enrichment test.

use std::collections::HashSet;

use statrs::distribution::{DiscreteCDF, Hypergeometric};

use ses_common::{AnnotationRecord, EnrichmentRow};

use super::fdr::fdr_correction;

/// One-sided (greater) hypergeometric p-value for observing at least `k`
/// annotated genes within the query.
///
/// Evaluated through the complementary draw: the probability that at most
/// `annotated - k` of the term's genes land outside the query, i.e. the CDF
/// of `Hypergeometric(population, annotated, population - drawn)` at
/// `annotated - k`.
///
/// * `k`: overlap between the query and the term's gene set
/// * `population`: total distinct genes in the background universe
/// * `annotated`: number of genes annotated with the term
/// * `drawn`: deduplicated query size
///
/// Vacuous inputs (a draw larger than the population, or `k > annotated`)
/// yield `1.0` rather than an error.
pub fn fisher_p(k: u64, population: u64, annotated: u64, drawn: u64) -> f64 {
    let (Some(complement), Some(misses)) =
        (population.checked_sub(drawn), annotated.checked_sub(k))
    else {
        return 1.0;
    };
    match Hypergeometric::new(population, annotated, complement) {
        Ok(dist) => dist.cdf(misses),
        Err(_) => 1.0,
    }
}

/// Run Fisher's exact test for every annotation term against the query.
///
/// The background population is the union of all record gene sets; the query
/// is deduplicated before the overlap calculation. Terms with no evidence of
/// enrichment (p = 1) are dropped and the remainder is sorted ascending by
/// p-value before q-values are attached.
///
/// `related_go_term_count` is the organism-wide GO term total. It feeds only
/// the FDR hypothesis count, not the hypergeometric denominators.
pub fn fisher(
    gene_names: &[String],
    go_terms: &[AnnotationRecord],
    related_go_term_count: u64,
    alpha: f64,
) -> Vec<EnrichmentRow> {
    let query: HashSet<&str> = gene_names.iter().map(String::as_str).collect();
    let drawn = query.len() as u64;

    let population = go_terms
        .iter()
        .flat_map(|r| r.gene_names.iter().map(String::as_str))
        .collect::<HashSet<&str>>()
        .len() as u64;

    let mut rows: Vec<EnrichmentRow> = go_terms
        .iter()
        .map(|record| {
            let matched: Vec<String> = record
                .gene_names
                .iter()
                .filter(|g| query.contains(g.as_str()))
                .cloned()
                .collect();
            let p_value = fisher_p(
                matched.len() as u64,
                population,
                record.gene_names.len() as u64,
                drawn,
            );
            EnrichmentRow {
                gene: record.display_label(),
                gene_names: matched,
                p_value,
                q_value: 1.0,
                rejected: false,
            }
        })
        .filter(|row| row.p_value < 1.0)
        .collect();

    rows.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));

    add_q_value(&mut rows, related_go_term_count, alpha);
    rows
}

/// Attach BH q-values and rejection flags.
///
/// The p-value vector is padded with 1.0 entries up to
/// `related_go_term_count` hypotheses so the correction carries the full
/// multiple-testing burden of the organism's GO universe, not just the
/// overlapping terms. Padding entries are discarded after correction. A
/// count smaller than the observed row count is clamped to zero padding.
fn add_q_value(rows: &mut [EnrichmentRow], related_go_term_count: u64, alpha: f64) {
    if rows.is_empty() {
        return;
    }
    let padding = (related_go_term_count as usize).saturating_sub(rows.len());
    let mut p_values: Vec<f64> = rows.iter().map(|r| r.p_value).collect();
    p_values.extend(std::iter::repeat(1.0).take(padding));

    let (rejected, q_values) = fdr_correction(&p_values, alpha);
    for (row, (rejected, q_value)) in rows.iter_mut().zip(rejected.into_iter().zip(q_values)) {
        row.rejected = rejected;
        row.q_value = q_value;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::stats::fdr::DEFAULT_FDR_ALPHA;

    const TOL: f64 = 1e-12;

    fn record(go_id: &str, go_term: &str, genes: &[&str]) -> AnnotationRecord {
        AnnotationRecord {
            go_id: go_id.to_string(),
            go_term: go_term.to_string(),
            go_label: vec!["BiologicalProcess".to_string()],
            gene_names: genes.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn query(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn known_p_value() {
        // P(X >= 2) for X ~ Hypergeom(M=5, n=3, N=2) is C(3,2)/C(5,2) = 0.3
        assert!((fisher_p(2, 5, 3, 2) - 0.3).abs() < TOL);
    }

    #[test]
    fn no_overlap_is_vacuous() {
        assert!((fisher_p(0, 5, 2, 2) - 1.0).abs() < TOL);
    }

    #[test]
    fn degenerate_draw_larger_than_population() {
        // More query genes than the whole universe; not an error.
        assert!((fisher_p(1, 3, 2, 10) - 1.0).abs() < TOL);
    }

    #[test]
    fn two_term_scenario_keeps_only_overlapping_term() {
        let universe = vec![
            record("GO:1", "term one", &["geneA", "geneB", "geneC"]),
            record("GO:2", "term two", &["geneD", "geneE"]),
        ];
        let rows = fisher(
            &query(&["geneA", "geneB"]),
            &universe,
            2,
            DEFAULT_FDR_ALPHA,
        );

        // GO:2 has k = 0 so p = 1 and it is filtered out.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].gene, "term one (GO:1)");
        assert_eq!(rows[0].gene_names, vec!["geneA", "geneB"]);
        assert!((rows[0].p_value - 0.3).abs() < TOL);
        // Padded family of 2 hypotheses: q = min(0.3 * 2 / 1, 1) = 0.6
        assert!((rows[0].q_value - 0.6).abs() < TOL);
        assert!(!rows[0].rejected);
    }

    #[test]
    fn duplicate_query_genes_are_deduplicated() {
        let universe = vec![
            record("GO:1", "term one", &["geneA", "geneB", "geneC"]),
            record("GO:2", "term two", &["geneD", "geneE"]),
        ];
        let deduped = fisher(&query(&["geneA", "geneB"]), &universe, 2, DEFAULT_FDR_ALPHA);
        let repeated = fisher(
            &query(&["geneA", "geneA", "geneB"]),
            &universe,
            2,
            DEFAULT_FDR_ALPHA,
        );
        assert_eq!(deduped, repeated);
    }

    #[test]
    fn padding_tightens_the_correction() {
        let universe = vec![
            record("GO:1", "term one", &["geneA", "geneB", "geneC"]),
            record("GO:2", "term two", &["geneA", "geneD", "geneE", "geneF"]),
        ];
        let q = query(&["geneA", "geneB"]);
        let unpadded = fisher(&q, &universe, 2, DEFAULT_FDR_ALPHA);
        let padded = fisher(&q, &universe, 50, DEFAULT_FDR_ALPHA);
        assert_eq!(unpadded.len(), padded.len());
        for (a, b) in unpadded.iter().zip(&padded) {
            assert!((a.p_value - b.p_value).abs() < TOL);
            assert!(b.q_value >= a.q_value);
        }
    }

    #[test]
    fn zero_padding_is_a_no_op() {
        // A term count equal to the surviving row count must reproduce the
        // plain, unpadded correction.
        let universe = vec![
            record("GO:1", "term one", &["geneA", "geneB", "geneC"]),
            record("GO:2", "term two", &["geneA", "geneD", "geneE", "geneF"]),
        ];
        let rows = fisher(&query(&["geneA", "geneB"]), &universe, 2, DEFAULT_FDR_ALPHA);
        assert_eq!(rows.len(), 2);

        let p_values: Vec<f64> = rows.iter().map(|r| r.p_value).collect();
        let (rejected, q_direct) = fdr_correction(&p_values, DEFAULT_FDR_ALPHA);
        for (i, row) in rows.iter().enumerate() {
            assert!((row.q_value - q_direct[i]).abs() < TOL);
            assert_eq!(row.rejected, rejected[i]);
        }
    }

    #[test]
    fn undersized_term_count_is_clamped() {
        let universe = vec![
            record("GO:1", "term one", &["geneA", "geneB"]),
            record("GO:2", "term two", &["geneA", "geneC"]),
        ];
        // related count below the observed row count must not panic and must
        // behave as zero padding
        let clamped = fisher(&query(&["geneA"]), &universe, 1, DEFAULT_FDR_ALPHA);
        let exact = fisher(&query(&["geneA"]), &universe, 2, DEFAULT_FDR_ALPHA);
        assert_eq!(clamped.len(), exact.len());
        for (a, b) in clamped.iter().zip(&exact) {
            assert!((a.q_value - b.q_value).abs() < TOL);
        }
    }

    #[test]
    fn deterministic_recomputation() {
        let universe = vec![
            record("GO:1", "term one", &["geneA", "geneB", "geneC"]),
            record("GO:2", "term two", &["geneB", "geneD"]),
            record("GO:3", "term three", &["geneA", "geneE", "geneF"]),
        ];
        let q = query(&["geneA", "geneB", "geneE"]);
        let first = serde_json::to_string(&fisher(&q, &universe, 20, DEFAULT_FDR_ALPHA)).unwrap();
        let second = serde_json::to_string(&fisher(&q, &universe, 20, DEFAULT_FDR_ALPHA)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rows_sorted_ascending_by_p_value() {
        let universe = vec![
            record("GO:1", "weak", &["geneA", "geneB", "geneC", "geneD"]),
            record("GO:2", "strong", &["geneA", "geneB"]),
            record("GO:3", "unrelated", &["geneE", "geneF"]),
        ];
        let rows = fisher(&query(&["geneA", "geneB"]), &universe, 10, DEFAULT_FDR_ALPHA);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].gene, "strong (GO:2)");
        for w in rows.windows(2) {
            assert!(w[0].p_value <= w[1].p_value);
        }
    }

    proptest! {
        #[test]
        fn p_value_bounds(population in 1u64..200, annotated_frac in 0.0f64..1.0, drawn_frac in 0.0f64..1.0, k_frac in 0.0f64..1.0) {
            let annotated = ((population as f64) * annotated_frac).ceil() as u64;
            let annotated = annotated.clamp(1, population);
            let drawn = ((population as f64) * drawn_frac).ceil() as u64;
            let drawn = drawn.clamp(1, population);
            let k_max = annotated.min(drawn);
            let k = ((k_max as f64) * k_frac).round() as u64;
            let p = fisher_p(k, population, annotated, drawn);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn p_value_non_increasing_in_k(population in 2u64..100, annotated in 1u64..50, drawn in 1u64..50) {
            let annotated = annotated.min(population);
            let drawn = drawn.min(population);
            let mut prev = f64::INFINITY;
            for k in 0..=annotated.min(drawn) {
                let p = fisher_p(k, population, annotated, drawn);
                prop_assert!(p <= prev + 1e-12);
                prev = p;
            }
        }
    }
}
