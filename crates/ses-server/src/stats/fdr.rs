//! Multiple testing correction.
//!
//! Benjamini-Hochberg procedure (independent variant) controlling the false
//! discovery rate across a family of hypothesis tests.

/// Default FDR alpha used when no override is configured.
pub const DEFAULT_FDR_ALPHA: f64 = 0.05;

/// Benjamini-Hochberg FDR correction.
///
/// Returns `(rejected, q_values)` in the same order as the input. A null
/// hypothesis is rejected when its p-value is at or below
/// `alpha * rank / m` on the ascending-sorted vector; all hypotheses up to
/// the last rejected rank are rejected with it. Adjusted p-values are
/// `p * m / rank` with a right-to-left monotone minimum, clamped to 1.
pub fn fdr_correction(p_values: &[f64], alpha: f64) -> (Vec<bool>, Vec<f64>) {
    let m = p_values.len();
    if m == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let m_f = m as f64;

    let mut rejected_sorted = vec![false; m];
    let mut last_rejected = None;
    for (rank, &idx) in order.iter().enumerate() {
        if p_values[idx] <= alpha * (rank + 1) as f64 / m_f {
            last_rejected = Some(rank);
        }
    }
    if let Some(last) = last_rejected {
        for flag in rejected_sorted.iter_mut().take(last + 1) {
            *flag = true;
        }
    }

    let mut q_sorted: Vec<f64> = order
        .iter()
        .enumerate()
        .map(|(rank, &idx)| p_values[idx] * m_f / (rank + 1) as f64)
        .collect();
    let mut running = f64::INFINITY;
    for q in q_sorted.iter_mut().rev() {
        running = running.min(*q);
        *q = running.min(1.0);
    }

    let mut rejected = vec![false; m];
    let mut q_values = vec![0.0; m];
    for (rank, &idx) in order.iter().enumerate() {
        rejected[idx] = rejected_sorted[rank];
        q_values[idx] = q_sorted[rank];
    }
    (rejected, q_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn known_q_values() {
        // Classic BH example: sorted p = [0.005, 0.01, 0.03, 0.04],
        // raw adjusted = [0.02, 0.02, 0.04, 0.04] after monotone pass.
        let p = [0.01, 0.04, 0.03, 0.005];
        let (rejected, q) = fdr_correction(&p, DEFAULT_FDR_ALPHA);
        assert!((q[0] - 0.02).abs() < TOL);
        assert!((q[1] - 0.04).abs() < TOL);
        assert!((q[2] - 0.04).abs() < TOL);
        assert!((q[3] - 0.02).abs() < TOL);
        // All four pass their rank threshold at alpha = 0.05.
        assert_eq!(rejected, vec![true; 4]);
    }

    #[test]
    fn q_values_monotone_in_p() {
        let p = [0.1, 0.001, 0.05, 0.01, 0.5];
        let (_, q) = fdr_correction(&p, DEFAULT_FDR_ALPHA);
        let mut pairs: Vec<(f64, f64)> = p.iter().copied().zip(q.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        for w in pairs.windows(2) {
            assert!(w[1].1 >= w[0].1 - TOL);
        }
    }

    #[test]
    fn rejection_backfills_to_last_passing_rank() {
        // Sorted: [0.01, 0.02, 0.03]; thresholds at alpha 0.05 are
        // [0.0166, 0.0333, 0.05]. All ranks pass, so all are rejected even
        // though 0.02 alone would fail a plain alpha/m cutoff.
        let p = [0.03, 0.01, 0.02];
        let (rejected, _) = fdr_correction(&p, 0.05);
        assert_eq!(rejected, vec![true, true, true]);
    }

    #[test]
    fn nothing_rejected_at_tiny_alpha() {
        let p = [0.2, 0.4, 0.9];
        let (rejected, q) = fdr_correction(&p, 1e-6);
        assert_eq!(rejected, vec![false, false, false]);
        assert!(q.iter().all(|&v| v <= 1.0));
    }

    #[test]
    fn q_values_clamped_to_one() {
        let p = [0.9, 0.95, 1.0];
        let (_, q) = fdr_correction(&p, DEFAULT_FDR_ALPHA);
        assert!(q.iter().all(|&v| v <= 1.0));
    }

    #[test]
    fn empty_input() {
        let (rejected, q) = fdr_correction(&[], DEFAULT_FDR_ALPHA);
        assert!(rejected.is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn single_p_value_unchanged() {
        let (_, q) = fdr_correction(&[0.05], DEFAULT_FDR_ALPHA);
        assert!((q[0] - 0.05).abs() < TOL);
    }
}
