//! Statistical test library.
//!
//! Pure, side-effect-free numeric functions behind the enrichment service:
//! the hypergeometric (Fisher) exact test, the binomial test, and
//! Benjamini-Hochberg FDR correction.

pub mod binomial;
pub mod fdr;
pub mod fisher;

pub use binomial::{binom_p, binomial};
pub use fdr::{fdr_correction, DEFAULT_FDR_ALPHA};
pub use fisher::{fisher, fisher_p};
