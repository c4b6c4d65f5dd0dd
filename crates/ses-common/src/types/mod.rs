//! Domain types shared between the enrichment service and its callers.

use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SesError;

/// An organism, identified by its taxonomy id.
///
/// The id is used verbatim in cache keys and as a graph query parameter, so
/// it must be stable across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Organism {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// One row of background data: a GO term together with the full set of genes
/// (within one organism) annotated with it.
///
/// `gene_names` is kept as an ordered set rather than the wire-level list:
/// annotation edges are unique per gene, and intersection output must be
/// deterministic across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRecord {
    pub go_id: String,
    pub go_term: String,
    pub go_label: Vec<String>,
    pub gene_names: BTreeSet<String>,
}

impl AnnotationRecord {
    /// Display label used in result rows, `"<goTerm> (<goId>)"`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.go_term, self.go_id)
    }

    /// True when at least one gene of `query` is annotated with this term.
    pub fn intersects(&self, query: &HashSet<&str>) -> bool {
        self.gene_names.iter().any(|g| query.contains(g.as_str()))
    }
}

/// The background annotation universe for one organism.
///
/// `total_go_term_count` is the number of distinct GO terms linked to any
/// annotated gene of the organism. It may exceed `records.len()` when the
/// records are a query-overlapping subset of the full background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationUniverse {
    pub records: Vec<AnnotationRecord>,
    pub total_go_term_count: u64,
}

/// One Fisher enrichment result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRow {
    /// Display label, `"<goTerm> (<goId>)"`.
    pub gene: String,
    /// Intersection of the query and the term's annotated genes.
    #[serde(rename = "geneNames")]
    pub gene_names: Vec<String>,
    #[serde(rename = "p-value")]
    pub p_value: f64,
    #[serde(rename = "q-value")]
    pub q_value: f64,
    /// Null hypothesis rejected at the configured FDR alpha.
    pub rejected: bool,
}

/// One binomial result row.
///
/// The `p-value` field holds `-log10(p)`, not the raw p-value. The spelling
/// is kept for caller compatibility even though the value is a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialRow {
    pub gene: String,
    #[serde(rename = "p-value")]
    pub p_value: f64,
}

/// Statistical analysis method requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    Fisher,
    Binomial,
}

impl FromStr for AnalysisMethod {
    type Err = SesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fisher" => Ok(AnalysisMethod::Fisher),
            "binomial" => Ok(AnalysisMethod::Binomial),
            other => Err(SesError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisMethod::Fisher => write!(f, "fisher"),
            AnalysisMethod::Binomial => write!(f, "binomial"),
        }
    }
}
