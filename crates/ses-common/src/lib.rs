//! Shared library for the statistical enrichment service.
//!
//! Holds the pieces common to the server and any future tooling: the error
//! taxonomy, logging bootstrap, and the domain types exchanged between the
//! graph adapter, cache layer and statistical core.

pub mod error;
pub mod logging;
pub mod types;

pub use error::{Result, SesError};
pub use types::{
    AnalysisMethod, AnnotationRecord, AnnotationUniverse, BinomialRow, EnrichmentRow, Organism,
};
