//! Statistical Enrichment Service
//!
//! A small HTTP microservice computing gene-set enrichment against a GO
//! annotation background stored in a property graph:
//!
//! - **Statistical core**: hypergeometric (Fisher) and binomial tests with
//!   Benjamini-Hochberg FDR correction ([`stats`])
//! - **Graph adapter**: read-only Neo4j queries fetching the per-organism
//!   annotation background ([`graph`])
//! - **Cache layer**: Redis-backed memoization of the graph queries with a
//!   bounded TTL ([`cache`])
//! - **Service**: the orchestration and HTTP surface
//!   ([`features::enrichment`], [`api`])
//!
//! Requests are stateless; the only shared state is the external cache
//! store, where writes are idempotent and concurrent recomputation is
//! harmless. The graph is never written to.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use ses_server::{api, cache::RedisCache, config::Config, graph::Neo4jGoSource};
//! use ses_server::features::enrichment::EnrichmentService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let cache = RedisCache::connect(&config.redis.url()).await?;
//!     let graph = Neo4jGoSource::connect(
//!         &config.neo4j.uri(),
//!         &config.neo4j.user,
//!         &config.neo4j.password,
//!         &config.neo4j.database,
//!     )
//!     .await?;
//!     let service = Arc::new(EnrichmentService::new(
//!         Arc::new(graph),
//!         Arc::new(cache),
//!         Duration::from_secs(config.redis.ttl_secs),
//!         config.enrichment.fdr_alpha,
//!     ));
//!     api::serve(config, service).await
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod features;
pub mod graph;
pub mod stats;

// Re-export commonly used types
pub use error::AppError;
