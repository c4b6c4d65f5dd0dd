//! Statistical enrichment service - main entry point

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use ses_common::logging::{init_logging, LogConfig};
use ses_server::{
    api, cache::RedisCache, config::Config, features::enrichment::EnrichmentService,
    graph::Neo4jGoSource,
};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::from_env().unwrap_or_else(|_| LogConfig {
        log_file_prefix: "ses-server".to_string(),
        filter_directives: Some("ses_server=debug,tower_http=debug".to_string()),
        ..LogConfig::default()
    });
    init_logging(&log_config)?;

    info!("Starting statistical enrichment service");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let cache = RedisCache::connect(&config.redis.url()).await?;

    let graph = Neo4jGoSource::connect(
        &config.neo4j.uri(),
        &config.neo4j.user,
        &config.neo4j.password,
        &config.neo4j.database,
    )
    .await?;

    let service = Arc::new(EnrichmentService::new(
        Arc::new(graph),
        Arc::new(cache),
        Duration::from_secs(config.redis.ttl_secs),
        config.enrichment.fdr_alpha,
    ));

    api::serve(config, service).await
}
