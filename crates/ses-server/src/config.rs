//! Configuration management

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::stats::DEFAULT_FDR_ALPHA;
use ses_common::SesError;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default Redis host for local development.
pub const DEFAULT_REDIS_HOST: &str = "localhost";

/// Default Redis port.
pub const DEFAULT_REDIS_PORT: u16 = 6379;

/// Default Redis logical database.
pub const DEFAULT_REDIS_DB: &str = "0";

/// Default Neo4j bolt scheme.
pub const DEFAULT_NEO4J_SCHEME: &str = "bolt";

/// Default Neo4j host for local development.
pub const DEFAULT_NEO4J_HOST: &str = "localhost";

/// Default Neo4j bolt port.
pub const DEFAULT_NEO4J_PORT: u16 = 7687;

/// Default Neo4j credentials, `user/password` form.
pub const DEFAULT_NEO4J_AUTH: &str = "neo4j/password";

/// Default Neo4j database name.
pub const DEFAULT_NEO4J_DATABASE: &str = "neo4j";

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub neo4j: Neo4jConfig,
    pub enrichment: EnrichmentConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Redis cache store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub db: String,
    pub ssl: bool,
    pub ttl_secs: u64,
}

impl RedisConfig {
    /// Assemble the connection URL, `redis[s]://:<password>@<host>:<port>/<db>`.
    pub fn url(&self) -> String {
        let schema = if self.ssl { "rediss" } else { "redis" };
        format!(
            "{}://:{}@{}:{}/{}",
            schema, self.password, self.host, self.port, self.db
        )
    }
}

/// Neo4j graph database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo4jConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Neo4jConfig {
    pub fn uri(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// Enrichment analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// FDR significance level for the Benjamini-Hochberg rejection flag.
    pub fdr_alpha: f64,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let neo4j_auth =
            std::env::var("NEO4J_AUTH").unwrap_or_else(|_| DEFAULT_NEO4J_AUTH.to_string());
        let (neo4j_user, neo4j_password) = neo4j_auth
            .split_once('/')
            .map(|(u, p)| (u.to_string(), p.to_string()))
            .ok_or_else(|| {
                SesError::Config(format!("NEO4J_AUTH must be 'user/password': {neo4j_auth}"))
            })?;

        let config = Config {
            server: ServerConfig {
                host: std::env::var("SES_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: std::env::var("SES_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
            },
            redis: RedisConfig {
                host: std::env::var("REDIS_HOST")
                    .unwrap_or_else(|_| DEFAULT_REDIS_HOST.to_string()),
                port: std::env::var("REDIS_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_REDIS_PORT),
                password: std::env::var("REDIS_PASSWORD").unwrap_or_default(),
                db: std::env::var("REDIS_DB").unwrap_or_else(|_| DEFAULT_REDIS_DB.to_string()),
                ssl: std::env::var("REDIS_SSL")
                    .map(|s| matches!(s.to_lowercase().as_str(), "true" | "1"))
                    .unwrap_or(false),
                ttl_secs: std::env::var("CACHE_TTL")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            },
            neo4j: Neo4jConfig {
                scheme: std::env::var("NEO4J_SCHEME")
                    .unwrap_or_else(|_| DEFAULT_NEO4J_SCHEME.to_string()),
                host: std::env::var("NEO4J_HOST")
                    .unwrap_or_else(|_| DEFAULT_NEO4J_HOST.to_string()),
                port: std::env::var("NEO4J_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_NEO4J_PORT),
                user: neo4j_user,
                password: neo4j_password,
                database: std::env::var("NEO4J_DATABASE")
                    .unwrap_or_else(|_| DEFAULT_NEO4J_DATABASE.to_string()),
            },
            enrichment: EnrichmentConfig {
                fdr_alpha: std::env::var("FDR_ALPHA")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FDR_ALPHA),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.redis.ttl_secs == 0 {
            anyhow::bail!("CACHE_TTL must be at least 1 second");
        }
        if !(0.0..=1.0).contains(&self.enrichment.fdr_alpha) || self.enrichment.fdr_alpha == 0.0 {
            anyhow::bail!(
                "FDR_ALPHA must be in (0, 1], got {}",
                self.enrichment.fdr_alpha
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
            },
            redis: RedisConfig {
                host: "cache.internal".to_string(),
                port: 6380,
                password: "hunter2".to_string(),
                db: "2".to_string(),
                ssl: false,
                ttl_secs: DEFAULT_CACHE_TTL_SECS,
            },
            neo4j: Neo4jConfig {
                scheme: "bolt".to_string(),
                host: "graph.internal".to_string(),
                port: 7687,
                user: "neo4j".to_string(),
                password: "secret".to_string(),
                database: "neo4j".to_string(),
            },
            enrichment: EnrichmentConfig {
                fdr_alpha: DEFAULT_FDR_ALPHA,
            },
        }
    }

    #[test]
    fn redis_url_assembly() {
        let mut config = sample_config();
        assert_eq!(config.redis.url(), "redis://:hunter2@cache.internal:6380/2");
        config.redis.ssl = true;
        assert!(config.redis.url().starts_with("rediss://"));
    }

    #[test]
    fn neo4j_uri_assembly() {
        let config = sample_config();
        assert_eq!(config.neo4j.uri(), "bolt://graph.internal:7687");
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let mut config = sample_config();
        config.redis.ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn alpha_bounds_are_enforced() {
        let mut config = sample_config();
        config.enrichment.fdr_alpha = 0.0;
        assert!(config.validate().is_err());
        config.enrichment.fdr_alpha = 1.5;
        assert!(config.validate().is_err());
        config.enrichment.fdr_alpha = 0.01;
        assert!(config.validate().is_ok());
    }
}
