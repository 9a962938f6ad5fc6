//! Configuration for the ingestion adapter.
//!
//! Loaded once at pool construction. Configuration is merged in priority
//! order: environment variables, then `config.toml`, then built-in
//! defaults. The topic list arrives as a comma-separated string from the
//! environment, matching the deployment convention of the event bus.

use std::fmt;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Ingestion adapter configuration.
///
/// # Example
///
/// ```no_run
/// use courier_ingest::IngestConfig;
///
/// let config = IngestConfig::load().expect("failed to load configuration");
/// println!("publishing to {}", config.topic_endpoint);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Event bus endpoint URL that all publishes target.
    ///
    /// Environment variable: `EVENT_TOPIC_ENDPOINT`
    #[serde(default = "default_topic_endpoint", alias = "EVENT_TOPIC_ENDPOINT")]
    pub topic_endpoint: String,

    /// Comma-separated list of topic names events are spread across.
    ///
    /// Environment variable: `EVENT_TOPICS`
    #[serde(default = "default_topics", alias = "EVENT_TOPICS")]
    pub topics: String,

    /// Access key used to authenticate publishing connections.
    ///
    /// Environment variable: `EVENT_TOPIC_KEY`
    #[serde(default, alias = "EVENT_TOPIC_KEY")]
    pub topic_key: String,

    /// Number of connection slots in the publishing pool.
    ///
    /// Environment variable: `EVENT_POOL_SIZE`
    #[serde(default = "default_pool_size", alias = "EVENT_POOL_SIZE")]
    pub pool_size: usize,
}

impl IngestConfig {
    /// Loads configuration from defaults, `config.toml`, and environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when a source fails to parse or validation rejects
    /// the merged result.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("failed to load ingestion configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parses the comma-separated topic string into an ordered topic table.
    ///
    /// Entries are trimmed; empty entries are dropped. An entirely empty
    /// table is legal here and rejected at selection time instead.
    pub fn topic_table(&self) -> Vec<String> {
        self.topics
            .split(',')
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns the publishing credential resolved from configuration.
    pub fn credential(&self) -> Credential {
        Credential::new(self.topic_key.clone())
    }

    /// Validates the merged configuration.
    fn validate(&self) -> Result<()> {
        if self.topic_endpoint.trim().is_empty() {
            anyhow::bail!("topic_endpoint must not be empty");
        }

        if self.pool_size == 0 {
            anyhow::bail!("pool_size must be greater than 0");
        }

        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            topic_endpoint: default_topic_endpoint(),
            topics: default_topics(),
            topic_key: String::new(),
            pool_size: default_pool_size(),
        }
    }
}

fn default_topic_endpoint() -> String {
    "https://localhost:8443/api/events".to_string()
}

fn default_topics() -> String {
    "deliveries".to_string()
}

fn default_pool_size() -> usize {
    crate::DEFAULT_POOL_SIZE
}

/// Publishing credential bound to connections at construction time.
///
/// Wraps the raw key so it never appears in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw credential value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns `true` when no credential value is present.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Exposes the raw credential for transport construction.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
