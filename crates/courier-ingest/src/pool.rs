//! Bounded pool of reusable publishing connections.
//!
//! The pool owns a fixed array of lazily-populated connection slots and the
//! immutable topic table. Both acquisition and topic selection draw a slot
//! or topic uniformly at random to spread load; the two draws are
//! independent. A slot, once populated, is never cleared or replaced: the
//! cache is write-once and keyed by slot index, not by connection health.
//! Expired or broken connections stay cached until the process restarts.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use courier_core::{IngestError, Result};
use rand::Rng;
use tracing::{debug, info};

use crate::{
    config::{Credential, IngestConfig},
    transport::{Connection, Connector},
};

/// Fixed-size pool of publishing connections plus the topic table.
///
/// Constructed once at startup and shared for the process lifetime. Slots
/// are populated lazily on first acquisition; the per-slot lock ensures a
/// slot's connection is constructed exactly once even under concurrent
/// acquisition. The credential is captured from configuration at
/// construction and only changes through [`ConnectionPool::refresh_credential`].
pub struct ConnectionPool {
    endpoint: String,
    topics: Vec<String>,
    credential: RwLock<Credential>,
    slots: Box<[Mutex<Option<Arc<dyn Connection>>>]>,
    connector: Arc<dyn Connector>,
}

impl ConnectionPool {
    /// Creates a pool from configuration with all slots empty.
    pub fn new(config: &IngestConfig, connector: Arc<dyn Connector>) -> Self {
        let slots = (0..config.pool_size).map(|_| Mutex::new(None)).collect();

        Self {
            endpoint: config.topic_endpoint.clone(),
            topics: config.topic_table(),
            credential: RwLock::new(config.credential()),
            slots,
            connector,
        }
    }

    /// Acquires a connection from a uniformly random slot.
    ///
    /// An empty slot is populated with a freshly constructed connection
    /// bound to the current credential; a populated slot returns its cached
    /// connection unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Configuration`] when the credential is
    /// missing or empty. No connection is constructed in that case.
    pub fn acquire(&self) -> Result<Arc<dyn Connection>> {
        let index = rand::rng().random_range(0..self.slots.len());
        let mut slot = self.slots[index].lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(connection) = slot.as_ref() {
            return Ok(Arc::clone(connection));
        }

        let credential =
            self.credential.read().unwrap_or_else(PoisonError::into_inner).clone();
        if credential.is_empty() {
            return Err(IngestError::configuration(
                "publishing credential is missing or empty",
            ));
        }

        let connection = self.connector.connect(&credential);
        debug!(slot = index, "established new publishing connection");
        *slot = Some(Arc::clone(&connection));
        Ok(connection)
    }

    /// Selects a topic uniformly at random from the configured table.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Configuration`] when the topic table is
    /// empty.
    pub fn select_topic(&self) -> Result<String> {
        if self.topics.is_empty() {
            return Err(IngestError::configuration("no topics configured"));
        }

        let index = rand::rng().random_range(0..self.topics.len());
        Ok(self.topics[index].clone())
    }

    /// Returns the endpoint all publishes target.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured topic table.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Returns the number of connection slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns how many slots currently hold a connection.
    pub fn populated_slots(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
            .count()
    }

    /// Replaces the publishing credential.
    ///
    /// Only future connection construction uses the new credential;
    /// connections already cached keep the credential they were built with.
    pub fn refresh_credential(&self, credential: Credential) {
        *self.credential.write().unwrap_or_else(PoisonError::into_inner) = credential;
        info!("publishing credential refreshed");
    }
}

impl fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("endpoint", &self.endpoint)
            .field("topics", &self.topics)
            .field("slot_count", &self.slots.len())
            .field("populated_slots", &self.populated_slots())
            .finish()
    }
}
