//! Asynchronous publish pipeline.
//!
//! Takes a built envelope, acquires a pooled connection, and initiates the
//! transport publish without awaiting it. The caller returns as soon as the
//! call is dispatched; the in-flight future runs on a spawned task whose
//! only job is to observe the outcome and log failures. Nothing retries
//! here and no completion signal reaches the caller.

use std::sync::Arc;

use courier_core::{EventEnvelope, IngestError, Result};
use tracing::{debug, info_span, warn, Instrument};

use crate::pool::ConnectionPool;

/// Publishes envelopes through pool-acquired connections.
#[derive(Debug, Clone)]
pub struct PublishPipeline {
    pool: Arc<ConnectionPool>,
}

impl PublishPipeline {
    /// Creates a pipeline over the given pool.
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Dispatches one envelope to the transport, fire-and-forget.
    ///
    /// Returns once the asynchronous publish has been initiated; the
    /// completion task is spawned onto the ambient tokio runtime. Events
    /// may reach the bus in any order relative to other concurrent
    /// publishes.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Configuration`] when no connection can be
    /// acquired, and [`IngestError::PublishFailure`] when the transport
    /// refuses to dispatch the call. Failures after dispatch are logged,
    /// not returned.
    pub fn publish(&self, envelope: EventEnvelope) -> Result<()> {
        let connection = self.pool.acquire()?;

        let span = info_span!(
            "event_publish",
            event_id = %envelope.id,
            event_type = %envelope.event_type,
            topic = %envelope.topic,
        );
        let _entered = span.enter();

        let in_flight = connection
            .publish(self.pool.endpoint(), vec![envelope])
            .map_err(|e| IngestError::publish_failure(e.to_string()))?;

        drop(_entered);
        tokio::spawn(
            async move {
                match in_flight.await {
                    Ok(()) => debug!("event published"),
                    Err(error) => warn!(error = %error, "event publish failed after dispatch"),
                }
            }
            .instrument(span),
        );

        Ok(())
    }
}
