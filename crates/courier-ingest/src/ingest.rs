//! Ingestion facade for delivery lifecycle commands.
//!
//! The three public operations external controllers invoke. Each one builds
//! a single envelope tagged with the operation name and hands it to the
//! publish pipeline. Request headers are accepted for correlation-id
//! propagation by outer layers but are not consumed here.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use courier_core::{Clock, Delivery, EnvelopeFactory, Operation, Result};
use serde_json::Value;
use tracing::debug;

use crate::{pipeline::PublishPipeline, pool::ConnectionPool};

/// Request headers forwarded by the calling controller. Unused by this
/// core.
pub type Headers = HashMap<String, String>;

/// Delivery command ingestion operations.
///
/// The seam external controllers call. Every operation publishes exactly
/// one event and returns once the publish is dispatched; completion of the
/// transport call is never awaited.
#[async_trait]
pub trait DeliveryIngestion: Send + Sync {
    /// Publishes a `ScheduleDelivery` event carrying the delivery request.
    async fn schedule_delivery(&self, delivery: &Delivery, headers: &Headers) -> Result<()>;

    /// Publishes a `CancelDelivery` event carrying the delivery id.
    async fn cancel_delivery(&self, delivery_id: &str, headers: &Headers) -> Result<()>;

    /// Publishes a `RescheduleDelivery` event carrying the updated delivery
    /// request.
    async fn reschedule_delivery(&self, delivery: &Delivery, headers: &Headers) -> Result<()>;
}

/// Production ingestion service composing the envelope factory and the
/// publish pipeline over one shared pool.
#[derive(Debug, Clone)]
pub struct IngestService {
    pool: Arc<ConnectionPool>,
    factory: EnvelopeFactory,
    pipeline: PublishPipeline,
}

impl IngestService {
    /// Creates a service over the given pool and time source.
    pub fn new(pool: Arc<ConnectionPool>, clock: Arc<dyn Clock>) -> Self {
        let factory = EnvelopeFactory::new(clock);
        let pipeline = PublishPipeline::new(Arc::clone(&pool));
        Self { pool, factory, pipeline }
    }

    /// Builds and dispatches one envelope for `operation`.
    fn dispatch(&self, payload: Value, operation: Operation) -> Result<()> {
        let topic = self.pool.select_topic()?;
        let envelope = self.factory.build(payload, operation, topic);
        debug!(event_id = %envelope.id, operation = %operation, "dispatching delivery event");
        self.pipeline.publish(envelope)
    }
}

#[async_trait]
impl DeliveryIngestion for IngestService {
    async fn schedule_delivery(&self, delivery: &Delivery, _headers: &Headers) -> Result<()> {
        let payload = serde_json::to_value(delivery)?;
        self.dispatch(payload, Operation::ScheduleDelivery)
    }

    async fn cancel_delivery(&self, delivery_id: &str, _headers: &Headers) -> Result<()> {
        self.dispatch(Value::String(delivery_id.to_string()), Operation::CancelDelivery)
    }

    async fn reschedule_delivery(&self, delivery: &Delivery, _headers: &Headers) -> Result<()> {
        let payload = serde_json::to_value(delivery)?;
        self.dispatch(payload, Operation::RescheduleDelivery)
    }
}
