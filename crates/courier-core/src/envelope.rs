//! Event envelope construction for the fan-out bus.
//!
//! Every publish sends exactly one [`EventEnvelope`]: an immutable record
//! carrying a fresh id, the operation name as both subject and event type,
//! the opaque command payload, a creation timestamp, the fixed schema
//! version, and the topic chosen for this event. Envelopes are never
//! mutated after construction; ownership moves to the transport on publish.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::time::Clock;

/// Schema version stamped on every envelope.
pub const DATA_VERSION: &str = "2.0";

/// Immutable event record published to the bus.
///
/// Serializes to the wire shape
/// `{id, subject, data, eventType, eventTime, dataVersion, topic}` with
/// `eventTime` in RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Unique id generated for this event.
    pub id: Uuid,
    /// Subject label, set to the operation name.
    pub subject: String,
    /// Opaque command payload.
    pub data: Value,
    /// Event type, set to the operation name.
    pub event_type: String,
    /// Creation timestamp.
    pub event_time: DateTime<Utc>,
    /// Envelope schema version, always [`DATA_VERSION`].
    pub data_version: String,
    /// Topic the event is addressed to, chosen at construction.
    pub topic: String,
}

/// Delivery lifecycle operations published by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Schedule a new delivery.
    ScheduleDelivery,
    /// Cancel an in-progress delivery.
    CancelDelivery,
    /// Reschedule an existing delivery.
    RescheduleDelivery,
}

impl Operation {
    /// Returns the wire name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScheduleDelivery => "ScheduleDelivery",
            Self::CancelDelivery => "CancelDelivery",
            Self::RescheduleDelivery => "RescheduleDelivery",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds event envelopes from command payloads.
///
/// Pure construction: no I/O, no payload validation. The clock is injected
/// so tests can pin timestamps.
#[derive(Debug, Clone)]
pub struct EnvelopeFactory {
    clock: Arc<dyn Clock>,
}

impl EnvelopeFactory {
    /// Creates a factory using the given time source.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Builds one envelope for `operation` carrying `payload`, addressed to
    /// `topic`.
    ///
    /// Generates a fresh id per call; collision probability is treated as
    /// negligible.
    pub fn build(
        &self,
        payload: Value,
        operation: Operation,
        topic: impl Into<String>,
    ) -> EventEnvelope {
        EventEnvelope {
            id: Uuid::new_v4(),
            subject: operation.as_str().to_string(),
            data: payload,
            event_type: operation.as_str().to_string(),
            event_time: self.clock.now_utc(),
            data_version: DATA_VERSION.to_string(),
            topic: topic.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::time::UtcClock;

    fn factory() -> EnvelopeFactory {
        EnvelopeFactory::new(Arc::new(UtcClock::new()))
    }

    #[test]
    fn envelope_carries_operation_as_subject_and_type() {
        let envelope = factory().build(json!({"deliveryId": "d-1"}), Operation::ScheduleDelivery, "t1");

        assert_eq!(envelope.subject, "ScheduleDelivery");
        assert_eq!(envelope.event_type, "ScheduleDelivery");
        assert_eq!(envelope.topic, "t1");
        assert_eq!(envelope.data_version, DATA_VERSION);
    }

    #[test]
    fn operation_wire_names() {
        assert_eq!(Operation::ScheduleDelivery.as_str(), "ScheduleDelivery");
        assert_eq!(Operation::CancelDelivery.as_str(), "CancelDelivery");
        assert_eq!(Operation::RescheduleDelivery.as_str(), "RescheduleDelivery");
    }

    #[test]
    fn each_build_generates_a_fresh_id() {
        let factory = factory();
        let a = factory.build(json!("d-1"), Operation::CancelDelivery, "t1");
        let b = factory.build(json!("d-1"), Operation::CancelDelivery, "t1");

        assert_ne!(a.id, b.id);
    }
}
