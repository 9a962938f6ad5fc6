//! Property-based tests for envelope invariants.
//!
//! Exercises envelope construction across arbitrary payloads, operations,
//! and topic names to verify the invariants hold regardless of input.

use std::sync::Arc;

use courier_core::{EnvelopeFactory, EventEnvelope, Operation, UtcClock, DATA_VERSION};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use serde_json::Value;

fn proptest_config() -> ProptestConfig {
    ProptestConfig { cases: 256, ..ProptestConfig::default() }
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::ScheduleDelivery),
        Just(Operation::CancelDelivery),
        Just(Operation::RescheduleDelivery),
    ]
}

fn payload_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9 -]{0,64}".prop_map(Value::String),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        proptest::collection::hash_map("[a-z]{1,12}", "[a-zA-Z0-9]{0,32}", 0..6)
            .prop_map(|map| Value::Object(map.into_iter().map(|(k, v)| (k, Value::String(v))).collect())),
    ]
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn envelope_invariants_hold_for_any_input(
        operation in operation_strategy(),
        payload in payload_strategy(),
        topic in "[a-z][a-z0-9-]{0,30}",
    ) {
        let factory = EnvelopeFactory::new(Arc::new(UtcClock::new()));
        let envelope = factory.build(payload.clone(), operation, topic.clone());

        prop_assert_eq!(envelope.subject.as_str(), operation.as_str());
        prop_assert_eq!(envelope.event_type.as_str(), operation.as_str());
        prop_assert_eq!(envelope.data_version.as_str(), DATA_VERSION);
        prop_assert_eq!(&envelope.data, &payload);
        prop_assert_eq!(envelope.topic.as_str(), topic.as_str());
    }

    #[test]
    fn envelope_serialization_round_trips(
        operation in operation_strategy(),
        payload in payload_strategy(),
        topic in "[a-z][a-z0-9-]{0,30}",
    ) {
        let factory = EnvelopeFactory::new(Arc::new(UtcClock::new()));
        let envelope = factory.build(payload, operation, topic);

        let json = serde_json::to_string(&envelope).unwrap();
        let parsed: EventEnvelope = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, envelope);
    }
}
