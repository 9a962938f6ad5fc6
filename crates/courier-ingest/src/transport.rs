//! Transport abstraction for the event bus client.
//!
//! The wire client is an opaque collaborator behind two traits: a
//! [`Connector`] that binds credentials into reusable connections, and a
//! [`Connection`] that initiates asynchronous publishes. The publish
//! signature is two-phase: the outer `Result` reports failures raised while
//! dispatching the call, the returned future resolves with the in-flight
//! outcome. Production wires in the real bus client; tests use the
//! recording double in [`mock`].

use std::{future::Future, pin::Pin, sync::Arc};

use courier_core::EventEnvelope;
use thiserror::Error;

use crate::config::Credential;

/// Result type alias for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// In-flight publish call awaiting its transport-level outcome.
pub type InFlight = Pin<Box<dyn Future<Output = TransportResult<()>> + Send>>;

/// Failures raised by the transport collaborator.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The transport refused the batch while dispatching.
    #[error("transport rejected the batch: {message}")]
    Rejected {
        /// Reason given by the transport
        message: String,
    },

    /// The publish failed after dispatch, on the network side.
    #[error("network failure while publishing: {message}")]
    Network {
        /// Description of the network failure
        message: String,
    },
}

impl TransportError {
    /// Creates a rejection error from a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { message: message.into() }
    }

    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }
}

/// Factory for publishing connections.
///
/// Construction is assumed to succeed given a resolved credential; the
/// pool verifies the credential before calling [`Connector::connect`].
pub trait Connector: Send + Sync + 'static {
    /// Establishes a new publishing connection bound to `credential`.
    fn connect(&self, credential: &Credential) -> Arc<dyn Connection>;
}

/// A reusable publishing connection to the event bus.
pub trait Connection: std::fmt::Debug + Send + Sync + 'static {
    /// Initiates an asynchronous publish of `events` toward `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the call cannot be dispatched.
    /// Failures after dispatch surface through the returned future instead.
    fn publish(&self, endpoint: &str, events: Vec<EventEnvelope>) -> TransportResult<InFlight>;
}

/// Recording transport double for tests.
///
/// Captures every dispatched batch at dispatch time so assertions do not
/// race the spawned in-flight futures, and supports injecting both
/// dispatch-time and in-flight failures.
pub mod mock {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex, PoisonError,
    };

    use super::*;

    /// One recorded publish dispatch.
    #[derive(Debug, Clone)]
    pub struct RecordedPublish {
        /// Endpoint the batch was addressed to.
        pub endpoint: String,
        /// Envelopes in the dispatched batch.
        pub events: Vec<EventEnvelope>,
    }

    #[derive(Debug, Default)]
    struct MockState {
        published: Mutex<Vec<RecordedPublish>>,
        connections_built: AtomicUsize,
        fail_dispatch: AtomicBool,
        fail_in_flight: AtomicBool,
        last_credential: Mutex<Option<String>>,
    }

    /// Connector double that hands out connections sharing one recording
    /// state.
    #[derive(Debug, Clone, Default)]
    pub struct MockConnector {
        state: Arc<MockState>,
    }

    impl MockConnector {
        /// Creates a new recording connector.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the number of connections built so far.
        pub fn connection_count(&self) -> usize {
            self.state.connections_built.load(Ordering::SeqCst)
        }

        /// Returns the number of dispatched publishes.
        pub fn publish_count(&self) -> usize {
            self.state.published.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        /// Returns all recorded publishes in dispatch order.
        pub fn published(&self) -> Vec<RecordedPublish> {
            self.state.published.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        /// Makes subsequent dispatch attempts fail synchronously.
        pub fn fail_dispatch(&self, fail: bool) {
            self.state.fail_dispatch.store(fail, Ordering::SeqCst);
        }

        /// Makes subsequent in-flight futures resolve with a network error.
        pub fn fail_in_flight(&self, fail: bool) {
            self.state.fail_in_flight.store(fail, Ordering::SeqCst);
        }

        /// Returns the credential the most recent connection was bound to.
        pub fn last_credential(&self) -> Option<String> {
            self.state.last_credential.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    impl Connector for MockConnector {
        fn connect(&self, credential: &Credential) -> Arc<dyn Connection> {
            self.state.connections_built.fetch_add(1, Ordering::SeqCst);
            *self.state.last_credential.lock().unwrap_or_else(PoisonError::into_inner) =
                Some(credential.expose().to_string());
            Arc::new(MockConnection { state: self.state.clone() })
        }
    }

    #[derive(Debug)]
    struct MockConnection {
        state: Arc<MockState>,
    }

    impl Connection for MockConnection {
        fn publish(&self, endpoint: &str, events: Vec<EventEnvelope>) -> TransportResult<InFlight> {
            if self.state.fail_dispatch.load(Ordering::SeqCst) {
                return Err(TransportError::rejected("dispatch refused by mock"));
            }

            self.state
                .published
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(RecordedPublish { endpoint: endpoint.to_string(), events });

            let fail_in_flight = self.state.fail_in_flight.load(Ordering::SeqCst);
            Ok(Box::pin(async move {
                if fail_in_flight {
                    Err(TransportError::network("connection reset by mock"))
                } else {
                    Ok(())
                }
            }))
        }
    }
}
