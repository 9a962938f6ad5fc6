//! Event-bus ingestion adapter for delivery lifecycle commands.
//!
//! This crate accepts schedule, cancel, and reschedule commands and
//! publishes them as structured events to a fan-out event bus through a
//! bounded pool of reusable publishing connections.
//!
//! # Architecture
//!
//! ```text
//! caller ──▶ IngestService ──▶ EnvelopeFactory ──▶ PublishPipeline
//!                                                       │
//!                                              ConnectionPool::acquire
//!                                                       │
//!                                              transport publish (async,
//!                                              fire-and-forget)
//! ```
//!
//! Connections are created lazily into fixed write-once slots; both the
//! slot and the topic for each event are chosen uniformly at random to
//! spread load. The caller gets an error only when dispatch itself fails;
//! transport failures after dispatch are logged by the spawned completion
//! task and never propagate.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use courier_core::UtcClock;
//! use courier_ingest::{transport::mock::MockConnector, ConnectionPool, IngestConfig, IngestService};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = IngestConfig::load()?;
//! let connector = Arc::new(MockConnector::new());
//! let pool = Arc::new(ConnectionPool::new(&config, connector));
//! let service = IngestService::new(pool, Arc::new(UtcClock::new()));
//! # let _ = service;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod pool;
pub mod transport;

pub use config::{Credential, IngestConfig};
pub use ingest::{DeliveryIngestion, Headers, IngestService};
pub use pipeline::PublishPipeline;
pub use pool::ConnectionPool;

/// Default number of connection slots when none is configured.
pub const DEFAULT_POOL_SIZE: usize = 100;
