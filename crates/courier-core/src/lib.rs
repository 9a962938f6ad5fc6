//! Core domain types for the courier delivery ingestion service.
//!
//! Provides the event envelope and its factory, the delivery command
//! payloads, the error taxonomy, and the clock abstraction. The
//! `courier-ingest` crate builds the publishing pipeline on top of these
//! types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod models;
pub mod time;

pub use envelope::{EnvelopeFactory, EventEnvelope, Operation, DATA_VERSION};
pub use error::{IngestError, Result};
pub use models::{ConfirmationType, ContainerSize, Delivery, PackageInfo};
pub use time::{Clock, FixedClock, UtcClock};
