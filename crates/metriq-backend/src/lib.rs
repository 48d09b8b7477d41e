//! # Metriq Backend
//!
//! Async client for the Datadog-style time-series query API, plus the
//! one-line result summarizer. The client is built from an explicit
//! configuration struct; credentials are held behind [`secrecy::Secret`]
//! and never read from ambient process state.

pub mod client;
pub mod error;
pub mod models;
pub mod summary;

pub use client::{BackendClient, BackendClientBuilder};
pub use error::{BackendError, Result};
pub use models::{QueryResult, Series};
pub use summary::{summarize, NO_DATA_MESSAGE, NO_POINTS_MESSAGE};
