//! # Metriq Core
//!
//! Shared vocabulary and configuration for the Metriq workspace.
//!
//! This crate defines the types that flow between the resolver, compiler,
//! and backend client: the backend's aggregation vocabulary, the structured
//! [`MetricQuery`] produced per prompt, and the [`CompiledQuery`] ready for
//! dispatch. It also holds the typed application configuration loaded from
//! the environment.

pub mod config;
pub mod types;

pub use config::{AppConfig, BackendConfig, OntologyConfig, TranslatorConfig};
pub use types::{Aggregation, CompiledQuery, MetricQuery, UnknownAggregation};
