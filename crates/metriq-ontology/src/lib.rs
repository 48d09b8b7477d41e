//! # Metriq Ontology
//!
//! The typed graph of services, metrics, views, teams, and aliases that
//! grounds natural-language query resolution.
//!
//! This crate provides three things:
//!
//! - **Loading** ([`Ontology::load`]): parse a YAML document into the typed
//!   graph. All-or-nothing; a malformed document never yields a partially
//!   populated ontology.
//! - **Projection** ([`ProjectedContext`]): a reduced, JSON-serializable view
//!   of the ontology used as grounding context for the external translator.
//! - **Resolution** ([`Ontology::resolve_view`], [`Ontology::match_prompt`]):
//!   map a service name and view alias onto a concrete metric/view pair,
//!   guaranteeing that only declared metrics ever reach the backend.

pub mod error;
pub mod model;
pub mod project;
pub mod resolve;

pub use error::{OntologyError, ResolveError};
pub use model::{Metric, MetricKind, Ontology, Service, Team, View};
pub use project::{ProjectedContext, ProjectedMetric, ProjectedService};
pub use resolve::{PromptMatch, ResolvedView};
