//! # Metriq NLP
//!
//! Turns free-text prompts into well-formed metric queries.
//!
//! Three pieces live here:
//!
//! - **Heuristic resolution** ([`HeuristicResolver`]): pure, deterministic
//!   keyword matching. Never fails; every unmatched axis degrades to a
//!   documented default.
//! - **Validation** ([`validate_translation`]): the mandatory gate between
//!   the external translator's free-text output and the compiler. Strict
//!   JSON parsing plus ontology-membership checks, so hallucinated metric
//!   names never reach the backend.
//! - **Compilation** ([`compile`]): deterministic conversion of a resolved
//!   query and relative time window into the backend's query-string dialect
//!   with concrete UNIX-second bounds.

pub mod compile;
pub mod error;
pub mod heuristic;
pub mod validate;

pub use compile::{build_query_string, compile};
pub use error::ValidationError;
pub use heuristic::{extract_time_window, FilterTarget, HeuristicResolver};
pub use validate::validate_translation;
