//! Ontology-specific error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the ontology document.
#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("failed to read ontology at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ontology document: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors raised while resolving a prompt against the ontology.
///
/// Each variant identifies which kind of lookup failed so the CLI layer can
/// report it precisely; none of these abort the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("alias '{0}' is not defined in the ontology")]
    AliasNotFound(String),

    #[error("service '{0}' is not defined in the ontology")]
    ServiceNotFound(String),

    #[error("no metric of service '{service}' supports view '{view}'")]
    ViewNotSupported { service: String, view: String },

    #[error("no known service mentioned in prompt: {0}")]
    NoServiceInPrompt(String),
}
