//! NLP-specific error types

use thiserror::Error;

/// Errors raised while validating structured translator output.
///
/// All of these are reported to the caller and drop the prompt for that
/// turn; none of them crash the session.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("translator output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("translator output is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("aggregation '{0}' is not in the backend vocabulary")]
    UnknownAggregation(String),

    #[error("metric '{0}' is not declared in the ontology")]
    UnknownMetric(String),
}
