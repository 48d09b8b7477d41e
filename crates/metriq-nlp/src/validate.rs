//! Translator-output validation gate.
//!
//! The external translator returns free text that is expected to parse as a
//! structured query. Nothing it produces is trusted: the JSON is parsed into
//! an explicit schema and every vocabulary-bearing field is checked against
//! the ontology before the query may be compiled.

use crate::error::ValidationError;
use metriq_core::{Aggregation, MetricQuery};
use metriq_ontology::Ontology;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Raw interchange shape produced by the translator.
#[derive(Debug, Deserialize)]
struct RawTranslation {
    #[serde(rename = "MetricName")]
    metric_name: Option<String>,
    #[serde(rename = "Aggregation")]
    aggregation: Option<String>,
    #[serde(rename = "Filters", default)]
    filters: Option<BTreeMap<String, String>>,
    #[serde(rename = "TimeWindow")]
    time_window: Option<String>,
}

/// Validates raw translator output against the ontology's vocabulary.
///
/// `MetricName` and `Aggregation` are required; `Filters` defaults to empty
/// and `TimeWindow` to `"1h"`. The metric must be declared in the ontology
/// and the aggregation must be a backend token. Failure reports the cause
/// and drops the prompt; it never panics on malformed input.
pub fn validate_translation(
    raw: &str,
    ontology: &Ontology,
) -> Result<MetricQuery, ValidationError> {
    let parsed: RawTranslation = serde_json::from_str(strip_code_fences(raw))?;

    let metric = match parsed.metric_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ValidationError::MissingField("MetricName")),
    };
    if !ontology.metrics.contains_key(&metric) {
        return Err(ValidationError::UnknownMetric(metric));
    }

    let aggregation = match parsed.aggregation {
        Some(token) if !token.trim().is_empty() => Aggregation::from_str(&token)
            .map_err(|e| ValidationError::UnknownAggregation(e.0))?,
        _ => return Err(ValidationError::MissingField("Aggregation")),
    };

    let query = MetricQuery {
        metric,
        aggregation,
        filters: parsed.filters.unwrap_or_default(),
        time_window: parsed
            .time_window
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| "1h".to_string()),
    };

    debug!(metric = %query.metric, aggregation = %query.aggregation, "translation validated");
    Ok(query)
}

/// Translators occasionally wrap the JSON object in a Markdown code fence.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ontology {
        Ontology::from_yaml(
            r#"
metrics:
  request.dist.time:
    type: distribution
    supports:
      p99:
        type: percentile
        aggregation: p99
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_translation() {
        let raw = r#"{
            "MetricName": "request.dist.time",
            "Aggregation": "p99",
            "Filters": { "kube_deployment": "unicorn" },
            "TimeWindow": "24h"
        }"#;
        let query = validate_translation(raw, &sample()).unwrap();

        assert_eq!(query.metric, "request.dist.time");
        assert_eq!(query.aggregation, Aggregation::P99);
        assert_eq!(
            query.filters.get("kube_deployment"),
            Some(&"unicorn".to_string())
        );
        assert_eq!(query.time_window, "24h");
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = validate_translation("not json at all", &sample()).unwrap_err();
        assert!(matches!(err, ValidationError::Json(_)));
    }

    #[test]
    fn test_missing_metric_name() {
        let raw = r#"{"Aggregation": "avg"}"#;
        let err = validate_translation(raw, &sample()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("MetricName")));
    }

    #[test]
    fn test_missing_aggregation() {
        let raw = r#"{"MetricName": "request.dist.time"}"#;
        let err = validate_translation(raw, &sample()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("Aggregation")));
    }

    #[test]
    fn test_hallucinated_metric_is_rejected() {
        let raw = r#"{"MetricName": "made.up.metric", "Aggregation": "avg"}"#;
        let err = validate_translation(raw, &sample()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownMetric(m) if m == "made.up.metric"));
    }

    #[test]
    fn test_unknown_aggregation_is_rejected() {
        let raw = r#"{"MetricName": "request.dist.time", "Aggregation": "median"}"#;
        let err = validate_translation(raw, &sample()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownAggregation(a) if a == "median"));
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let raw = r#"{"MetricName": "request.dist.time", "Aggregation": "avg"}"#;
        let query = validate_translation(raw, &sample()).unwrap();
        assert!(query.filters.is_empty());
        assert_eq!(query.time_window, "1h");
    }

    #[test]
    fn test_fenced_output_is_accepted() {
        let raw = "```json\n{\"MetricName\": \"request.dist.time\", \"Aggregation\": \"avg\"}\n```";
        let query = validate_translation(raw, &sample()).unwrap();
        assert_eq!(query.metric, "request.dist.time");
    }
}
