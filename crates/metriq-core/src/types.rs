//! Core query types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Aggregation tokens accepted by the time-series backend.
///
/// This enum is the single source of truth for the backend's aggregation
/// vocabulary: ontology views deserialize into it (so an unsupported token
/// fails the ontology load), and translator output is validated against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Avg,
    Sum,
    Min,
    Max,
    Count,
    P95,
    P99,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
            Self::P95 => "p95",
            Self::P99 => "p99",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a supported aggregation token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported aggregation token '{0}'")]
pub struct UnknownAggregation(pub String);

impl FromStr for Aggregation {
    type Err = UnknownAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avg" | "average" => Ok(Self::Avg),
            "sum" => Ok(Self::Sum),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "count" => Ok(Self::Count),
            "p95" => Ok(Self::P95),
            "p99" => Ok(Self::P99),
            other => Err(UnknownAggregation(other.to_string())),
        }
    }
}

/// A resolved, structured metric query.
///
/// Produced once per user prompt by one of the resolution strategies and
/// consumed by the query compiler. The serde field names match the JSON
/// interchange contract with the external translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricQuery {
    #[serde(rename = "MetricName")]
    pub metric: String,
    #[serde(rename = "Aggregation")]
    pub aggregation: Aggregation,
    #[serde(rename = "Filters", default)]
    pub filters: BTreeMap<String, String>,
    #[serde(rename = "TimeWindow")]
    pub time_window: String,
}

impl MetricQuery {
    pub fn new(metric: impl Into<String>, aggregation: Aggregation) -> Self {
        Self {
            metric: metric.into(),
            aggregation,
            filters: BTreeMap::new(),
            time_window: "1h".to_string(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn with_time_window(mut self, window: impl Into<String>) -> Self {
        self.time_window = window.into();
        self
    }

    /// Whether a metric name was identified. The heuristic resolver leaves
    /// the name empty when no metric keyword matched; callers must surface
    /// that instead of querying an empty metric.
    pub fn has_metric(&self) -> bool {
        !self.metric.is_empty()
    }
}

/// A backend-ready query string together with its UNIX-second time bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub query: String,
    pub from: i64,
    pub to: i64,
}
