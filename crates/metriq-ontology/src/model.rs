//! Typed ontology model and loading.
//!
//! The document shape mirrors the YAML source: top-level `services`,
//! `metrics`, `teams`, and `aliases` sections. Unknown keys are ignored for
//! forward compatibility; wrong types for known keys fail the whole load.

use crate::error::OntologyError;
use metriq_core::Aggregation;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Root of the ontology graph. Immutable after load; share by `Arc` rather
/// than re-loading per prompt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ontology {
    #[serde(default)]
    pub services: HashMap<String, Service>,
    #[serde(default)]
    pub metrics: HashMap<String, Metric>,
    #[serde(default)]
    pub teams: HashMap<String, Team>,
    /// Natural-language token -> canonical view key.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// A deployed service. `team` and `metrics` are weak references resolved by
/// lookup; a dangling metric reference is tolerated (skipped) downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub metrics: Vec<String>,
}

/// Metric kind as declared in the ontology. The set is open; unrecognized
/// kinds deserialize to `Other` rather than failing the load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    #[default]
    Gauge,
    Counter,
    Rate,
    Distribution,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: MetricKind,
    #[serde(default)]
    pub tags: Vec<String>,
    /// View key (e.g. "p99", "avg") -> view definition. BTreeMap keeps the
    /// projection deterministic.
    #[serde(default)]
    pub supports: BTreeMap<String, View>,
}

/// A named way of looking at a metric. `aggregation` deserializes through
/// the backend vocabulary, so an unsupported token fails the ontology load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub aggregation: Aggregation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentiles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "example_query", skip_serializing_if = "Option::is_none")]
    pub example_query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Team {
    #[serde(rename = "on_call", default)]
    pub on_call: String,
    #[serde(default)]
    pub services: Vec<String>,
}

impl Ontology {
    /// Loads the ontology from a YAML document on disk.
    ///
    /// Fails with [`OntologyError::Read`] when the path is unreadable and
    /// [`OntologyError::Parse`] when the document is malformed. There is no
    /// partial-success mode.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| OntologyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let ontology = Self::from_yaml(&raw)?;
        debug!(
            services = ontology.services.len(),
            metrics = ontology.metrics.len(),
            "ontology loaded"
        );
        Ok(ontology)
    }

    /// Parses the ontology from an in-memory YAML document.
    pub fn from_yaml(raw: &str) -> Result<Self, OntologyError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Looks up the team owning a service, if both sides of the weak
    /// reference exist.
    pub fn owning_team(&self, service: &str) -> Option<(&str, &Team)> {
        let svc = self.services.get(service)?;
        let team = self.teams.get(&svc.team)?;
        Some((svc.team.as_str(), team))
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    /// A small but fully-populated ontology used across the crate's tests.
    pub const SAMPLE: &str = r#"
services:
  unicorn:
    description: "Unicorn API service"
    team: platform
    tags:
      env: prod
    metrics:
      - request.dist.time
      - request.dist.errors
      - missing.metric
  pegasus:
    description: "Pegasus worker"
    team: platform
    tags: {}
    metrics:
      - worker.queue.depth
metrics:
  request.dist.time:
    description: "Request latency distribution"
    type: distribution
    tags: [kube_deployment]
    supports:
      p99:
        type: percentile
        aggregation: p99
        percentiles: ["p95", "p99"]
        unit: ms
        example_query: "p99:request.dist.time{kube_deployment:unicorn}"
      avg:
        type: average
        aggregation: avg
        unit: ms
  request.dist.errors:
    description: "Request error count"
    type: counter
    tags: [kube_deployment]
    supports:
      errors:
        type: count
        aggregation: count
        filter: "status:error"
  worker.queue.depth:
    description: "Queue depth"
    type: gauge
    tags: []
    supports:
      avg:
        type: average
        aggregation: avg
teams:
  platform:
    on_call: platform-oncall@example.com
    services: [unicorn, pegasus]
aliases:
  latency: p99
  slow: p99
  errors: errors
"#;
}
