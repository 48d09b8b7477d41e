//! Grounding-context projection.
//!
//! Derives the reduced, translator-safe view of the ontology: only the
//! fields relevant to query construction, serialized as a canonical JSON
//! document wrapped as `{"services": [...]}`. Dangling metric references
//! are skipped silently so that grounding-context generation never fails.

use crate::model::{MetricKind, Ontology, View};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Reduced projection of the ontology, built fresh per prompt.
///
/// Services are emitted in lexicographic order and metrics in the order the
/// service declares them, so the output is deterministic and snapshot-safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedContext {
    pub services: Vec<ProjectedService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedService {
    pub name: String,
    pub team: String,
    pub tags: BTreeMap<String, String>,
    pub metrics: Vec<ProjectedMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedMetric {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    pub supports: BTreeMap<String, View>,
}

impl ProjectedContext {
    /// Projects the ontology into grounding context.
    pub fn project(ontology: &Ontology) -> Self {
        let mut names: Vec<&String> = ontology.services.keys().collect();
        names.sort();

        let mut services = Vec::with_capacity(names.len());
        for name in names {
            let svc = &ontology.services[name];

            let mut metrics = Vec::with_capacity(svc.metrics.len());
            for metric_name in &svc.metrics {
                let Some(metric) = ontology.metrics.get(metric_name) else {
                    debug!(service = %name, metric = %metric_name, "skipping dangling metric reference");
                    continue;
                };
                metrics.push(ProjectedMetric {
                    name: metric_name.clone(),
                    kind: metric.kind,
                    supports: metric.supports.clone(),
                });
            }

            services.push(ProjectedService {
                name: name.clone(),
                team: svc.team.clone(),
                tags: svc.tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                metrics,
            });
        }

        Self { services }
    }

    /// Serializes the projection as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
