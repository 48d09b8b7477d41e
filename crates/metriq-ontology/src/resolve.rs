//! Ontology-validated resolution.
//!
//! Maps a service name plus a view alias onto a concrete metric/view pair,
//! and scans free prompt text for known service names and aliases. Both
//! scans use a documented deterministic tie-break: longest match first,
//! then lexicographic.

use crate::error::ResolveError;
use crate::model::{Metric, Ontology, View};
use tracing::{debug, instrument};

/// Service and (optional) alias mentioned in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMatch {
    pub service: String,
    pub alias: Option<String>,
}

/// A metric/view pair resolved through the ontology. Borrowed from the
/// ontology; only declared metrics can appear here.
#[derive(Debug, Clone)]
pub struct ResolvedView<'a> {
    pub metric_name: &'a str,
    pub view_key: &'a str,
    pub metric: &'a Metric,
    pub view: &'a View,
}

impl Ontology {
    /// Resolves a service name and view alias to the first declared metric
    /// of that service supporting the aliased view.
    ///
    /// Lookup order follows the service's metric list as declared; the error
    /// variant identifies which lookup failed (alias, service, or view).
    #[instrument(skip(self))]
    pub fn resolve_view<'a>(
        &'a self,
        service_name: &str,
        alias: &str,
    ) -> Result<ResolvedView<'a>, ResolveError> {
        let alias_key = alias.to_lowercase();
        let view_key = self
            .aliases
            .get(&alias_key)
            .ok_or_else(|| ResolveError::AliasNotFound(alias.to_string()))?;

        let service = self
            .services
            .get(service_name)
            .ok_or_else(|| ResolveError::ServiceNotFound(service_name.to_string()))?;

        for metric_name in &service.metrics {
            let Some(metric) = self.metrics.get(metric_name) else {
                // Dangling reference; skip, same as the projector.
                continue;
            };
            if let Some((key, view)) = metric.supports.get_key_value(view_key) {
                debug!(metric = %metric_name, view = %key, "resolved view");
                return Ok(ResolvedView {
                    metric_name,
                    view_key: key,
                    metric,
                    view,
                });
            }
        }

        Err(ResolveError::ViewNotSupported {
            service: service_name.to_string(),
            view: view_key.clone(),
        })
    }

    /// Scans prompt text for a known service name and view alias.
    ///
    /// Matching is case-insensitive substring containment. Candidates are
    /// tried longest first (lexicographic on ties) so that e.g.
    /// "unicorn-api" wins over "unicorn" when both are declared. A missing
    /// alias is tolerated; a missing service is not.
    pub fn match_prompt(&self, prompt: &str) -> Result<PromptMatch, ResolveError> {
        let lower = prompt.to_lowercase();

        let service = first_contained(self.services.keys(), &lower)
            .ok_or_else(|| ResolveError::NoServiceInPrompt(prompt.to_string()))?;
        let alias = first_contained(self.aliases.keys(), &lower);

        Ok(PromptMatch { service, alias })
    }
}

fn first_contained<'a>(
    candidates: impl Iterator<Item = &'a String>,
    haystack: &str,
) -> Option<String> {
    let mut sorted: Vec<&String> = candidates.collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted
        .into_iter()
        .find(|c| haystack.contains(&c.to_lowercase()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_fixtures::SAMPLE;
    use metriq_core::Aggregation;

    fn sample() -> Ontology {
        Ontology::from_yaml(SAMPLE).unwrap()
    }

    #[test]
    fn test_resolve_view_happy_path() {
        let ontology = sample();
        let resolved = ontology.resolve_view("unicorn", "latency").unwrap();

        assert_eq!(resolved.metric_name, "request.dist.time");
        assert_eq!(resolved.view_key, "p99");
        assert_eq!(resolved.view.aggregation, Aggregation::P99);
    }

    #[test]
    fn test_resolve_view_scans_metrics_in_declared_order() {
        let ontology = sample();
        // "errors" is only supported by the second declared metric.
        let resolved = ontology.resolve_view("unicorn", "errors").unwrap();
        assert_eq!(resolved.metric_name, "request.dist.errors");
    }

    #[test]
    fn test_unknown_alias() {
        let err = sample().resolve_view("unicorn", "wibble").unwrap_err();
        assert_eq!(err, ResolveError::AliasNotFound("wibble".to_string()));
    }

    #[test]
    fn test_unknown_service() {
        let err = sample().resolve_view("ghost", "latency").unwrap_err();
        assert_eq!(err, ResolveError::ServiceNotFound("ghost".to_string()));
    }

    #[test]
    fn test_unsupported_view() {
        // pegasus only supports "avg"; the "errors" view resolves but no
        // pegasus metric carries it.
        let err = sample().resolve_view("pegasus", "errors").unwrap_err();
        assert_eq!(
            err,
            ResolveError::ViewNotSupported {
                service: "pegasus".to_string(),
                view: "errors".to_string(),
            }
        );
    }

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        let ontology = sample();
        let resolved = ontology.resolve_view("unicorn", "LATENCY").unwrap();
        assert_eq!(resolved.view_key, "p99");
    }

    #[test]
    fn test_match_prompt_finds_service_and_alias() {
        let matched = sample()
            .match_prompt("How slow is Unicorn right now?")
            .unwrap();
        assert_eq!(matched.service, "unicorn");
        assert_eq!(matched.alias.as_deref(), Some("slow"));
    }

    #[test]
    fn test_match_prompt_without_alias() {
        let matched = sample().match_prompt("tell me about pegasus").unwrap();
        assert_eq!(matched.service, "pegasus");
        assert_eq!(matched.alias, None);
    }

    #[test]
    fn test_match_prompt_no_service() {
        let err = sample().match_prompt("how is the weather").unwrap_err();
        assert!(matches!(err, ResolveError::NoServiceInPrompt(_)));
    }

    #[test]
    fn test_match_prompt_prefers_longest_name() {
        let doc = r#"
services:
  unicorn:
    team: platform
  unicorn-api:
    team: platform
"#;
        let ontology = Ontology::from_yaml(doc).unwrap();
        let matched = ontology
            .match_prompt("p99 latency for unicorn-api please")
            .unwrap();
        assert_eq!(matched.service, "unicorn-api");
    }
}
