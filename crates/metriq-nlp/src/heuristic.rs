//! Heuristic prompt resolution.
//!
//! Pure, ordered keyword matching with no external calls. The three axes
//! (aggregation, metric, filters) and the time window are independent;
//! within each axis the first match wins. This resolver is total: whatever
//! the prompt, it returns a best-effort query with documented defaults.

use lazy_static::lazy_static;
use metriq_core::{Aggregation, MetricQuery};
use metriq_ontology::Ontology;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::trace;

/// Default time window applied when no time phrase matched.
pub const DEFAULT_TIME_WINDOW: &str = "1h";

/// Aggregation keywords in precedence order; first match wins.
const AGGREGATION_KEYWORDS: &[(&[&str], Aggregation)] = &[
    (&["p99", "99th"], Aggregation::P99),
    (&["p95", "95th"], Aggregation::P95),
    (&["average", "avg"], Aggregation::Avg),
    (&["sum"], Aggregation::Sum),
    (&["count"], Aggregation::Count),
    (&["max"], Aggregation::Max),
    (&["min"], Aggregation::Min),
];

/// Metric keywords in precedence order. An empty result means "no metric
/// identified"; callers check [`MetricQuery::has_metric`].
const METRIC_KEYWORDS: &[(&[&str], &str)] = &[
    (&["latency", "response time"], "request.dist.time"),
    (
        &["error rate", "error count", "errors"],
        "request.dist.errors",
    ),
    (
        &["throughput", "requests per second", "rps"],
        "request.dist.time",
    ),
];

enum WindowRule {
    /// Capture group 1 is a count; suffix is the duration unit.
    Scaled(&'static str),
    /// Fixed duration string.
    Fixed(&'static str),
}

lazy_static! {
    /// Time-window phrases in priority order; first pattern that matches
    /// wins.
    static ref WINDOW_PATTERNS: Vec<(Regex, WindowRule)> = vec![
        (
            Regex::new(r"(?:last|past)\s+(\d+)\s+minutes?").unwrap(),
            WindowRule::Scaled("m"),
        ),
        (
            Regex::new(r"(?:last|past)\s+(\d+)\s+hours?").unwrap(),
            WindowRule::Scaled("h"),
        ),
        (Regex::new(r"last\s+hour").unwrap(), WindowRule::Fixed("1h")),
        (Regex::new(r"last\s+day").unwrap(), WindowRule::Fixed("24h")),
        (Regex::new(r"last\s+minute").unwrap(), WindowRule::Fixed("1m")),
    ];
}

/// Extracts a duration string ("15m", "2h", ...) from a lower-cased prompt.
pub fn extract_time_window(prompt: &str) -> Option<String> {
    for (pattern, rule) in WINDOW_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(prompt) {
            let window = match rule {
                WindowRule::Scaled(unit) => format!("{}{}", &captures[1], unit),
                WindowRule::Fixed(fixed) => (*fixed).to_string(),
            };
            return Some(window);
        }
    }
    None
}

/// A prompt token mapped onto a backend tag filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTarget {
    pub token: String,
    pub tag_key: String,
    pub tag_value: String,
}

impl FilterTarget {
    pub fn deployment(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            token: name.to_lowercase(),
            tag_key: "kube_deployment".to_string(),
            tag_value: name,
        }
    }
}

/// Deterministic keyword-based resolver.
///
/// The filter table is data-driven rather than hard-coded: it can be seeded
/// from the ontology's service list so that any declared service name in a
/// prompt becomes a deployment filter.
#[derive(Debug, Clone)]
pub struct HeuristicResolver {
    targets: Vec<FilterTarget>,
}

impl HeuristicResolver {
    /// Resolver with the built-in deployment table.
    pub fn new() -> Self {
        Self::with_targets(vec![FilterTarget::deployment("unicorn")])
    }

    /// Resolver with an explicit filter table. Targets are matched longest
    /// token first so overlapping names resolve deterministically.
    pub fn with_targets(mut targets: Vec<FilterTarget>) -> Self {
        targets.sort_by(|a, b| {
            b.token
                .len()
                .cmp(&a.token.len())
                .then_with(|| a.token.cmp(&b.token))
        });
        targets.dedup_by(|a, b| a.token == b.token);
        Self { targets }
    }

    /// Resolver whose filter table includes every service declared in the
    /// ontology, on top of the built-in defaults.
    pub fn from_ontology(ontology: &Ontology) -> Self {
        let mut targets: Vec<FilterTarget> = ontology
            .services
            .keys()
            .map(FilterTarget::deployment)
            .collect();
        targets.push(FilterTarget::deployment("unicorn"));
        Self::with_targets(targets)
    }

    /// Resolves a prompt into a best-effort structured query.
    ///
    /// Never fails: unmatched aggregation defaults to `avg`, an unmatched
    /// time phrase defaults to `"1h"`, and an unmatched metric leaves the
    /// name empty for the caller to surface.
    pub fn resolve(&self, prompt: &str) -> MetricQuery {
        let lower = prompt.to_lowercase();

        let aggregation = AGGREGATION_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(_, agg)| *agg)
            .unwrap_or(Aggregation::Avg);

        let metric = METRIC_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(_, metric)| (*metric).to_string())
            .unwrap_or_default();

        let mut filters = BTreeMap::new();
        if let Some(target) = self.targets.iter().find(|t| lower.contains(&t.token)) {
            filters.insert(target.tag_key.clone(), target.tag_value.clone());
        }

        let time_window =
            extract_time_window(&lower).unwrap_or_else(|| DEFAULT_TIME_WINDOW.to_string());

        trace!(%metric, %aggregation, %time_window, "heuristic resolution");

        MetricQuery {
            metric,
            aggregation,
            filters,
            time_window,
        }
    }
}

impl Default for HeuristicResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p99_latency_prompt() {
        let query = HeuristicResolver::new()
            .resolve("99th percentile latency for unicorn over the last 15 minutes");

        assert_eq!(query.metric, "request.dist.time");
        assert_eq!(query.aggregation, Aggregation::P99);
        assert_eq!(
            query.filters.get("kube_deployment"),
            Some(&"unicorn".to_string())
        );
        assert_eq!(query.time_window, "15m");
    }

    #[test]
    fn test_avg_latency_default_window() {
        let query = HeuristicResolver::new().resolve("avg latency for unicorn");

        assert_eq!(query.metric, "request.dist.time");
        assert_eq!(query.aggregation, Aggregation::Avg);
        assert_eq!(
            query.filters.get("kube_deployment"),
            Some(&"unicorn".to_string())
        );
        assert_eq!(query.time_window, "1h");
    }

    #[test]
    fn test_aggregation_defaults_to_avg() {
        let query = HeuristicResolver::new().resolve("latency for unicorn");
        assert_eq!(query.aggregation, Aggregation::Avg);
    }

    #[test]
    fn test_p99_beats_later_keywords() {
        // "count" also appears, but p99 is earlier in the precedence order.
        let query = HeuristicResolver::new().resolve("p99 error count for unicorn");
        assert_eq!(query.aggregation, Aggregation::P99);
    }

    #[test]
    fn test_error_metric() {
        let query = HeuristicResolver::new().resolve("error rate for unicorn last hour");
        assert_eq!(query.metric, "request.dist.errors");
        assert_eq!(query.time_window, "1h");
    }

    #[test]
    fn test_rps_maps_to_time_metric() {
        let query = HeuristicResolver::new().resolve("rps for unicorn");
        assert_eq!(query.metric, "request.dist.time");
    }

    #[test]
    fn test_unmatched_metric_is_empty() {
        let query = HeuristicResolver::new().resolve("how is unicorn doing");
        assert!(!query.has_metric());
    }

    #[test]
    fn test_time_window_phrases() {
        let cases = [
            ("past 30 minutes", "30m"),
            ("last 2 hours", "2h"),
            ("last hour", "1h"),
            ("last day", "24h"),
            ("last minute", "1m"),
            ("no time phrase here", "1h"),
        ];
        let resolver = HeuristicResolver::new();
        for (phrase, expected) in cases {
            let query = resolver.resolve(&format!("latency {phrase}"));
            assert_eq!(query.time_window, expected, "phrase: {phrase}");
        }
    }

    #[test]
    fn test_filters_from_ontology_services() {
        let ontology = metriq_ontology::Ontology::from_yaml(
            "services:\n  pegasus:\n    team: platform\n",
        )
        .unwrap();
        let resolver = HeuristicResolver::from_ontology(&ontology);

        let query = resolver.resolve("avg latency for pegasus");
        assert_eq!(
            query.filters.get("kube_deployment"),
            Some(&"pegasus".to_string())
        );

        // Built-in default is retained.
        let query = resolver.resolve("avg latency for unicorn");
        assert_eq!(
            query.filters.get("kube_deployment"),
            Some(&"unicorn".to_string())
        );
    }

    #[test]
    fn test_longest_filter_token_wins() {
        let resolver = HeuristicResolver::with_targets(vec![
            FilterTarget::deployment("unicorn"),
            FilterTarget::deployment("unicorn-api"),
        ]);
        let query = resolver.resolve("latency for unicorn-api");
        assert_eq!(
            query.filters.get("kube_deployment"),
            Some(&"unicorn-api".to_string())
        );
    }

    #[test]
    fn test_resolution_is_total() {
        let query = HeuristicResolver::new().resolve("");
        assert_eq!(query.aggregation, Aggregation::Avg);
        assert_eq!(query.time_window, "1h");
        assert!(query.filters.is_empty());
        assert!(!query.has_metric());
    }
}
