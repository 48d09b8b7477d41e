//! Query compilation.
//!
//! Deterministically converts a resolved [`MetricQuery`] plus a relative
//! time window into the backend's query-string dialect and UNIX-second
//! bounds. Compilation never fails; an unparseable window degrades to the
//! default one-hour lookback, matching the resolver's philosophy.

use chrono::{DateTime, Duration, Utc};
use metriq_core::{CompiledQuery, MetricQuery};
use tracing::warn;

/// Builds the backend query string: `<aggregation>:<metric>{k:v,...}`.
///
/// Canonical empty-filter form: the braces are omitted entirely
/// (`"avg:my.metric"`, never `"avg:my.metric{}"`). Filters render in key
/// order; ordering is semantics-neutral for the backend but deterministic
/// for tests.
pub fn build_query_string(query: &MetricQuery) -> String {
    if query.filters.is_empty() {
        return format!("{}:{}", query.aggregation, query.metric);
    }

    let tags: Vec<String> = query
        .filters
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect();
    format!("{}:{}{{{}}}", query.aggregation, query.metric, tags.join(","))
}

/// Compiles a resolved query against a reference instant.
///
/// `to` is `now`; `from` is `now` minus the parsed time window, falling
/// back to one hour when the window string does not parse.
pub fn compile(query: &MetricQuery, now: DateTime<Utc>) -> CompiledQuery {
    let window = match humantime::parse_duration(&query.time_window) {
        Ok(duration) => {
            Duration::from_std(duration).unwrap_or_else(|_| Duration::hours(1))
        }
        Err(err) => {
            warn!(window = %query.time_window, %err, "unparseable time window, defaulting to 1h");
            Duration::hours(1)
        }
    };

    CompiledQuery {
        query: build_query_string(query),
        from: (now - window).timestamp(),
        to: now.timestamp(),
    }
}
