//! One-line result summaries.
//!
//! Only the first series is consulted; multi-series responses are not
//! aggregated. This is a documented limitation of the summary surface, not
//! of the backend client.

use crate::models::QueryResult;
use chrono::DateTime;

/// Fixed message for a response with no series.
pub const NO_DATA_MESSAGE: &str = "No data found for the given query";

/// Fixed message for a first series with no points.
pub const NO_POINTS_MESSAGE: &str = "No data points found for the given query";

/// Renders the chronologically last point of the first series.
pub fn summarize(result: &QueryResult, unit: &str) -> String {
    let Some(series) = result.series.first() else {
        return NO_DATA_MESSAGE.to_string();
    };
    let Some((ts, value)) = series.pointlist.last() else {
        return NO_POINTS_MESSAGE.to_string();
    };

    let name = if series.display_name.is_empty() {
        &series.metric
    } else {
        &series.display_name
    };
    let timestamp = DateTime::from_timestamp(*ts as i64, 0)
        .map(|dt| dt.format("%d %b %Y %H:%M UTC").to_string())
        .unwrap_or_else(|| format!("@{ts}"));

    format!("{name} ({}) at {timestamp}: {value:.2} {unit}", series.expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Series;

    fn series_with(points: Vec<(f64, f64)>) -> QueryResult {
        QueryResult {
            series: vec![Series {
                metric: "request.dist.time".to_string(),
                pointlist: points,
                scope: "kube_deployment:unicorn".to_string(),
                expression: "p99:request.dist.time{kube_deployment:unicorn}".to_string(),
                display_name: "request.dist.time p99".to_string(),
            }],
        }
    }

    #[test]
    fn test_no_series() {
        assert_eq!(summarize(&QueryResult::default(), "ms"), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_no_points() {
        assert_eq!(summarize(&series_with(vec![]), "ms"), NO_POINTS_MESSAGE);
    }

    #[test]
    fn test_last_point_two_decimals() {
        let result = series_with(vec![
            (1_700_000_000.0, 10.0),
            (1_700_000_060.0, 123.456),
        ]);
        let summary = summarize(&result, "ms");

        assert!(summary.contains("123.46 ms"), "summary: {summary}");
        assert!(summary.contains("request.dist.time p99"));
        assert!(summary.contains("p99:request.dist.time{kube_deployment:unicorn}"));
        // 2023-11-14 22:14 UTC
        assert!(summary.contains("14 Nov 2023 22:14 UTC"), "summary: {summary}");
    }

    #[test]
    fn test_falls_back_to_metric_name() {
        let mut result = series_with(vec![(1_700_000_000.0, 1.0)]);
        result.series[0].display_name.clear();
        let summary = summarize(&result, "ms");
        assert!(summary.starts_with("request.dist.time ("));
    }

    #[test]
    fn test_only_first_series_is_consulted() {
        let mut result = series_with(vec![(1_700_000_000.0, 1.0)]);
        result.series.push(Series {
            metric: "ignored".to_string(),
            pointlist: vec![(1_700_000_000.0, 999.0)],
            ..Default::default()
        });
        let summary = summarize(&result, "ms");
        assert!(summary.contains("1.00 ms"));
        assert!(!summary.contains("999"));
    }
}
