//! Wire models for the backend's query response.

use serde::{Deserialize, Serialize};

/// Response body of the time-series query endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub series: Vec<Series>,
}

/// A single time series. Points are `[epoch_seconds, value]` pairs in
/// chronological order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub metric: String,
    #[serde(default)]
    pub pointlist: Vec<(f64, f64)>,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub display_name: String,
}
