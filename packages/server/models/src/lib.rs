#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the theft panel server.
//!
//! These types describe the query-string contract of each endpoint and
//! are separate from the engine record types so the API surface can
//! evolve independently.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the panel endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelQueryParams {
    /// Spike sensitivity as a normalized fraction (defaults server-side).
    pub threshold: Option<f64>,
    /// Narrow the response to one month's slice. Enrichment always runs
    /// over the full history first.
    pub month: Option<String>,
}

/// Query parameters for the compare endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareQueryParams {
    /// Earlier comparison month (`YYYY-MM`).
    pub month_a: String,
    /// Later comparison month (`YYYY-MM`).
    pub month_b: String,
    /// Spike sensitivity as a normalized fraction (defaults server-side).
    pub threshold: Option<f64>,
}

/// Query parameters for the top-10 endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopQueryParams {
    /// Metric name to rank by (`riskIndex`, `theftCount`,
    /// `deltaRiskIndex`, `deltaCount`).
    pub metric: String,
    /// Month to rank, required for current metrics.
    pub month: Option<String>,
    /// Earlier comparison month, required for delta metrics.
    pub month_a: Option<String>,
    /// Later comparison month, required for delta metrics.
    pub month_b: Option<String>,
    /// Spike sensitivity as a normalized fraction (defaults server-side).
    pub threshold: Option<f64>,
    /// Restrict the ranking to alerting areas.
    pub alerts_only: Option<bool>,
}
