#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Panel record types and alert level definitions.
//!
//! This crate defines the canonical record vocabulary shared across the
//! theft-watch system: the immutable month×area input records produced by
//! the upstream pipeline, the derived alert-enriched records, and the
//! synthetic two-month comparison records. All types are value objects
//! with camelCase JSON wire names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Alert classification for a single area-month.
///
/// Derived exclusively from the two anomaly signals via
/// [`AlertLevel::from_signals`] — one level per number of firing signals.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AlertLevel {
    /// Neither anomaly signal fired.
    #[default]
    None,
    /// Exactly one anomaly signal fired.
    Watch,
    /// Both anomaly signals fired.
    Warning,
}

impl AlertLevel {
    /// Classifies an area-month from its two anomaly signals.
    #[must_use]
    pub const fn from_signals(spike: bool, trend3: bool) -> Self {
        match (spike, trend3) {
            (false, false) => Self::None,
            (true, false) | (false, true) => Self::Watch,
            (true, true) => Self::Warning,
        }
    }

    /// Returns `true` for any level above [`AlertLevel::None`].
    #[must_use]
    pub const fn is_alerting(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One area's metrics for one month, as produced by the upstream pipeline.
///
/// At most one record exists per `(area_id, month)`. The `month` string is
/// `YYYY-MM`, so lexicographic order is chronological order. A missing
/// `risk_index` means "no data" and is distinct from zero everywhere
/// downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRecord {
    /// Stable area identifier.
    pub area_id: String,
    /// Human-readable area name.
    pub area_name: Option<String>,
    /// Month in `YYYY-MM` form.
    pub month: String,
    /// Theft incidents recorded in this area-month.
    pub theft_count: u64,
    /// Exposure denominator used to normalize the risk index (e.g.
    /// registered vehicles). Always positive in valid data.
    pub exposure: f64,
    /// Normalized risk metric, or `None` when the upstream pipeline had
    /// no data for this area-month.
    pub risk_index: Option<f64>,
    /// Set upstream when `exposure` is too small for `risk_index` to be
    /// statistically stable.
    #[serde(default)]
    pub stability_flag: bool,
    /// Source-specific fields preserved verbatim for the frontend.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A [`PanelRecord`] plus its derived anomaly signals and alert level.
///
/// Wholly derived — recomputed in full on every engine invocation and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    /// The input record, flattened into the same JSON object.
    #[serde(flatten)]
    pub panel: PanelRecord,
    /// Current risk index exceeds the rolling baseline by more than the
    /// threshold fraction.
    pub alert_spike: bool,
    /// Three consecutive months of strictly increasing risk index.
    pub alert_trend3: bool,
    /// Classification derived from the two signals.
    pub alert_level: AlertLevel,
}

/// Synthetic per-area comparison of two months' metrics.
///
/// Built fresh for every `(month A, month B)` query. Sides an area is
/// missing from are defaulted: counts to 0, risk values to `None` — a
/// missing risk value is never reported as "no change".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaRecord {
    /// Stable area identifier.
    pub area_id: String,
    /// Area name from month A's record, falling back to month B's.
    pub area_name: Option<String>,
    /// `risk_index` at B minus at A, rounded to 4 decimals; `None` unless
    /// both sides are present.
    pub delta_risk_index: Option<f64>,
    /// `theft_count` at B minus at A, with missing sides counted as 0.
    pub delta_count: i64,
    /// Risk index at month A, if present.
    pub risk_index_a: Option<f64>,
    /// Risk index at month B, if present.
    pub risk_index_b: Option<f64>,
    /// Theft count at month A (0 when the area is missing at A).
    pub theft_count_a: u64,
    /// Theft count at month B (0 when the area is missing at B).
    pub theft_count_b: u64,
    /// Alert level of month B's record, `none` when B is absent.
    pub alert_level: AlertLevel,
    /// Stability flag of month B's record, `false` when B is absent.
    pub stability_flag: bool,
}
