//! Alert enrichment engine.
//!
//! Classifies every panel record against two anomaly signals computed
//! from its own area's history: a spike above a rolling baseline, and a
//! strictly increasing three-month trend. Pure function of
//! `(records, threshold)`.

use indexmap::IndexMap;
use theft_watch_panel_models::{AlertLevel, EnrichedRecord, PanelRecord};

/// Maximum number of preceding months contributing to the baseline.
pub const BASELINE_WINDOW: usize = 6;

/// Minimum number of present risk values the window must contain for the
/// baseline to be defined.
pub const MIN_BASELINE_SAMPLES: usize = 3;

/// Enriches panel records with anomaly signals and alert levels.
///
/// Records are grouped by `area_id` in order of first appearance in the
/// input; within each group they are emitted sorted ascending by month;
/// groups are concatenated in first-appearance order. Output cardinality
/// equals input cardinality, so the output order is deterministic given
/// the input order (but equals it only if the input was already
/// area-grouped and time-sorted).
///
/// `threshold` is the spike sensitivity as a normalized fraction: a
/// record spikes when its risk index exceeds the baseline by more than
/// `threshold × baseline`, strictly.
///
/// Empty input yields empty output.
#[must_use]
pub fn enrich_records(records: &[PanelRecord], threshold: f64) -> Vec<EnrichedRecord> {
    let mut groups: IndexMap<&str, Vec<&PanelRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.area_id.as_str())
            .or_default()
            .push(record);
    }
    let area_count = groups.len();

    let mut enriched = Vec::with_capacity(records.len());
    for mut group in groups.into_values() {
        group.sort_by(|a, b| a.month.cmp(&b.month));

        let risks: Vec<Option<f64>> = group.iter().map(|r| r.risk_index).collect();

        for (t, record) in group.into_iter().enumerate() {
            let baseline = trailing_baseline(&risks[..t]);
            let alert_spike = match (baseline, record.risk_index) {
                (Some(base), Some(current)) => current > base * (1.0 + threshold),
                _ => false,
            };
            let alert_trend3 = rising_three(&risks[..=t]);

            enriched.push(EnrichedRecord {
                panel: record.clone(),
                alert_spike,
                alert_trend3,
                alert_level: AlertLevel::from_signals(alert_spike, alert_trend3),
            });
        }
    }

    log::debug!(
        "Enriched {} records across {area_count} areas at threshold {threshold}",
        enriched.len()
    );

    enriched
}

/// Arithmetic mean of the present risk values in the up-to-6 trailing
/// months, or `None` when fewer than [`MIN_BASELINE_SAMPLES`] are
/// present — too little history to judge a spike against.
fn trailing_baseline(history: &[Option<f64>]) -> Option<f64> {
    let start = history.len().saturating_sub(BASELINE_WINDOW);
    let samples: Vec<f64> = history[start..].iter().copied().flatten().collect();
    if samples.len() < MIN_BASELINE_SAMPLES {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Whether the last three entries are all present and strictly
/// increasing. A missing value at either of the two preceding positions
/// breaks the chain — this is a strict consecutive-three check, not
/// "last three present values".
fn rising_three(history_through_current: &[Option<f64>]) -> bool {
    let [.., a, b, c] = history_through_current else {
        return false;
    };
    matches!((a, b, c), (Some(x), Some(y), Some(z)) if x < y && y < z)
}
