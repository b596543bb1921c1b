//! Two-month comparison engine.
//!
//! Collapses the enriched panel onto one delta record per area for an
//! arbitrary `(month A, month B)` pair. Areas present at either month
//! contribute a record; the side an area is missing from is defaulted —
//! counts to 0, risk values to `None`, so a missing risk value is never
//! reported as "no change".

use indexmap::IndexMap;
use theft_watch_panel_models::{AlertLevel, DeltaRecord, EnrichedRecord};

/// Builds one [`DeltaRecord`] per area in the union of areas present at
/// `month_a` and `month_b`, in first-appearance order over `records`.
///
/// Comparing a month against itself returns an empty set: a degenerate
/// self-comparison would otherwise yield all-zero deltas that read as
/// "confirmed no change".
#[must_use]
pub fn compare_months(
    records: &[EnrichedRecord],
    month_a: &str,
    month_b: &str,
) -> Vec<DeltaRecord> {
    if month_a == month_b {
        return Vec::new();
    }

    let mut areas: IndexMap<&str, (Option<&EnrichedRecord>, Option<&EnrichedRecord>)> =
        IndexMap::new();
    for record in records {
        if record.panel.month == month_a {
            areas.entry(record.panel.area_id.as_str()).or_default().0 = Some(record);
        } else if record.panel.month == month_b {
            areas.entry(record.panel.area_id.as_str()).or_default().1 = Some(record);
        }
    }

    areas
        .into_iter()
        .map(|(area_id, (a, b))| delta_for_area(area_id, a, b))
        .collect()
}

fn delta_for_area(
    area_id: &str,
    a: Option<&EnrichedRecord>,
    b: Option<&EnrichedRecord>,
) -> DeltaRecord {
    let risk_a = a.and_then(|r| r.panel.risk_index);
    let risk_b = b.and_then(|r| r.panel.risk_index);
    let count_a = a.map_or(0, |r| r.panel.theft_count);
    let count_b = b.map_or(0, |r| r.panel.theft_count);

    let delta_risk_index = match (risk_a, risk_b) {
        (Some(ra), Some(rb)) => Some(round4(rb - ra)),
        _ => None,
    };

    #[allow(clippy::cast_possible_wrap)]
    let delta_count = count_b as i64 - count_a as i64;

    DeltaRecord {
        area_id: area_id.to_string(),
        area_name: a
            .and_then(|r| r.panel.area_name.clone())
            .or_else(|| b.and_then(|r| r.panel.area_name.clone())),
        delta_risk_index,
        delta_count,
        risk_index_a: risk_a,
        risk_index_b: risk_b,
        theft_count_a: count_a,
        theft_count_b: count_b,
        alert_level: b.map_or(AlertLevel::None, |r| r.alert_level),
        stability_flag: b.is_some_and(|r| r.panel.stability_flag),
    }
}

/// Rounds to 4 decimal places, half away from zero.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use theft_watch_panel_models::PanelRecord;

    fn enriched(
        area: &str,
        name: Option<&str>,
        month: &str,
        count: u64,
        risk: Option<f64>,
        level: AlertLevel,
    ) -> EnrichedRecord {
        EnrichedRecord {
            panel: PanelRecord {
                area_id: area.to_string(),
                area_name: name.map(str::to_string),
                month: month.to_string(),
                theft_count: count,
                exposure: 1000.0,
                risk_index: risk,
                stability_flag: level == AlertLevel::Warning,
                extra: std::collections::BTreeMap::new(),
            },
            alert_spike: level.is_alerting(),
            alert_trend3: level == AlertLevel::Warning,
            alert_level: level,
        }
    }

    #[test]
    fn self_comparison_returns_empty() {
        let records = vec![enriched(
            "a",
            None,
            "2025-01",
            5,
            Some(1.0),
            AlertLevel::None,
        )];
        assert!(compare_months(&records, "2025-01", "2025-01").is_empty());
    }

    #[test]
    fn area_only_in_b_gets_defaulted_a_side() {
        let records = vec![enriched(
            "a",
            Some("Harbor"),
            "2025-02",
            7,
            Some(1.4),
            AlertLevel::Watch,
        )];

        let deltas = compare_months(&records, "2025-01", "2025-02");
        assert_eq!(deltas.len(), 1);
        let delta = &deltas[0];
        assert_eq!(delta.theft_count_a, 0);
        assert_eq!(delta.risk_index_a, None);
        assert_eq!(delta.delta_risk_index, None);
        assert_eq!(delta.delta_count, 7);
        assert_eq!(delta.alert_level, AlertLevel::Watch);
    }

    #[test]
    fn area_only_in_a_defaults_b_side_fields() {
        let records = vec![enriched(
            "a",
            Some("Harbor"),
            "2025-01",
            4,
            Some(2.0),
            AlertLevel::Warning,
        )];

        let deltas = compare_months(&records, "2025-01", "2025-02");
        let delta = &deltas[0];
        assert_eq!(delta.theft_count_b, 0);
        assert_eq!(delta.delta_count, -4);
        assert_eq!(delta.delta_risk_index, None);
        assert_eq!(delta.alert_level, AlertLevel::None);
        assert!(!delta.stability_flag);
    }

    #[test]
    fn delta_rounds_to_four_decimals() {
        let records = vec![
            enriched("a", None, "2025-01", 1, Some(2.0), AlertLevel::None),
            enriched("a", None, "2025-02", 2, Some(2.333_333), AlertLevel::None),
        ];

        let deltas = compare_months(&records, "2025-01", "2025-02");
        let delta = deltas[0].delta_risk_index.unwrap();
        assert!((delta - 0.3333).abs() < 1e-9);
    }

    #[test]
    fn area_name_prefers_a_then_falls_back_to_b() {
        let records = vec![
            enriched("a", None, "2025-01", 1, Some(1.0), AlertLevel::None),
            enriched("a", Some("Harbor"), "2025-02", 1, Some(1.0), AlertLevel::None),
            enriched("b", Some("Docks"), "2025-01", 1, Some(1.0), AlertLevel::None),
            enriched("b", Some("Renamed"), "2025-02", 1, Some(1.0), AlertLevel::None),
        ];

        let deltas = compare_months(&records, "2025-01", "2025-02");
        assert_eq!(deltas[0].area_name.as_deref(), Some("Harbor"));
        assert_eq!(deltas[1].area_name.as_deref(), Some("Docks"));
    }

    #[test]
    fn union_follows_first_appearance_order() {
        let records = vec![
            enriched("c", None, "2025-02", 1, None, AlertLevel::None),
            enriched("a", None, "2025-01", 1, None, AlertLevel::None),
            enriched("b", None, "2025-02", 1, None, AlertLevel::None),
            enriched("a", None, "2025-02", 1, None, AlertLevel::None),
        ];

        let ids: Vec<String> = compare_months(&records, "2025-01", "2025-02")
            .into_iter()
            .map(|d| d.area_id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn round4_half_rounds_away_from_zero() {
        assert!((round4(0.000_05) - 0.0001).abs() < 1e-12);
        assert!((round4(-0.000_05) + 0.0001).abs() < 1e-12);
        assert!((round4(1.234_549) - 1.2345).abs() < 1e-12);
    }
}
