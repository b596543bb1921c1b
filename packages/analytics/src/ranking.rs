//! Top-N ranking selector.
//!
//! Ranks enriched or delta records by a chosen metric, optionally
//! restricted to alerting areas. Sorting is stable, so records with
//! equal metric values keep their relative input order.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use theft_watch_panel_models::{AlertLevel, DeltaRecord, EnrichedRecord};

/// Number of records the selector returns at most.
pub const TOP_N: usize = 10;

/// Metric a record set can be ranked by.
///
/// Current metrics apply to enriched records, delta metrics to delta
/// records; asking a record for a metric it does not carry yields no
/// value and excludes it from the ranking.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RankMetric {
    /// Current-month normalized risk index.
    RiskIndex,
    /// Current-month theft count.
    TheftCount,
    /// Risk index change between two compared months.
    DeltaRiskIndex,
    /// Theft count change between two compared months.
    DeltaCount,
}

impl RankMetric {
    /// Whether this metric lives on delta records rather than enriched
    /// records.
    #[must_use]
    pub const fn is_delta(self) -> bool {
        matches!(self, Self::DeltaRiskIndex | Self::DeltaCount)
    }
}

/// A record the selector can rank.
pub trait Rankable {
    /// Value of the given metric on this record, if the record carries
    /// it and it is present.
    fn metric_value(&self, metric: RankMetric) -> Option<f64>;

    /// Alert level used by the alerts-only filter.
    fn alert_level(&self) -> AlertLevel;
}

impl Rankable for EnrichedRecord {
    fn metric_value(&self, metric: RankMetric) -> Option<f64> {
        match metric {
            RankMetric::RiskIndex => self.panel.risk_index,
            #[allow(clippy::cast_precision_loss)]
            RankMetric::TheftCount => Some(self.panel.theft_count as f64),
            RankMetric::DeltaRiskIndex | RankMetric::DeltaCount => None,
        }
    }

    fn alert_level(&self) -> AlertLevel {
        self.alert_level
    }
}

impl Rankable for DeltaRecord {
    fn metric_value(&self, metric: RankMetric) -> Option<f64> {
        match metric {
            RankMetric::DeltaRiskIndex => self.delta_risk_index,
            #[allow(clippy::cast_precision_loss)]
            RankMetric::DeltaCount => Some(self.delta_count as f64),
            RankMetric::RiskIndex | RankMetric::TheftCount => None,
        }
    }

    fn alert_level(&self) -> AlertLevel {
        self.alert_level
    }
}

/// Returns the top [`TOP_N`] records by descending metric value.
///
/// Records whose metric value is absent or NaN are discarded; with
/// `alerts_only`, records whose alert level is `none` are discarded as
/// well. The sort is stable — ties keep their relative input order —
/// and the input slice is left untouched.
#[must_use]
pub fn top_records<T>(records: &[T], metric: RankMetric, alerts_only: bool) -> Vec<T>
where
    T: Rankable + Clone,
{
    let mut ranked: Vec<(f64, &T)> = records
        .iter()
        .filter_map(|record| {
            record
                .metric_value(metric)
                .filter(|value| !value.is_nan())
                .map(|value| (value, record))
        })
        .filter(|(_, record)| !alerts_only || record.alert_level().is_alerting())
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.truncate(TOP_N);
    ranked.into_iter().map(|(_, record)| record.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use theft_watch_panel_models::PanelRecord;

    fn enriched(area: &str, risk: Option<f64>, level: AlertLevel) -> EnrichedRecord {
        EnrichedRecord {
            panel: PanelRecord {
                area_id: area.to_string(),
                area_name: None,
                month: "2025-01".to_string(),
                theft_count: 3,
                exposure: 1000.0,
                risk_index: risk,
                stability_flag: false,
                extra: std::collections::BTreeMap::new(),
            },
            alert_spike: level.is_alerting(),
            alert_trend3: false,
            alert_level: level,
        }
    }

    fn delta(area: &str, delta_count: i64) -> DeltaRecord {
        DeltaRecord {
            area_id: area.to_string(),
            area_name: None,
            delta_risk_index: None,
            delta_count,
            risk_index_a: None,
            risk_index_b: None,
            theft_count_a: 0,
            theft_count_b: 0,
            alert_level: AlertLevel::None,
            stability_flag: false,
        }
    }

    #[test]
    fn truncates_to_ten() {
        let records: Vec<EnrichedRecord> = (0..25)
            .map(|i| enriched(&format!("a{i}"), Some(f64::from(i)), AlertLevel::None))
            .collect();

        let top = top_records(&records, RankMetric::RiskIndex, false);
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0].panel.area_id, "a24");
    }

    #[test]
    fn sorted_descending() {
        let records = vec![
            enriched("low", Some(0.5), AlertLevel::None),
            enriched("high", Some(3.0), AlertLevel::None),
            enriched("mid", Some(1.5), AlertLevel::None),
        ];

        let top = top_records(&records, RankMetric::RiskIndex, false);
        let ids: Vec<&str> = top
            .iter()
            .map(|r| r.panel.area_id.as_str())
            .collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn discards_missing_and_nan_metrics() {
        let records = vec![
            enriched("present", Some(1.0), AlertLevel::None),
            enriched("missing", None, AlertLevel::None),
            enriched("nan", Some(f64::NAN), AlertLevel::None),
        ];

        let top = top_records(&records, RankMetric::RiskIndex, false);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].panel.area_id, "present");
    }

    #[test]
    fn alerts_only_excludes_quiet_areas() {
        let records = vec![
            enriched("quiet", Some(9.0), AlertLevel::None),
            enriched("watched", Some(1.0), AlertLevel::Watch),
            enriched("warned", Some(2.0), AlertLevel::Warning),
        ];

        let top = top_records(&records, RankMetric::RiskIndex, true);
        let ids: Vec<&str> = top
            .iter()
            .map(|r| r.panel.area_id.as_str())
            .collect();
        assert_eq!(ids, vec!["warned", "watched"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            enriched("first", Some(1.0), AlertLevel::None),
            enriched("second", Some(1.0), AlertLevel::None),
            enriched("third", Some(1.0), AlertLevel::None),
        ];

        let top = top_records(&records, RankMetric::RiskIndex, false);
        let ids: Vec<&str> = top
            .iter()
            .map(|r| r.panel.area_id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn current_metric_yields_nothing_on_delta_records() {
        let records = vec![delta("a", 5), delta("b", -2)];
        assert!(top_records(&records, RankMetric::RiskIndex, false).is_empty());
    }

    #[test]
    fn delta_records_rank_by_delta_count() {
        let records = vec![delta("a", 5), delta("b", 12), delta("c", -2)];
        let ids: Vec<String> = top_records(&records, RankMetric::DeltaCount, false)
            .into_iter()
            .map(|d| d.area_id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn metric_names_parse_from_query_strings() {
        assert_eq!(
            "riskIndex".parse::<RankMetric>().unwrap(),
            RankMetric::RiskIndex
        );
        assert_eq!(
            "deltaRiskIndex".parse::<RankMetric>().unwrap(),
            RankMetric::DeltaRiskIndex
        );
        assert!("riskindex".parse::<RankMetric>().is_err());
        assert!(RankMetric::DeltaCount.is_delta());
        assert!(!RankMetric::TheftCount.is_delta());
    }
}
