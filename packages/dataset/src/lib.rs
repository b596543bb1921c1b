#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static resource loading and validation for the theft panel.
//!
//! Loads the three inputs the system consumes once at startup — the
//! ordered month list, the full panel record array, and the area
//! boundary `GeoJSON` — and enforces the upstream data contract the
//! engines rely on: `YYYY-MM` months in strictly ascending order, at
//! most one record per `(area_id, month)`, and positive exposure. The
//! engines themselves perform no defensive repair, so violations are
//! rejected here rather than propagated.

use std::collections::BTreeSet;
use std::path::Path;

use theft_watch_panel_models::PanelRecord;
use thiserror::Error;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A resource file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON resource could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The boundary `GeoJSON` could not be parsed.
    #[error("GeoJSON parse error: {0}")]
    Geometry(#[from] geojson::Error),

    /// The data violates the upstream contract.
    #[error("Invalid dataset: {message}")]
    Validation {
        /// Description of the violated invariant.
        message: String,
    },
}

fn validation(message: impl Into<String>) -> DatasetError {
    DatasetError::Validation {
        message: message.into(),
    }
}

/// The three static resources, loaded and validated.
///
/// Immutable after load; the engines take the record slice by reference
/// and the boundary `GeoJSON` passes through to the frontend verbatim.
#[derive(Debug)]
pub struct Dataset {
    /// Available months, `YYYY-MM`, strictly ascending.
    pub months: Vec<String>,
    /// The full month×area panel.
    pub records: Vec<PanelRecord>,
    /// Area boundary geometry, used only by rendering.
    pub areas: geojson::GeoJson,
}

impl Dataset {
    /// Loads `months.json`, `panel.json`, and `areas.geojson` from
    /// `dir` and validates the upstream data contract.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if a resource is missing or unparseable,
    /// or if the panel violates the contract (malformed or unsorted
    /// months, duplicate `(area_id, month)` keys, non-positive
    /// exposure, or a record month absent from the month list).
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        let months: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(dir.join("months.json"))?)?;
        validate_months(&months)?;

        let records: Vec<PanelRecord> =
            serde_json::from_str(&std::fs::read_to_string(dir.join("panel.json"))?)?;
        validate_records(&records, &months)?;

        let areas: geojson::GeoJson =
            std::fs::read_to_string(dir.join("areas.geojson"))?.parse()?;

        log::info!(
            "Loaded panel: {} months, {} records, {} area features",
            months.len(),
            records.len(),
            feature_count(&areas)
        );

        Ok(Self {
            months,
            records,
            areas,
        })
    }
}

fn feature_count(areas: &geojson::GeoJson) -> usize {
    match areas {
        geojson::GeoJson::FeatureCollection(fc) => fc.features.len(),
        geojson::GeoJson::Feature(_) | geojson::GeoJson::Geometry(_) => 1,
    }
}

/// Checks that every month is `YYYY-MM` and the list is strictly
/// ascending. Lexicographic order on valid `YYYY-MM` strings is
/// chronological order, which is what the engines sort by.
fn validate_months(months: &[String]) -> Result<(), DatasetError> {
    for month in months {
        if chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_err()
            || month.len() != 7
        {
            return Err(validation(format!("malformed month '{month}'")));
        }
    }

    for pair in months.windows(2) {
        if pair[0] >= pair[1] {
            return Err(validation(format!(
                "months not strictly ascending: '{}' before '{}'",
                pair[0], pair[1]
            )));
        }
    }

    Ok(())
}

/// Checks per-record invariants and `(area_id, month)` uniqueness.
fn validate_records(records: &[PanelRecord], months: &[String]) -> Result<(), DatasetError> {
    let available: BTreeSet<&str> = months.iter().map(String::as_str).collect();
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();

    for record in records {
        if !available.contains(record.month.as_str()) {
            return Err(validation(format!(
                "record for area '{}' references unknown month '{}'",
                record.area_id, record.month
            )));
        }

        if !(record.exposure.is_finite() && record.exposure > 0.0) {
            return Err(validation(format!(
                "non-positive exposure {} for area '{}' month '{}'",
                record.exposure, record.area_id, record.month
            )));
        }

        if !seen.insert((record.area_id.as_str(), record.month.as_str())) {
            return Err(validation(format!(
                "duplicate record for area '{}' month '{}'",
                record.area_id, record.month
            )));
        }
    }

    Ok(())
}
