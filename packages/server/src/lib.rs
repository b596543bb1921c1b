#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the theft panel frontend.
//!
//! Serves the enriched month×area panel, two-month comparisons, and
//! top-10 rankings to the map/chart frontend, plus the static resources
//! the frontend renders directly (area boundaries, month list). The
//! dataset is loaded once at startup and held immutably; every request
//! recomputes the engines from scratch, so a threshold change is just
//! another request.

pub mod handlers;

use theft_watch_dataset::Dataset;

/// Spike sensitivity used when the request omits `threshold`.
///
/// The UI constrains the slider to 0.10–1.00 in steps of 0.05; this is
/// its initial position.
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Shared application state.
pub struct AppState {
    /// The loaded panel, months, and boundaries. Immutable after load.
    pub dataset: Dataset,
}
