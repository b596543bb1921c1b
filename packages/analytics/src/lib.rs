#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived-metrics and alerting engines for the month×area theft panel.
//!
//! Three pure, synchronous engines recompute everything from scratch on
//! every invocation — there is no incremental state, so the caller can
//! re-run them on each UI interaction (e.g. a threshold slider change)
//! and always get an answer consistent with the full input:
//!
//! - [`alerts::enrich_records`] classifies every area-month against a
//!   rolling baseline and a three-month trend.
//! - [`compare::compare_months`] produces one delta record per area for
//!   an arbitrary pair of months.
//! - [`ranking::top_records`] selects a stable top-10 by metric value.
//!
//! Identical inputs always yield identical outputs, which makes the
//! engines trivially memoizable by the caller should input sizes ever
//! grow beyond the current tens-of-areas × tens-of-months scale.

pub mod alerts;
pub mod compare;
pub mod ranking;
