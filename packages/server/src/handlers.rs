//! HTTP handler functions for the theft panel API.

use actix_web::{HttpResponse, web};
use theft_watch_analytics::compare::compare_months;
use theft_watch_analytics::ranking::RankMetric;
use theft_watch_analytics::{alerts, ranking};
use theft_watch_panel_models::EnrichedRecord;
use theft_watch_server_models::{
    ApiHealth, CompareQueryParams, PanelQueryParams, TopQueryParams,
};

use crate::{AppState, DEFAULT_THRESHOLD};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/months`
///
/// Returns the ordered list of available months.
pub async fn months(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.dataset.months)
}

/// `GET /api/areas`
///
/// Returns the area boundary `GeoJSON` verbatim for the map layer.
pub async fn areas(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.dataset.areas)
}

/// `GET /api/panel`
///
/// Returns the alert-enriched panel, optionally narrowed to one month's
/// slice. Enrichment always runs over the full history so baselines and
/// trends see every preceding month.
pub async fn panel(
    state: web::Data<AppState>,
    params: web::Query<PanelQueryParams>,
) -> HttpResponse {
    let threshold = match resolve_threshold(params.threshold) {
        Ok(threshold) => threshold,
        Err(response) => return response,
    };

    let enriched = alerts::enrich_records(&state.dataset.records, threshold);
    let response: Vec<EnrichedRecord> = match &params.month {
        Some(month) => enriched
            .into_iter()
            .filter(|r| &r.panel.month == month)
            .collect(),
        None => enriched,
    };

    HttpResponse::Ok().json(response)
}

/// `GET /api/compare`
///
/// Returns one delta record per area in the union of the two months.
pub async fn compare(
    state: web::Data<AppState>,
    params: web::Query<CompareQueryParams>,
) -> HttpResponse {
    let threshold = match resolve_threshold(params.threshold) {
        Ok(threshold) => threshold,
        Err(response) => return response,
    };

    let enriched = alerts::enrich_records(&state.dataset.records, threshold);
    let deltas = compare_months(&enriched, &params.month_a, &params.month_b);

    HttpResponse::Ok().json(deltas)
}

/// `GET /api/top`
///
/// Returns the top-10 records by the requested metric. Current metrics
/// rank one month's enriched slice and require `month`; delta metrics
/// rank a comparison and require `monthA` and `monthB`.
pub async fn top(state: web::Data<AppState>, params: web::Query<TopQueryParams>) -> HttpResponse {
    let Ok(metric) = params.metric.parse::<RankMetric>() else {
        return bad_request(&format!(
            "unknown metric '{}': expected riskIndex, theftCount, deltaRiskIndex, or deltaCount",
            params.metric
        ));
    };

    let threshold = match resolve_threshold(params.threshold) {
        Ok(threshold) => threshold,
        Err(response) => return response,
    };

    let alerts_only = params.alerts_only.unwrap_or(false);
    let enriched = alerts::enrich_records(&state.dataset.records, threshold);

    if metric.is_delta() {
        let (Some(month_a), Some(month_b)) = (&params.month_a, &params.month_b) else {
            return bad_request("delta metrics require monthA and monthB");
        };
        let deltas = compare_months(&enriched, month_a, month_b);
        return HttpResponse::Ok().json(ranking::top_records(&deltas, metric, alerts_only));
    }

    let Some(month) = &params.month else {
        return bad_request("current metrics require month");
    };
    let slice: Vec<EnrichedRecord> = enriched
        .into_iter()
        .filter(|r| &r.panel.month == month)
        .collect();

    HttpResponse::Ok().json(ranking::top_records(&slice, metric, alerts_only))
}

/// Applies the server default and rejects thresholds the engine cannot
/// work with. The UI keeps the slider inside 0.10–1.00; the server only
/// enforces that the fraction is positive and finite.
fn resolve_threshold(threshold: Option<f64>) -> Result<f64, HttpResponse> {
    let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD);
    if threshold.is_finite() && threshold > 0.0 {
        Ok(threshold)
    } else {
        Err(bad_request(&format!(
            "threshold must be a positive fraction, got {threshold}"
        )))
    }
}

fn bad_request(message: &str) -> HttpResponse {
    log::debug!("Rejected request: {message}");
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}
