//! Advisory bundle endpoint for the VayuWatch backend.
//!
//! One request returns everything the city dashboard renders below the AQI
//! dial: risk index, vulnerable impact, daily-life guidance, checklists,
//! authority actions, NCAP progress, day-over-day change, exposure
//! projection, plain-language explanation, the optional alert, and nearby
//! cleaner-air escapes. All of it is derived on the spot from the current
//! snapshot; nothing is stored.

use axum::{
    extract::Path, extract::Query, extract::State, http::StatusCode, response::IntoResponse,
    routing::get, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::SnapshotRx;
use crate::config::Config;
use crate::intelligence::{
    self, AlertReason, AqiChange, AqiExplanation, AuthorityAction, CleanAirSuggestion, Confidence,
    DailyLifeImpact, ExposureProjection, NcapComparison, NearbyAir, RiskIndex, SafetyChecklist,
    VulnerableImpact,
};
use crate::models::AqiCategory;

// ---

pub fn router() -> Router<(SnapshotRx, Config)> {
    // ---
    Router::new().route("/api/cities/{id}/insights", get(city_insights))
}

/// Query parameters for the insights bundle.
#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    /// Yesterday's AQI when the caller tracked one; a synthetic value is
    /// drawn otherwise.
    previous_aqi: Option<u16>,
}

/// The city the bundle was computed for, as seen in the source snapshot.
#[derive(Serialize)]
struct CityContext {
    id: String,
    name: String,
    aqi: u16,
    category: AqiCategory,
    population: u64,
    dominant_source: String,
    last_updated: DateTime<Utc>,
}

#[derive(Serialize)]
struct InsightsResponse {
    city: CityContext,
    risk: RiskIndex,
    vulnerable: VulnerableImpact,
    daily_life: DailyLifeImpact,
    checklist: SafetyChecklist,
    authority_actions: Vec<AuthorityAction>,
    ncap: NcapComparison,
    change: AqiChange,
    personality: &'static str,
    exposure: ExposureProjection,
    explanation: AqiExplanation,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<AlertReason>,
    confidence: Confidence,
    escapes: Vec<CleanAirSuggestion>,
}

async fn city_insights(
    Path(id): Path<String>,
    Query(params): Query<InsightsQuery>,
    State((snapshots, _config)): State<(SnapshotRx, Config)>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/cities/{}/insights", id);
    let snap = snapshots.borrow().clone();

    let Some(city) = snap.city_by_id(&id) else {
        return (StatusCode::NOT_FOUND, Json("City not found")).into_response();
    };

    // Escape candidates are the other cities of the same state.
    let nearby: Vec<NearbyAir> = snap
        .state_of_city(&id)
        .map(|state| {
            state
                .cities
                .iter()
                .filter(|c| c.id != city.id)
                .map(|c| NearbyAir {
                    name: c.name.clone(),
                    aqi: c.aqi,
                    category: c.category,
                })
                .collect()
        })
        .unwrap_or_default();

    let mut rng = rand::thread_rng();
    let source = Some(city.dominant_source.as_str());

    let response = InsightsResponse {
        city: CityContext {
            id: city.id.clone(),
            name: city.name.clone(),
            aqi: city.aqi,
            category: city.category,
            population: city.population,
            dominant_source: city.dominant_source.clone(),
            last_updated: city.last_updated,
        },
        risk: intelligence::risk_index(city.aqi, city.population, city.category),
        vulnerable: intelligence::vulnerable_impact(city.population, city.category),
        daily_life: intelligence::daily_life_impact(city.category),
        checklist: intelligence::safety_checklist(city.category),
        authority_actions: intelligence::authority_recommendations(city.category),
        ncap: intelligence::ncap_comparison(city.aqi),
        change: intelligence::aqi_change(city.aqi, params.previous_aqi, &mut rng),
        personality: intelligence::city_personality(city.category),
        exposure: intelligence::exposure_projection(city.category),
        explanation: intelligence::explain_aqi(city.category, source),
        alert: intelligence::alert_reason(city.aqi, city.category, source),
        confidence: intelligence::confidence_level(),
        escapes: intelligence::clean_air_escapes(city.aqi, &nearby, &mut rng),
    };

    (StatusCode::OK, Json(response)).into_response()
}
