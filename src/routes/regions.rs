//! Geographic tree endpoints for the VayuWatch backend.
//!
//! Serves the current simulated snapshot: the full state tree, individual
//! state and city subtrees, and the national overview with rankings. Every
//! handler reads one consistent generation from the snapshot channel;
//! aggregates are recomputed per request and never cached.

use axum::{
    extract::Path, extract::Query, extract::State, http::StatusCode, response::IntoResponse,
    routing::get, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::SnapshotRx;
use crate::config::Config;
use crate::models::{CityRef, NationalStats, Snapshot};

// ---

const DEFAULT_TOP_POLLUTED: usize = 10;

pub fn router() -> Router<(SnapshotRx, Config)> {
    // ---
    Router::new()
        .route("/api/overview", get(overview))
        .route("/api/states", get(list_states))
        .route("/api/states/{id}", get(get_state))
        .route("/api/cities/{id}", get(get_city))
}

// ---

/// Query parameters for the national overview.
#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    /// How many cities the polluted ranking should contain (default: 10).
    limit: Option<usize>,
}

/// National stats plus ranking, with snapshot metadata so dashboards can
/// schedule their next poll.
#[derive(Serialize)]
struct OverviewResponse {
    stats: NationalStats,
    top_polluted: Vec<CityRef>,
    last_updated: DateTime<Utc>,
    simulated: bool,
    refresh_interval_ms: u64,
}

async fn overview(
    Query(params): Query<OverviewQuery>,
    State((snapshots, config)): State<(SnapshotRx, Config)>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/overview");
    let snap = snapshots.borrow().clone();

    let Some(stats) = snap.national_stats() else {
        error!("current snapshot contains no cities");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json("No data available"),
        )
            .into_response();
    };

    let limit = params.limit.unwrap_or(DEFAULT_TOP_POLLUTED);
    let response = OverviewResponse {
        stats,
        top_polluted: snap.top_polluted(limit),
        last_updated: snap.last_updated,
        simulated: snap.simulated,
        refresh_interval_ms: config.refresh_interval_ms,
    };

    (StatusCode::OK, Json(response)).into_response()
}

async fn list_states(
    State((snapshots, _config)): State<(SnapshotRx, Config)>,
) -> Json<Snapshot> {
    // ---
    debug!("GET /api/states");
    let snap = snapshots.borrow().clone();
    Json(snap.as_ref().clone())
}

async fn get_state(
    Path(id): Path<String>,
    State((snapshots, _config)): State<(SnapshotRx, Config)>,
) -> impl IntoResponse {
    // ---
    let snap = snapshots.borrow().clone();
    match snap.state_by_id(&id) {
        Some(state) => (StatusCode::OK, Json(state.clone())).into_response(),
        None => {
            debug!("GET /api/states/{} - unknown state", id);
            (StatusCode::NOT_FOUND, Json("State not found")).into_response()
        }
    }
}

async fn get_city(
    Path(id): Path<String>,
    State((snapshots, _config)): State<(SnapshotRx, Config)>,
) -> impl IntoResponse {
    // ---
    let snap = snapshots.borrow().clone();
    match snap.city_by_id(&id) {
        Some(city) => (StatusCode::OK, Json(city.clone())).into_response(),
        None => {
            debug!("GET /api/cities/{} - unknown city", id);
            (StatusCode::NOT_FOUND, Json("City not found")).into_response()
        }
    }
}
