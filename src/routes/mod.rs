use std::sync::Arc;

use axum::Router;
use tokio::sync::watch;

use crate::config::Config;
use crate::models::Snapshot;

mod health;
mod insights;
mod regions;

// ---

/// Read side of the snapshot channel shared by all handlers. Borrowing the
/// receiver always yields a complete tree — the simulator replaces the
/// `Arc` wholesale, never mutates in place.
pub type SnapshotRx = watch::Receiver<Arc<Snapshot>>;

pub fn router(snapshots: SnapshotRx, config: Config) -> Router {
    // ---
    Router::new()
        .merge(regions::router())
        .merge(insights::router())
        .merge(health::router())
        .with_state((snapshots, config))
}
