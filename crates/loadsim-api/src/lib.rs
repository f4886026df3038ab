//! loadsim-api — the HTTP scrape surface.
//!
//! One route matters: `GET /metrics` runs a fleet sample and returns the
//! Prometheus text exposition. Every other path falls through to axum's
//! default 404 with an empty body. There is nothing else to serve — no
//! auth, no UI, no history.

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use loadsim_metrics::FleetSampler;

/// Shared state for the scrape handler.
#[derive(Clone)]
pub struct ApiState {
    pub sampler: Arc<FleetSampler>,
}

/// Build the router: `/metrics` plus the implicit 404 fallback.
pub fn build_router(sampler: Arc<FleetSampler>) -> Router {
    let state = ApiState { sampler };

    Router::new()
        .route("/metrics", get(handlers::scrape_metrics))
        .with_state(state)
}
