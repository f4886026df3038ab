//! Scrape handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::trace;

use loadsim_metrics::render_exposition;

use crate::ApiState;

/// GET /metrics
///
/// Samples the fleet once and renders the snapshot. Each scrape is a
/// bounded synchronous computation; the only shared mutation is the
/// autoscaler's replica state, which is locked inside the sampler.
pub async fn scrape_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = state.sampler.sample();
    trace!(vus = snapshot.virtual_users, "scrape served");

    let body = render_exposition(&snapshot, env!("CARGO_PKG_VERSION"));
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        body,
    )
}
