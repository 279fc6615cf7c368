// Hello endpoint: logs, waits out the simulated latency, answers with a fixed body

use axum::{body::Bytes, extract::State};
use tracing::{instrument, info};

use crate::config::state::AppState;

/// Exact response body of `/hello`
pub const HELLO_BODY: &str = "Hello World";

// Buffering the body enforces DefaultBodyLimit; oversized requests get 413 before this runs
#[instrument(skip(state, body))]
pub async fn hello_handler(State(state): State<AppState>, body: Bytes) -> &'static str {
    info!(body_len = body.len(), "Getting /hello");

    // Simulated latency; only this request's task is parked
    tokio::time::sleep(state.environment.hello_delay()).await;

    HELLO_BODY
}
