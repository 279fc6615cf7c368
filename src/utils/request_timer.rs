// Start of file: /src/utils/request_timer.rs

use std::time::Instant;
use std::convert::Infallible;
use axum::{
    body::Body,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Records when the request entered the stack and logs its latency on the way out
pub async fn request_timer(
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Infallible> {
    let start: Instant = Instant::now();
    let method: Method = req.method().clone();
    let path: String = req.uri().path().to_owned();

    req.extensions_mut().insert(start);

    // Pass the request down the chain
    let response: Response = next.run(req).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    Ok(response)
}

// End of file: /src/utils/request_timer.rs
