// Global error handling for HTTP middleware layers

use axum::{
    BoxError,
    http::StatusCode,
    response::IntoResponse,
};
use std::error::Error;
// tower's error type for timeouts
use tower::timeout::error::Elapsed;
use tracing::warn;

/// Maps middleware errors to plain-text HTTP responses
pub async fn handle_global_error(err: BoxError) -> impl IntoResponse {
    let status: StatusCode = status_for_error(&*err);
    warn!("Request failed with {}: {}", status, err);

    (status, status.canonical_reason().unwrap_or("Unknown Status"))
}

/// Picks the status code for an error raised by a middleware layer.
/// Oversized bodies never get here: the `Bytes` extractor rejects them with 413.
pub fn status_for_error(err: &(dyn Error + 'static)) -> StatusCode {
    // 408 if the request took too long, even when wrapped by another layer
    if err.is::<Elapsed>() || find_cause::<Elapsed>(err).is_some() {
        return StatusCode::REQUEST_TIMEOUT;
    }

    // Otherwise, 500
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Fallback for every path without a route
pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Helper function to find specific error type in error chain
pub fn find_cause<T: Error + 'static>(err: &dyn Error) -> Option<&T> {
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        if let Some(typed) = s.downcast_ref::<T>() {
            return Some(typed);
        }
        source = s.source();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapper(Box<dyn Error + Send + Sync>);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "wrapped: {}", self.0)
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&*self.0)
        }
    }

    #[derive(Debug)]
    struct Leaf;

    impl fmt::Display for Leaf {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("leaf")
        }
    }

    impl Error for Leaf {}

    #[test]
    fn find_cause_walks_the_source_chain() {
        let err = Wrapper(Box::new(Wrapper(Box::new(Leaf))));

        assert!(find_cause::<Leaf>(&err).is_some());
        assert!(find_cause::<Elapsed>(&err).is_none());
    }

    #[test]
    fn timeouts_map_to_408_directly_or_wrapped() {
        assert_eq!(status_for_error(&Elapsed::new()), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            status_for_error(&Wrapper(Box::new(Elapsed::new()))),
            StatusCode::REQUEST_TIMEOUT
        );
    }

    #[test]
    fn unknown_errors_map_to_500() {
        assert_eq!(status_for_error(&Leaf), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
