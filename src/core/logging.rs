// Start of file: /src/core/logging.rs

use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::fmt::format::FmtSpan;

// Our crate at info (request latency included), axum internals only when they warn
pub const DEFAULT_FILTER: &str = "hello_pprof=info,axum=warn";

// RUST_LOG when set and valid, DEFAULT_FILTER otherwise
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

// Initialize the tracing subscriber with default configuration.
// A second call (e.g. from another test) leaves the first subscriber in place.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn default_filter_parses_and_keeps_info() {
        let filter = EnvFilter::try_new(DEFAULT_FILTER).expect("valid directives");

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn default_filter_only_names_linked_crates() {
        for directive in DEFAULT_FILTER.split(',') {
            let target = directive.split('=').next().unwrap();
            assert!(["hello_pprof", "axum"].contains(&target), "unknown target {target}");
        }
    }
}

// End of file: /src/core/logging.rs
